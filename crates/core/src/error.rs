use crate::records::RecordKind;

/// Failures raised by a document-store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect to document store: {0}")]
    Connection(String),
    #[error("document store operation failed: {0}")]
    Backend(String),
    #[error("malformed document in collection {collection}: {reason}")]
    MalformedDocument { collection: String, reason: String },
    #[error("failed to encode document: {0}")]
    Encoding(String),
    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid {kind}: {message}")]
    Validation { kind: RecordKind, message: String },
    #[error("unsupported record kind: {0}")]
    InvalidKind(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error(
        "bulk load incomplete: {failed} of {attempted} records failed ({inserted} inserted): {details}"
    )]
    BulkLoad {
        attempted: usize,
        inserted: usize,
        failed: usize,
        details: String,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read seed file {path}: {source}", path = path.display())]
    SeedFileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse seed data: {0}")]
    SeedParse(serde_json::Error),
}

impl CatalogError {
    /// True when the error was caused by caller input rather than the service itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CatalogError::Validation { .. })
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
