//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! nothing reads process-wide environment variables while handling a request. The helpers here
//! take already-read values (`Option<String>`) and leave the environment lookups to the binary.

use crate::constants::DEFAULT_DATABASE;
use crate::seed::SeedSource;
use crate::{CatalogError, CatalogResult};
use catalog_types::NonEmptyText;
use std::path::PathBuf;

/// Which document store backs the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    MongoDb { uri: String, database: NonEmptyText },
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    store_backend: StoreBackend,
    seed_source: SeedSource,
}

impl CatalogConfig {
    /// Create a new `CatalogConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if `seed_file` is given but is not an existing file.
    pub fn new(store_backend: StoreBackend, seed_file: Option<PathBuf>) -> CatalogResult<Self> {
        let seed_source = match seed_file {
            Some(path) if path.is_file() => SeedSource::File(path),
            Some(path) => {
                return Err(CatalogError::Config(format!(
                    "seed file does not exist: {}",
                    path.display()
                )))
            }
            None => SeedSource::Embedded,
        };

        Ok(Self {
            store_backend,
            seed_source,
        })
    }

    /// In-memory store, embedded seed data.
    pub fn in_memory() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            seed_source: SeedSource::Embedded,
        }
    }

    pub fn store_backend(&self) -> &StoreBackend {
        &self.store_backend
    }

    pub fn seed_source(&self) -> &SeedSource {
        &self.seed_source
    }
}

/// Select the store backend from optional `MONGO_URI` and database-name values.
///
/// A missing or blank URI selects the in-memory store. With a URI, the database name defaults
/// to `rare_diseases` when missing or blank.
pub fn store_backend_from_env_values(
    mongo_uri: Option<String>,
    database: Option<String>,
) -> CatalogResult<StoreBackend> {
    let Some(uri) = non_blank(mongo_uri) else {
        return Ok(StoreBackend::Memory);
    };

    let database = non_blank(database).unwrap_or_else(|| DEFAULT_DATABASE.to_owned());
    let database = NonEmptyText::new(database)
        .map_err(|_| CatalogError::Config("database name cannot be empty".into()))?;

    if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
        return Err(CatalogError::Config(
            "MONGO_URI must start with mongodb:// or mongodb+srv://".into(),
        ));
    }

    Ok(StoreBackend::MongoDb { uri, database })
}

/// Parse the optional seed-file value; blank means "use the embedded dataset".
pub fn seed_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    non_blank(value).map(PathBuf::from)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
