//! Record identifier utilities.
//!
//! Every catalog record carries an identifier assigned by the document store at creation time.
//! Stores represent identifiers natively in different ways (a MongoDB `ObjectId`, a generated
//! UUID in the in-memory store). At the boundary of the core those native forms are collapsed
//! into a single text identifier, [`RecordId`], so nothing above the store depends on a specific
//! store's identifier representation.
//!
//! ## Text form
//! - Non-empty
//! - ASCII alphanumerics plus `-` and `_` only
//! - At most 128 characters
//!
//! Identifiers generated locally (see [`RecordId::generate`]) are 32 lowercase hex characters,
//! the same value you would get from `Uuid::new_v4().simple().to_string()`. A MongoDB
//! `ObjectId` renders as 24 lowercase hex characters. Both satisfy the text form above.

mod record_id;

pub use record_id::RecordId;

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
