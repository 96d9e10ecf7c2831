//! Document-store abstraction.
//!
//! The catalog delegates persistence to a document store that exposes insert, query and
//! delete over named collections. [`DocumentStore`] is that seam; backends implement it:
//!
//! - [`MemoryStore`]: in-process collections, always available. Used for tests and for running
//!   without an external database.
//! - `MongoStore`: MongoDB via the official driver, behind the `mongodb` cargo feature.
//!
//! Documents cross the seam as JSON objects. A document returned by [`DocumentStore::find`]
//! carries the store's native identifier under [`NATIVE_ID_KEY`]; converting it into a
//! [`RecordId`] is the caller's job (see [`native_id_to_record_id`]).
//!
//! The store handle is constructed once at startup via [`open_store`], shared by reference
//! counting, and released with [`DocumentStore::close`] at shutdown.

mod filter;
mod memory;
#[cfg(feature = "mongodb")]
mod mongo;
mod records;

pub use filter::{Filter, FilterMatcher};
pub use memory::MemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;
pub use records::RecordStore;

use crate::config::StoreBackend;
use crate::constants::{NATIVE_ID_KEY, OBJECT_ID_KEY};
use crate::{CatalogResult, StoreError, StoreResult};
use async_trait::async_trait;
use catalog_id::RecordId;
use serde_json::Value;
use std::sync::Arc;

/// A schema-less document as exchanged with the store.
pub type Document = serde_json::Map<String, Value>;

/// Generic document collection client.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Inserts a document and returns the identifier the store assigned to it.
    ///
    /// Any `_id` already present in `document` is ignored; identifiers are always assigned by
    /// the store.
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<RecordId>;

    /// Returns the documents of `collection` matching `filter`, in the store's default order.
    ///
    /// `None` returns every document in the collection.
    async fn find(&self, collection: &str, filter: Option<&Filter>) -> StoreResult<Vec<Document>>;

    /// Deletes every document in `collection` and returns how many were removed.
    ///
    /// Clearing an empty or unknown collection succeeds and returns zero.
    async fn delete_all(&self, collection: &str) -> StoreResult<u64>;

    /// Releases the backend's resources. Called once at shutdown.
    async fn close(&self) -> StoreResult<()>;
}

/// Opens the store selected by configuration.
///
/// # Errors
///
/// Returns [`crate::CatalogError::Config`] if MongoDB is configured but this build lacks the
/// `mongodb` feature, or a store error if the connection cannot be established.
pub async fn open_store(backend: &StoreBackend) -> CatalogResult<Arc<dyn DocumentStore>> {
    match backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "mongodb")]
        StoreBackend::MongoDb { uri, database } => {
            tracing::info!("connecting to MongoDB database {}", database);
            let store = MongoStore::connect(uri, database.as_str()).await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb"))]
        StoreBackend::MongoDb { .. } => Err(crate::CatalogError::Config(
            "MONGO_URI is set but this build does not include the `mongodb` feature".into(),
        )),
    }
}

/// Converts a store-native identifier value into a [`RecordId`].
///
/// Accepted native forms:
/// - a plain string (in-memory store),
/// - extended JSON `{"$oid": "<hex>"}` (MongoDB `ObjectId`),
/// - an integer.
pub fn native_id_to_record_id(collection: &str, native: &Value) -> StoreResult<RecordId> {
    let text = match native {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => match map.get(OBJECT_ID_KEY) {
            Some(Value::String(s)) => s.clone(),
            _ => return Err(malformed(collection, "unrecognised native identifier object")),
        },
        _ => return Err(malformed(collection, "unsupported native identifier type")),
    };

    RecordId::parse(&text).map_err(|e| malformed(collection, &e.to_string()))
}

/// Removes the native identifier from `document` and returns it as a [`RecordId`].
pub fn take_record_id(collection: &str, document: &mut Document) -> StoreResult<RecordId> {
    let native = document
        .remove(NATIVE_ID_KEY)
        .ok_or_else(|| malformed(collection, "document has no _id"))?;
    native_id_to_record_id(collection, &native)
}

fn malformed(collection: &str, reason: &str) -> StoreError {
    StoreError::MalformedDocument {
        collection: collection.to_owned(),
        reason: reason.to_owned(),
    }
}
