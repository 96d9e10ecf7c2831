//! MongoDB document-store backend.
//!
//! Filters translate to native queries: a case-insensitive substring test becomes an escaped
//! `$regex` with the `i` option (MongoDB applies it to each element of an array field), and
//! [`Filter::AnyOf`] becomes `$or`. Documents are read back as relaxed extended JSON, so the
//! native `ObjectId` arrives as `{"$oid": "<hex>"}` under `_id`.

use super::{Document, DocumentStore, Filter};
use crate::constants::NATIVE_ID_KEY;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use catalog_id::RecordId;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document as BsonDocument};
use mongodb::{Client, Collection, Database};
use serde_json::Value;

/// MongoDB-backed store. One database; one MongoDB collection per catalog collection.
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connects to `uri` and selects `database`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URI is invalid or the client cannot be built.
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let database = client.database(database);
        Ok(Self { client, database })
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.database.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn insert(&self, collection: &str, mut document: Document) -> StoreResult<RecordId> {
        document.remove(NATIVE_ID_KEY);
        let encoded =
            bson::to_document(&document).map_err(|e| StoreError::Encoding(e.to_string()))?;

        let result = self.collection(collection).insert_one(encoded).await?;
        let object_id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Backend(format!(
                "insert into {} returned a non-ObjectId identifier",
                collection
            ))
        })?;

        RecordId::parse(&object_id.to_hex()).map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn find(&self, collection: &str, filter: Option<&Filter>) -> StoreResult<Vec<Document>> {
        let query = filter.map(filter_to_bson).unwrap_or_default();
        tracing::debug!("mongodb find on {}: {}", collection, query);

        let cursor = self.collection(collection).find(query).await?;
        let raw: Vec<BsonDocument> = cursor.try_collect().await?;

        raw.into_iter()
            .map(|document| match Bson::Document(document).into_relaxed_extjson() {
                Value::Object(map) => Ok(map),
                _ => Err(StoreError::MalformedDocument {
                    collection: collection.to_owned(),
                    reason: "document did not decode to an object".into(),
                }),
            })
            .collect()
    }

    async fn delete_all(&self, collection: &str) -> StoreResult<u64> {
        let result = self.collection(collection).delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    async fn close(&self) -> StoreResult<()> {
        self.client.clone().shutdown().await;
        Ok(())
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

fn filter_to_bson(filter: &Filter) -> BsonDocument {
    match filter {
        Filter::ContainsIgnoreCase { field, needle } => {
            let mut query = BsonDocument::new();
            query.insert(
                field.as_str(),
                doc! { "$regex": regex::escape(needle), "$options": "i" },
            );
            query
        }
        Filter::AnyOf(filters) => {
            let branches: Vec<BsonDocument> = filters.iter().map(filter_to_bson).collect();
            doc! { "$or": branches }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_becomes_escaped_case_insensitive_regex() {
        let query = filter_to_bson(&Filter::contains_ignore_case("name", "HIV/AIDS (x)"));

        assert_eq!(
            query,
            doc! { "name": { "$regex": "HIV/AIDS \\(x\\)", "$options": "i" } }
        );
    }

    #[test]
    fn test_any_of_becomes_or() {
        let query = filter_to_bson(&Filter::AnyOf(vec![
            Filter::contains_ignore_case("name", "toronto"),
            Filter::contains_ignore_case("location", "toronto"),
        ]));

        assert_eq!(
            query,
            doc! { "$or": [
                { "name": { "$regex": "toronto", "$options": "i" } },
                { "location": { "$regex": "toronto", "$options": "i" } },
            ] }
        );
    }
}
