use super::{Document, DocumentStore, Filter};
use crate::constants::NATIVE_ID_KEY;
use crate::StoreResult;
use async_trait::async_trait;
use catalog_id::RecordId;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// In-process document store.
///
/// Collections are created on first insert and keep documents in insertion order, which is
/// the order `find` returns them in. Identifiers are generated with [`RecordId::generate`] and
/// stored as plain strings under `_id`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, mut document: Document) -> StoreResult<RecordId> {
        let id = RecordId::generate();
        document.insert(NATIVE_ID_KEY.to_owned(), Value::String(id.to_string()));

        self.collections
            .write()
            .entry(collection.to_owned())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn find(&self, collection: &str, filter: Option<&Filter>) -> StoreResult<Vec<Document>> {
        let matcher = filter.map(Filter::compile).transpose()?;

        let collections = self.collections.read();
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|document| matcher.as_ref().map_or(true, |m| m.matches(document)))
            .cloned()
            .collect())
    }

    async fn delete_all(&self, collection: &str) -> StoreResult<u64> {
        let removed = self
            .collections
            .write()
            .remove(collection)
            .map(|documents| documents.len() as u64)
            .unwrap_or(0);
        Ok(removed)
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let store = MemoryStore::new();

        let first = store.insert("c", doc(json!({"name": "a"}))).await.unwrap();
        let second = store.insert("c", doc(json!({"name": "a"}))).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.len("c"), 2);
    }

    #[tokio::test]
    async fn test_insert_overrides_caller_supplied_id() {
        let store = MemoryStore::new();

        let id = store
            .insert("c", doc(json!({"_id": "mine", "name": "a"})))
            .await
            .unwrap();
        let found = store.find("c", None).await.unwrap();

        assert_ne!(id.as_str(), "mine");
        assert_eq!(found[0]["_id"], json!(id.as_str()));
    }

    #[tokio::test]
    async fn test_find_without_filter_returns_insertion_order() {
        let store = MemoryStore::new();
        for name in ["Asthma", "Diabetes", "Lupus"] {
            store.insert("c", doc(json!({"name": name}))).await.unwrap();
        }

        let names: Vec<String> = store
            .find("c", None)
            .await
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_owned())
            .collect();

        assert_eq!(names, vec!["Asthma", "Diabetes", "Lupus"]);
    }

    #[tokio::test]
    async fn test_find_applies_filter() {
        let store = MemoryStore::new();
        store.insert("c", doc(json!({"name": "Asthma"}))).await.unwrap();
        store.insert("c", doc(json!({"name": "Diabetes"}))).await.unwrap();

        let filter = Filter::contains_ignore_case("name", "AST");
        let found = store.find("c", Some(&filter)).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "Asthma");
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let store = MemoryStore::new();
        store.insert("a", doc(json!({"name": "x"}))).await.unwrap();

        assert!(store.find("b", None).await.unwrap().is_empty());
        assert_eq!(store.delete_all("b").await.unwrap(), 0);
        assert_eq!(store.len("a"), 1);
    }

    #[tokio::test]
    async fn test_delete_all_is_idempotent() {
        let store = MemoryStore::new();
        store.insert("c", doc(json!({"name": "x"}))).await.unwrap();
        store.insert("c", doc(json!({"name": "y"}))).await.unwrap();

        assert_eq!(store.delete_all("c").await.unwrap(), 2);
        assert_eq!(store.delete_all("c").await.unwrap(), 0);
        assert!(store.is_empty("c"));
    }
}
