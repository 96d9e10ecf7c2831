use super::{Document, DocumentStore, Filter};
use crate::constants::{NATIVE_ID_KEY, RECORD_ID_KEY};
use crate::records::{CatalogRecord, RecordKind};
use crate::{CatalogResult, StoreError};
use catalog_id::RecordId;
use serde_json::Value;
use std::sync::Arc;

/// Typed wrapper mapping each [`RecordKind`] onto its own store collection.
#[derive(Clone)]
pub struct RecordStore {
    store: Arc<dyn DocumentStore>,
}

impl RecordStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Inserts a validated record and returns its store-assigned identifier.
    ///
    /// Records only exist once their required fields have been validated (see
    /// `NewDiseaseCard::validate` and `NewProfessionalCenter::validate`), so a record that
    /// reaches this point is always complete.
    pub async fn create<R: CatalogRecord>(&self, record: &R) -> CatalogResult<RecordId> {
        let document = match serde_json::to_value(record).map_err(StoreError::from)? {
            Value::Object(mut map) => {
                map.remove(NATIVE_ID_KEY);
                map.remove(RECORD_ID_KEY);
                map
            }
            _ => {
                return Err(StoreError::Encoding(format!(
                    "{} did not serialize to an object",
                    R::KIND
                ))
                .into())
            }
        };

        let id = self.store.insert(R::KIND.collection(), document).await?;
        tracing::debug!("created {} {} ({})", R::KIND, id, record.name());
        Ok(id)
    }

    /// Deletes every record of `kind`. Succeeds on an already empty collection.
    pub async fn clear(&self, kind: RecordKind) -> CatalogResult<u64> {
        let removed = self.store.delete_all(kind.collection()).await?;
        tracing::debug!("cleared {} {} records", removed, kind);
        Ok(removed)
    }

    /// Raw documents of `kind` matching `filter`, still carrying the store-native `_id`.
    pub async fn find(
        &self,
        kind: RecordKind,
        filter: Option<&Filter>,
    ) -> CatalogResult<Vec<Document>> {
        Ok(self.store.find(kind.collection(), filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DISEASE_CARD_COLLECTION;
    use crate::records::{NewDiseaseCard, NewProfessionalCenter};
    use crate::store::MemoryStore;

    fn stores() -> (Arc<MemoryStore>, RecordStore) {
        let memory = Arc::new(MemoryStore::new());
        let records = RecordStore::new(memory.clone());
        (memory, records)
    }

    #[tokio::test]
    async fn test_create_writes_to_kind_collection() {
        let (memory, records) = stores();
        let card = NewDiseaseCard {
            name: Some("Asthma".into()),
            symptoms: vec!["Wheezing".into()],
            ..Default::default()
        }
        .validate()
        .unwrap();

        let id = records.create(&card).await.expect("create should succeed");

        assert_eq!(memory.len(DISEASE_CARD_COLLECTION), 1);
        let stored = records.find(RecordKind::DiseaseCard, None).await.unwrap();
        assert_eq!(stored[0]["_id"], serde_json::json!(id.as_str()));
        assert_eq!(stored[0]["name"], "Asthma");
        assert_eq!(stored[0]["symptoms"], serde_json::json!(["Wheezing"]));
        assert!(!stored[0].contains_key("id"));
    }

    #[tokio::test]
    async fn test_clear_only_affects_one_kind() {
        let (_memory, records) = stores();
        let card = NewDiseaseCard {
            name: Some("Lupus".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        let center = NewProfessionalCenter {
            name: Some("Lupus Center".into()),
            location: Some("Boston".into()),
            map_reference: Some("https://maps.example.com/lupus".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        records.create(&card).await.unwrap();
        records.create(&center).await.unwrap();

        assert_eq!(records.clear(RecordKind::DiseaseCard).await.unwrap(), 1);
        assert_eq!(records.clear(RecordKind::DiseaseCard).await.unwrap(), 0);
        assert_eq!(
            records
                .find(RecordKind::ProfessionalCenter, None)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
