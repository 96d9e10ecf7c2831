//! Bulk loading of the catalog.
//!
//! A bulk load clears both collections and repopulates them from a dataset, either the one
//! embedded in this crate (`data/seed.json`) or a JSON file with the same layout:
//!
//! ```json
//! { "diseases": [ { "name": "...", ... } ], "professional_centers": [ { ... } ] }
//! ```
//!
//! Every record is attempted. If any record fails validation or insertion the load reports
//! failure, with the number of records that did make it in and the individual causes.

use crate::records::{CatalogRecord, NewDiseaseCard, NewProfessionalCenter, RecordKind};
use crate::store::RecordStore;
use crate::{CatalogError, CatalogResult};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Dataset shipped with the crate.
pub const EMBEDDED_SEED_JSON: &str = include_str!("../data/seed.json");

/// Records to load, in load order.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub diseases: Vec<NewDiseaseCard>,
    #[serde(default)]
    pub professional_centers: Vec<NewProfessionalCenter>,
}

impl SeedData {
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        serde_json::from_str(json).map_err(CatalogError::SeedParse)
    }

    pub fn embedded() -> CatalogResult<Self> {
        Self::from_json_str(EMBEDDED_SEED_JSON)
    }

    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::SeedFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.diseases.len() + self.professional_centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where bulk-load data comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SeedSource {
    #[default]
    Embedded,
    File(PathBuf),
}

impl SeedSource {
    /// Reads the dataset. File sources are re-read on every call.
    pub fn load(&self) -> CatalogResult<SeedData> {
        match self {
            SeedSource::Embedded => SeedData::embedded(),
            SeedSource::File(path) => SeedData::from_file(path),
        }
    }
}

/// One record that could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkLoadFailure {
    pub kind: RecordKind,
    /// Position of the record within its list in the dataset.
    pub index: usize,
    pub name: Option<String>,
    pub error: String,
}

impl fmt::Display for BulkLoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}[{}] '{}': {}", self.kind, self.index, name, self.error),
            None => write!(f, "{}[{}]: {}", self.kind, self.index, self.error),
        }
    }
}

/// Outcome of a successful bulk load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BulkLoadReport {
    pub diseases_removed: u64,
    pub centers_removed: u64,
    pub diseases_inserted: usize,
    pub centers_inserted: usize,
}

impl BulkLoadReport {
    pub fn inserted(&self) -> usize {
        self.diseases_inserted + self.centers_inserted
    }
}

/// Replaces all records of both kinds with `data`.
///
/// # Errors
///
/// - [`CatalogError::Store`] if clearing a collection fails; nothing is inserted in that case.
/// - [`CatalogError::BulkLoad`] if one or more records failed. Records that loaded
///   successfully stay in the store.
pub async fn bulk_load(records: &RecordStore, data: SeedData) -> CatalogResult<BulkLoadReport> {
    let mut report = BulkLoadReport {
        diseases_removed: records.clear(RecordKind::DiseaseCard).await?,
        centers_removed: records.clear(RecordKind::ProfessionalCenter).await?,
        ..Default::default()
    };
    let attempted = data.len();
    let mut failures = Vec::new();

    for (index, draft) in data.diseases.into_iter().enumerate() {
        let name = draft.name.clone();
        match insert_one(records, draft.validate()).await {
            Ok(()) => report.diseases_inserted += 1,
            Err(e) => failures.push(failure(RecordKind::DiseaseCard, index, name, e)),
        }
    }

    for (index, draft) in data.professional_centers.into_iter().enumerate() {
        let name = draft.name.clone();
        match insert_one(records, draft.validate()).await {
            Ok(()) => report.centers_inserted += 1,
            Err(e) => failures.push(failure(RecordKind::ProfessionalCenter, index, name, e)),
        }
    }

    if failures.is_empty() {
        tracing::info!(
            "bulk load complete: {} disease cards, {} professional centers",
            report.diseases_inserted,
            report.centers_inserted
        );
        return Ok(report);
    }

    let details = failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(CatalogError::BulkLoad {
        attempted,
        inserted: report.inserted(),
        failed: failures.len(),
        details,
    })
}

async fn insert_one<R: CatalogRecord>(
    records: &RecordStore,
    validated: CatalogResult<R>,
) -> CatalogResult<()> {
    records.create(&validated?).await.map(|_| ())
}

fn failure(
    kind: RecordKind,
    index: usize,
    name: Option<String>,
    error: CatalogError,
) -> BulkLoadFailure {
    let failure = BulkLoadFailure {
        kind,
        index,
        name,
        error: error.to_string(),
    };
    tracing::warn!("bulk load record failed: {}", failure);
    failure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Document, DocumentStore, Filter, MemoryStore};
    use crate::{StoreError, StoreResult};
    use async_trait::async_trait;
    use catalog_id::RecordId;
    use std::io::Write;
    use std::sync::Arc;

    /// Memory store that rejects inserts of documents whose name matches `poison`.
    struct FlakyStore {
        inner: MemoryStore,
        poison: &'static str,
    }

    #[async_trait]
    impl DocumentStore for FlakyStore {
        fn backend_name(&self) -> &'static str {
            "flaky"
        }

        async fn insert(&self, collection: &str, document: Document) -> StoreResult<RecordId> {
            if document.get("name").and_then(|v| v.as_str()) == Some(self.poison) {
                return Err(StoreError::Backend("write rejected".into()));
            }
            self.inner.insert(collection, document).await
        }

        async fn find(
            &self,
            collection: &str,
            filter: Option<&Filter>,
        ) -> StoreResult<Vec<Document>> {
            self.inner.find(collection, filter).await
        }

        async fn delete_all(&self, collection: &str) -> StoreResult<u64> {
            self.inner.delete_all(collection).await
        }

        async fn close(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_embedded_dataset_is_complete() {
        let data = SeedData::embedded().expect("embedded seed must parse");

        assert_eq!(data.diseases.len(), 15);
        assert!(!data.professional_centers.is_empty());
        for draft in data.diseases {
            let card = draft.validate().expect("embedded disease must validate");
            assert!(card.prevalence.is_some(), "{} lacks prevalence", card.name);
            assert!(!card.resources.is_empty(), "{} lacks resources", card.name);
        }
        for draft in data.professional_centers {
            draft.validate().expect("embedded center must validate");
        }
    }

    #[tokio::test]
    async fn test_bulk_load_replaces_existing_records() {
        let records = RecordStore::new(Arc::new(MemoryStore::new()));
        let stale = NewDiseaseCard {
            name: Some("Stale".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        records.create(&stale).await.unwrap();

        let data = SeedData::embedded().unwrap();
        let expected_centers = data.professional_centers.len();
        let report = bulk_load(&records, data).await.expect("bulk load should succeed");

        assert_eq!(report.diseases_removed, 1);
        assert_eq!(report.diseases_inserted, 15);
        assert_eq!(report.centers_inserted, expected_centers);

        let diseases = records.find(RecordKind::DiseaseCard, None).await.unwrap();
        assert_eq!(diseases.len(), 15);
        assert!(diseases.iter().all(|d| d["name"] != "Stale"));
    }

    #[tokio::test]
    async fn test_bulk_load_is_repeatable() {
        let records = RecordStore::new(Arc::new(MemoryStore::new()));

        bulk_load(&records, SeedData::embedded().unwrap()).await.unwrap();
        let report = bulk_load(&records, SeedData::embedded().unwrap()).await.unwrap();

        assert_eq!(report.diseases_removed, 15);
        assert_eq!(
            records.find(RecordKind::DiseaseCard, None).await.unwrap().len(),
            15
        );
    }

    #[tokio::test]
    async fn test_bulk_load_reports_invalid_records() {
        let records = RecordStore::new(Arc::new(MemoryStore::new()));
        let data = SeedData::from_json_str(
            r#"{
                "diseases": [{"name": "Asthma"}, {"symptoms": ["nameless"]}],
                "professional_centers": [{"name": "Clinic", "location": "Toronto"}]
            }"#,
        )
        .unwrap();

        match bulk_load(&records, data).await {
            Err(CatalogError::BulkLoad {
                attempted,
                inserted,
                failed,
                details,
            }) => {
                assert_eq!(attempted, 3);
                assert_eq!(inserted, 1);
                assert_eq!(failed, 2);
                assert!(details.contains("disease_card[1]"));
                assert!(details.contains("name is required"));
                assert!(details.contains("professional_center[0] 'Clinic'"));
                assert!(details.contains("map_reference is required"));
            }
            other => panic!("Expected BulkLoad error, got {:?}", other),
        }

        // The valid record still loaded.
        assert_eq!(
            records.find(RecordKind::DiseaseCard, None).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_bulk_load_reports_store_insert_failures() {
        let records = RecordStore::new(Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            poison: "Lupus",
        }));

        let err = bulk_load(&records, SeedData::embedded().unwrap())
            .await
            .expect_err("a rejected insert must fail the load");

        let message = err.to_string();
        assert!(message.contains("1 of"), "{}", message);
        assert!(message.contains("'Lupus': store error"), "{}", message);
        assert!(message.contains("write rejected"), "{}", message);
    }

    #[test]
    fn test_seed_source_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(
            file,
            r#"{{"diseases": [{{"name": "Migraine", "prevalance": "Common"}}]}}"#
        )
        .unwrap();

        let data = SeedSource::File(file.path().to_path_buf())
            .load()
            .expect("seed file should load");

        assert_eq!(data.diseases.len(), 1);
        assert!(data.professional_centers.is_empty());
        assert_eq!(data.diseases[0].prevalence.as_deref(), Some("Common"));
    }

    #[test]
    fn test_seed_source_missing_file() {
        let source = SeedSource::File(PathBuf::from("/nonexistent/seed.json"));
        assert!(matches!(
            source.load(),
            Err(CatalogError::SeedFileRead { .. })
        ));
    }

    #[test]
    fn test_seed_parse_error() {
        assert!(matches!(
            SeedData::from_json_str("{not json"),
            Err(CatalogError::SeedParse(_))
        ));
    }
}
