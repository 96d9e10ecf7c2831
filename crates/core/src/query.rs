//! Free-text query engine.
//!
//! A query is a single optional search term plus a record kind:
//!
//! - An absent or empty term matches every record of the kind.
//! - Any other term is matched as a case-insensitive substring, with no trimming or
//!   tokenisation, against the kind's searchable fields (see
//!   [`RecordKind::searchable_fields`]). A record matches when any one field matches; list
//!   fields match when any entry does.
//!
//! Results come back in the store's order. Each raw document is normalized before it leaves
//! the engine: the store-native `_id` is removed and its text form is exposed as `id`.

use crate::constants::RECORD_ID_KEY;
use crate::records::{CatalogRecord, DiseaseCard, ProfessionalCenter, Record, RecordKind};
use crate::store::{take_record_id, Document, Filter, RecordStore};
use crate::{CatalogResult, StoreError};
use serde_json::Value;

/// Builds the store filter for `term` over `kind`.
///
/// Returns `None` (match everything) for an absent or empty term.
pub fn build_filter(kind: RecordKind, term: Option<&str>) -> Option<Filter> {
    let term = term.filter(|t| !t.is_empty())?;

    let mut branches: Vec<Filter> = kind
        .searchable_fields()
        .iter()
        .map(|field| Filter::contains_ignore_case(*field, term))
        .collect();

    if branches.len() == 1 {
        branches.pop()
    } else {
        Some(Filter::AnyOf(branches))
    }
}

/// Normalizes a raw store document into caller-facing shape.
///
/// The native identifier is converted to text under `id`; a stray business field named `id`
/// is dropped so the identifier is never duplicated. Every other field is passed through
/// untouched.
pub fn normalize_document(collection: &str, mut document: Document) -> CatalogResult<Document> {
    let id = take_record_id(collection, &mut document)?;
    document.remove(RECORD_ID_KEY);

    let mut normalized = Document::with_capacity(document.len() + 1);
    normalized.insert(RECORD_ID_KEY.to_owned(), Value::String(id.into()));
    normalized.extend(document);
    Ok(normalized)
}

/// Runs free-text queries against a [`RecordStore`].
#[derive(Clone)]
pub struct QueryEngine {
    records: RecordStore,
}

impl QueryEngine {
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    /// Searches the kind named by `kind` and returns normalized, untyped documents.
    ///
    /// # Errors
    ///
    /// - [`crate::CatalogError::InvalidKind`] if `kind` names no record kind.
    /// - [`crate::CatalogError::Store`] if the store fails or returns a malformed document.
    pub async fn search_documents(
        &self,
        kind: &str,
        term: Option<&str>,
    ) -> CatalogResult<Vec<Document>> {
        let kind: RecordKind = kind.parse()?;
        let documents = self.find(kind, term).await?;

        documents
            .into_iter()
            .map(|document| normalize_document(kind.collection(), document))
            .collect()
    }

    pub async fn search_diseases(
        &self,
        term: Option<&str>,
    ) -> CatalogResult<Vec<Record<DiseaseCard>>> {
        self.search::<DiseaseCard>(term).await
    }

    pub async fn search_centers(
        &self,
        term: Option<&str>,
    ) -> CatalogResult<Vec<Record<ProfessionalCenter>>> {
        self.search::<ProfessionalCenter>(term).await
    }

    /// Searches records of type `R` and decodes each normalized document.
    pub async fn search<R: CatalogRecord>(
        &self,
        term: Option<&str>,
    ) -> CatalogResult<Vec<Record<R>>> {
        let collection = R::KIND.collection();
        let documents = self.find(R::KIND, term).await?;

        documents
            .into_iter()
            .map(|mut document| {
                let id = take_record_id(collection, &mut document)?;
                document.remove(RECORD_ID_KEY);
                let fields: R = serde_json::from_value(Value::Object(document)).map_err(|e| {
                    StoreError::MalformedDocument {
                        collection: collection.to_owned(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(Record { id, fields })
            })
            .collect()
    }

    async fn find(&self, kind: RecordKind, term: Option<&str>) -> CatalogResult<Vec<Document>> {
        let filter = build_filter(kind, term);
        tracing::debug!("searching {} with filter {:?}", kind, filter);
        self.records.find(kind, filter.as_ref()).await
    }
}
