use crate::config::CatalogConfig;
use crate::query::QueryEngine;
use crate::records::{
    DiseaseCard, NewDiseaseCard, NewProfessionalCenter, ProfessionalCenter, Record,
};
use crate::seed::{bulk_load, BulkLoadReport, SeedSource};
use crate::store::{DocumentStore, RecordStore};
use crate::CatalogResult;
use std::sync::Arc;

/// Catalog operations over an explicitly opened document store.
///
/// Cheap to clone; clones share the same store handle. The handle's lifecycle belongs to
/// whoever opened it: call [`CatalogService::close`] once at shutdown.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
    records: RecordStore,
    engine: QueryEngine,
    seed_source: SeedSource,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>, cfg: &CatalogConfig) -> Self {
        let records = RecordStore::new(store.clone());
        Self {
            store,
            engine: QueryEngine::new(records.clone()),
            records,
            seed_source: cfg.seed_source().clone(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub fn query_engine(&self) -> &QueryEngine {
        &self.engine
    }

    pub async fn search_diseases(
        &self,
        term: Option<&str>,
    ) -> CatalogResult<Vec<Record<DiseaseCard>>> {
        self.engine.search_diseases(term).await
    }

    pub async fn search_centers(
        &self,
        term: Option<&str>,
    ) -> CatalogResult<Vec<Record<ProfessionalCenter>>> {
        self.engine.search_centers(term).await
    }

    /// Validates and stores one Disease Card, returning it with its new identifier.
    pub async fn create_disease(
        &self,
        draft: NewDiseaseCard,
    ) -> CatalogResult<Record<DiseaseCard>> {
        let card = draft.validate()?;
        let id = self.records.create(&card).await?;
        Ok(Record { id, fields: card })
    }

    /// Validates and stores one Professional Center, returning it with its new identifier.
    pub async fn create_center(
        &self,
        draft: NewProfessionalCenter,
    ) -> CatalogResult<Record<ProfessionalCenter>> {
        let center = draft.validate()?;
        let id = self.records.create(&center).await?;
        Ok(Record { id, fields: center })
    }

    /// Replaces both collections with the configured seed dataset.
    pub async fn seed(&self) -> CatalogResult<BulkLoadReport> {
        let data = self.seed_source.load()?;
        tracing::info!(
            "seeding {} records from {:?} into {} store",
            data.len(),
            self.seed_source,
            self.backend_name()
        );
        bulk_load(&self.records, data).await
    }

    /// Closes the underlying store handle.
    pub async fn close(&self) -> CatalogResult<()> {
        self.store.close().await?;
        Ok(())
    }
}
