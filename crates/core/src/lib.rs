//! # Catalog Core
//!
//! Core business logic for the disease and treatment-center catalog.
//!
//! This crate contains:
//! - The record model: Disease Cards and Professional Centers ([`records`])
//! - A document-store seam with in-memory and MongoDB backends ([`store`])
//! - The free-text query engine and result normalization ([`query`])
//! - Bulk loading from the embedded dataset or a JSON file ([`seed`])
//!
//! **No API concerns**: HTTP routing, CORS and OpenAPI belong in `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod query;
pub mod records;
pub mod seed;
pub mod service;
pub mod store;

pub use catalog_id::RecordId;
pub use catalog_types::NonEmptyText;
pub use config::{CatalogConfig, StoreBackend};
pub use error::{CatalogError, CatalogResult, StoreError, StoreResult};
pub use query::QueryEngine;
pub use records::{
    ContactInfo, ContactKey, DiseaseCard, NewDiseaseCard, NewProfessionalCenter,
    ProfessionalCenter, Record, RecordKind,
};
pub use seed::{BulkLoadReport, SeedData, SeedSource};
pub use service::CatalogService;
pub use store::{open_store, DocumentStore, MemoryStore, RecordStore};
