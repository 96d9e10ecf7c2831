//! # API Shared
//!
//! Shared definitions for the catalog's outward-facing surfaces.
//!
//! Contains:
//! - Request and response types with OpenAPI schemas (`models` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `catalog` CLI. This crate does not depend on the core; callers
//! map between core records and these wire types.

pub mod health;
pub mod models;

pub use health::HealthService;
pub use models::*;
