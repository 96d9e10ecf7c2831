//! Wire types for the catalog API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Query-string parameters accepted by the search endpoints.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring to search for. Omitted or empty returns every record.
    pub q: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiseaseCardRes {
    pub id: String,
    pub name: String,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub treatments: Vec<String>,
    pub prevalence: Option<String>,
    pub resources: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfessionalCenterRes {
    pub id: String,
    pub name: String,
    pub location: String,
    pub map_reference: String,
    pub diseases: Vec<String>,
    /// `phone`, `email` and `website` when known, plus any additional keys.
    #[schema(value_type = Object)]
    pub contact_info: BTreeMap<String, String>,
    pub hours_of_operation: Option<String>,
}

/// Body of `POST /api/diseases`. Only `name` is required.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CreateDiseaseCardReq {
    pub name: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub causes: Vec<String>,
    #[serde(default)]
    pub treatments: Vec<String>,
    #[serde(default, alias = "prevalance")]
    pub prevalence: Option<String>,
    #[serde(default, alias = "resourses")]
    pub resources: Vec<String>,
}

/// Body of `POST /api/professional_centers`. `name`, `location` and `map_reference` are
/// required.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CreateProfessionalCenterReq {
    pub name: Option<String>,
    pub location: Option<String>,
    pub map_reference: Option<String>,
    #[serde(default)]
    pub diseases: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub contact_info: BTreeMap<String, String>,
    pub hours_of_operation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeedRes {
    pub message: String,
    pub diseases: usize,
    pub professional_centers: usize,
}

/// Error body returned with every non-2xx status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
    pub error: String,
}
