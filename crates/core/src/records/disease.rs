use super::{null_as_default, CatalogRecord, RecordKind};
use crate::{CatalogError, CatalogResult};
use catalog_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// One disease or condition.
///
/// List order is display order; duplicates are permitted. Stored documents that still use the
/// legacy keys `prevalance` and `resourses` decode into `prevalence` and `resources`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiseaseCard {
    pub name: NonEmptyText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub symptoms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub causes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub treatments: Vec<String>,
    /// Qualitative label such as "Rare" or "Very common".
    #[serde(default, alias = "prevalance")]
    pub prevalence: Option<String>,
    #[serde(default, alias = "resourses", deserialize_with = "null_as_default")]
    pub resources: Vec<String>,
}

impl CatalogRecord for DiseaseCard {
    const KIND: RecordKind = RecordKind::DiseaseCard;

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Disease Card input as received from callers or seed files.
///
/// Every field is optional here so that a missing `name` surfaces as a validation error
/// rather than a decoding failure. The legacy spellings `prevalance` and `resourses` are
/// accepted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NewDiseaseCard {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub symptoms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub causes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub treatments: Vec<String>,
    #[serde(default, alias = "prevalance")]
    pub prevalence: Option<String>,
    #[serde(default, alias = "resourses", deserialize_with = "null_as_default")]
    pub resources: Vec<String>,
}

impl NewDiseaseCard {
    /// Checks required fields and produces a storable [`DiseaseCard`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if `name` is absent or blank.
    pub fn validate(self) -> CatalogResult<DiseaseCard> {
        let name = self
            .name
            .ok_or_else(|| validation_error("name is required"))
            .and_then(|name| {
                NonEmptyText::new(name).map_err(|_| validation_error("name cannot be empty"))
            })?;

        Ok(DiseaseCard {
            name,
            symptoms: self.symptoms,
            causes: self.causes,
            treatments: self.treatments,
            prevalence: self.prevalence,
            resources: self.resources,
        })
    }
}

fn validation_error(message: &str) -> CatalogError {
    CatalogError::Validation {
        kind: RecordKind::DiseaseCard,
        message: message.to_owned(),
    }
}
