//! Catalog record model.
//!
//! Two record kinds are stored, each in its own collection:
//!
//! - [`DiseaseCard`]: a disease or condition with symptoms, causes and treatments.
//! - [`ProfessionalCenter`]: a treatment or resource location, linked to diseases informally
//!   by disease name.
//!
//! Records are built from their `New*` input shapes through `validate()`, which enforces the
//! presence of required fields. A typed record therefore always satisfies the required-field
//! rules, and the store never sees a partial record.

mod center;
mod disease;

pub use center::{ContactInfo, ContactKey, NewProfessionalCenter, ProfessionalCenter};
pub use disease::{DiseaseCard, NewDiseaseCard};

use crate::constants::{DISEASE_CARD_COLLECTION, PROFESSIONAL_CENTER_COLLECTION};
use crate::{CatalogError, CatalogResult};
use catalog_id::RecordId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The structural type of a catalog record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    DiseaseCard,
    ProfessionalCenter,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::DiseaseCard, RecordKind::ProfessionalCenter];

    /// Name of the store collection holding records of this kind.
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::DiseaseCard => DISEASE_CARD_COLLECTION,
            RecordKind::ProfessionalCenter => PROFESSIONAL_CENTER_COLLECTION,
        }
    }

    /// Fields matched by a free-text search term.
    ///
    /// Disease Cards are searched by name only; Professional Centers by name, location, and
    /// any entry of their disease list.
    pub fn searchable_fields(self) -> &'static [&'static str] {
        match self {
            RecordKind::DiseaseCard => &["name"],
            RecordKind::ProfessionalCenter => &["name", "location", "diseases"],
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for RecordKind {
    type Err = CatalogError;

    /// Accepts the collection name or the API route segment for each kind.
    fn from_str(s: &str) -> CatalogResult<Self> {
        match s {
            "disease_card" | "diseases" => Ok(RecordKind::DiseaseCard),
            "professional_center" | "professional_centers" => Ok(RecordKind::ProfessionalCenter),
            other => Err(CatalogError::InvalidKind(other.to_owned())),
        }
    }
}

/// A typed record that lives in one store collection.
pub trait CatalogRecord: Serialize + DeserializeOwned + Send + Sync {
    const KIND: RecordKind;

    /// Display name, used in logs and bulk-load reports.
    fn name(&self) -> &str;
}

/// A record as returned to callers: its text identifier plus all business fields.
///
/// Serializes as a single flat object with `id` alongside the record's own fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: T,
}

/// Deserializes an explicit `null` as the type's default, so list fields are never absent.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
