use super::{null_as_default, CatalogRecord, RecordKind};
use crate::{CatalogError, CatalogResult};
use catalog_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A treatment or resource location.
///
/// `diseases` names the Disease Cards this center addresses. The link is by name only and is
/// not checked against stored Disease Cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalCenter {
    pub name: NonEmptyText,
    pub location: String,
    pub map_reference: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub diseases: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub hours_of_operation: Option<String>,
}

impl CatalogRecord for ProfessionalCenter {
    const KIND: RecordKind = RecordKind::ProfessionalCenter;

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Recognised `contact_info` keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactKey {
    Phone,
    Email,
    Website,
}

impl ContactKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactKey::Phone => "phone",
            ContactKey::Email => "email",
            ContactKey::Website => "website",
        }
    }
}

/// Contact details for a center.
///
/// Known keys are typed; any other keys are kept verbatim in `additional` and serialized back
/// alongside the known ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(flatten)]
    pub additional: BTreeMap<String, String>,
}

impl ContactInfo {
    pub fn get(&self, key: ContactKey) -> Option<&str> {
        match key {
            ContactKey::Phone => self.phone.as_deref(),
            ContactKey::Email => self.email.as_deref(),
            ContactKey::Website => self.website.as_deref(),
        }
    }

    /// Splits a flat key/value map into known keys and the additional bucket.
    pub fn from_map(mut map: BTreeMap<String, String>) -> Self {
        Self {
            phone: map.remove(ContactKey::Phone.as_str()),
            email: map.remove(ContactKey::Email.as_str()),
            website: map.remove(ContactKey::Website.as_str()),
            additional: map,
        }
    }

    /// All entries as a flat key/value map.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = self.additional.clone();
        for key in [ContactKey::Phone, ContactKey::Email, ContactKey::Website] {
            if let Some(value) = self.get(key) {
                map.insert(key.as_str().to_owned(), value.to_owned());
            }
        }
        map
    }
}

/// Professional Center input as received from callers or seed files.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NewProfessionalCenter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub map_reference: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub diseases: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub hours_of_operation: Option<String>,
}

impl NewProfessionalCenter {
    /// Checks required fields and produces a storable [`ProfessionalCenter`].
    ///
    /// `name` must be present and non-blank; `location` and `map_reference` must be present.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] naming the first missing field.
    pub fn validate(self) -> CatalogResult<ProfessionalCenter> {
        let name = self
            .name
            .ok_or_else(|| validation_error("name is required"))
            .and_then(|name| {
                NonEmptyText::new(name).map_err(|_| validation_error("name cannot be empty"))
            })?;
        let location = self
            .location
            .ok_or_else(|| validation_error("location is required"))?;
        let map_reference = self
            .map_reference
            .ok_or_else(|| validation_error("map_reference is required"))?;

        Ok(ProfessionalCenter {
            name,
            location,
            map_reference,
            diseases: self.diseases,
            contact_info: self.contact_info,
            hours_of_operation: self.hours_of_operation,
        })
    }
}

fn validation_error(message: &str) -> CatalogError {
    CatalogError::Validation {
        kind: RecordKind::ProfessionalCenter,
        message: message.to_owned(),
    }
}
