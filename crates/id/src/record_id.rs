//! Implementation of the text record identifier.

use crate::{IdError, IdResult};
use std::{fmt, str::FromStr};

/// Maximum accepted identifier length.
const MAX_ID_LEN: usize = 128;

/// Store-assigned record identifier in text form.
///
/// This wrapper guarantees that once constructed, the contained identifier satisfies the
/// catalog's text form (non-empty, bounded length, `[A-Za-z0-9_-]` only). It is the only
/// identifier type that leaves the core; store backends convert their native identifiers into
/// it when documents are read back.
///
/// # Construction
/// - [`RecordId::generate`] allocates a fresh identifier (used by stores without native ids).
/// - [`RecordId::parse`] validates an identifier produced by a store or supplied by a caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a new identifier: a version 4 UUID in simple (32 lowercase hex) form.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Validates and wraps an identifier string.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is empty, too long, or contains characters
    /// outside `[A-Za-z0-9_-]`.
    pub fn parse(input: &str) -> IdResult<Self> {
        if Self::is_valid(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(IdError::InvalidInput(format!(
            "record id must be 1-{} characters of [A-Za-z0-9_-], got: '{}'",
            MAX_ID_LEN, input
        )))
    }

    /// Returns true if `input` is a syntactically valid record identifier.
    pub fn is_valid(input: &str) -> bool {
        !input.is_empty()
            && input.len() <= MAX_ID_LEN
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'-' | b'_'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_produces_simple_uuid() {
        let id = RecordId::generate();

        assert_eq!(id.as_str().len(), 32);
        assert!(id
            .as_str()
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    #[test]
    fn test_generate_is_unique() {
        let ids: HashSet<RecordId> = (0..500).map(|_| RecordId::generate()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_parse_accepts_object_id_hex() {
        let id = RecordId::parse("65a1f0c2e4b0a1b2c3d4e5f6").expect("object id should parse");
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_parse_rejects_empty() {
        let result = RecordId::parse("");

        match result {
            Err(IdError::InvalidInput(msg)) => assert!(msg.contains("record id")),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_parse_rejects_whitespace_and_punctuation() {
        assert!(RecordId::parse("abc def").is_err());
        assert!(RecordId::parse("abc/def").is_err());
        assert!(RecordId::parse("{\"$oid\":1}").is_err());
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = "a".repeat(MAX_ID_LEN + 1);
        assert!(RecordId::parse(&long).is_err());
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let id = RecordId::parse("abc123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");

        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
