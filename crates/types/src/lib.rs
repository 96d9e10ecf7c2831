//! Validated text shared by the catalog crates.
//!
//! Record names and the MongoDB database name pass through [`NonEmptyText`]; a blank value is
//! rejected where it enters the system instead of being stored and matched against later.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    #[error("value is blank")]
    Empty,
}

/// Text that is non-blank after trimming.
///
/// Surrounding whitespace is dropped on construction, so `" Asthma "` and `"Asthma"` are the
/// same name. Ordered and hashable so names can key sets and sorted listings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// # Errors
    ///
    /// [`TextError::Empty`] if nothing is left after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            trimmed => Ok(Self(trimmed.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hands the text back to wire types that carry plain `String`s.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  Asthma \n").expect("should accept padded text");
        assert_eq!(text.as_str(), "Asthma");
        assert_eq!(text, "Asthma".parse().unwrap());
    }

    #[test]
    fn test_new_rejects_blank_input() {
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new("   \t"), Err(TextError::Empty));
    }

    #[test]
    fn test_deserialize_trims_and_rejects_blank() {
        let text: NonEmptyText = serde_json::from_str("\" Lupus \"").unwrap();
        assert_eq!(text.as_str(), "Lupus");

        let result: Result<NonEmptyText, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let text = NonEmptyText::new("Lupus").unwrap();
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"Lupus\"");
    }

    #[test]
    fn test_sorts_by_text() {
        let mut names: Vec<NonEmptyText> = ["Migraine", "Anemia", "Lupus"]
            .into_iter()
            .map(|n| NonEmptyText::new(n).unwrap())
            .collect();
        names.sort();

        let sorted: Vec<&str> = names.iter().map(NonEmptyText::as_str).collect();
        assert_eq!(sorted, vec!["Anemia", "Lupus", "Migraine"]);
    }
}
