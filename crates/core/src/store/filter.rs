use super::Document;
use crate::{StoreError, StoreResult};
use regex::{Regex, RegexBuilder};
use serde_json::Value;

/// Store-level match predicate.
///
/// Backends evaluate a filter with their own native matching. [`Filter::compile`] gives the
/// in-process semantics used by the in-memory backend: the needle is an escaped literal
/// matched with Unicode case folding, the same rule MongoDB applies to `$regex` with the `i`
/// option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// `field` contains `needle` as a substring, ignoring letter case.
    ///
    /// For a text field the field value is tested; for a list field the filter matches when
    /// at least one text entry contains the needle. Any other value never matches.
    ContainsIgnoreCase { field: String, needle: String },
    /// Matches when at least one of the inner filters matches.
    AnyOf(Vec<Filter>),
}

impl Filter {
    pub fn contains_ignore_case(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::ContainsIgnoreCase {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Builds the matcher for this filter once, so it can be applied to many documents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if a needle is too large to compile.
    pub fn compile(&self) -> StoreResult<FilterMatcher> {
        match self {
            Filter::ContainsIgnoreCase { field, needle } => {
                let pattern = RegexBuilder::new(&regex::escape(needle))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| StoreError::Backend(format!("invalid search term: {}", e)))?;
                Ok(FilterMatcher::Contains {
                    field: field.clone(),
                    pattern,
                })
            }
            Filter::AnyOf(filters) => filters
                .iter()
                .map(Filter::compile)
                .collect::<StoreResult<Vec<_>>>()
                .map(FilterMatcher::AnyOf),
        }
    }
}

/// A compiled [`Filter`].
#[derive(Clone, Debug)]
pub enum FilterMatcher {
    Contains { field: String, pattern: Regex },
    AnyOf(Vec<FilterMatcher>),
}

impl FilterMatcher {
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            FilterMatcher::Contains { field, pattern } => match document.get(field) {
                Some(Value::String(text)) => pattern.is_match(text),
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|text| pattern.is_match(text)),
                _ => false,
            },
            FilterMatcher::AnyOf(matchers) => matchers.iter().any(|m| m.matches(document)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matches(filter: &Filter, value: Value) -> bool {
        let document = value.as_object().cloned().expect("test document must be an object");
        filter
            .compile()
            .expect("filter should compile")
            .matches(&document)
    }

    #[test]
    fn test_contains_matches_anywhere_in_word() {
        let filter = Filter::contains_ignore_case("name", "art");
        assert!(matches(&filter, json!({"name": "Heart Disease"})));
    }

    #[test]
    fn test_contains_ignores_case_on_both_sides() {
        let filter = Filter::contains_ignore_case("name", "ASTHMA");
        assert!(matches(&filter, json!({"name": "asthma"})));
        assert!(matches(&filter, json!({"name": "Severe AsThMa"})));
    }

    #[test]
    fn test_contains_folds_final_sigma() {
        let document = json!({"location": "ΑΘΗΝΑΣ"});

        for term in ["Σ", "σ", "ς", "αθηνας", "ΑΘΗΝΑς"] {
            let filter = Filter::contains_ignore_case("location", term);
            assert!(matches(&filter, document.clone()), "term {:?} should match", term);
        }
    }

    #[test]
    fn test_contains_treats_metacharacters_literally() {
        let filter = Filter::contains_ignore_case("name", "(a.)");
        assert!(matches(&filter, json!({"name": "HIV (A.) test"})));
        assert!(!matches(&filter, json!({"name": "HIV (ab) test"})));
    }

    #[test]
    fn test_contains_does_not_trim_needle() {
        let filter = Filter::contains_ignore_case("name", " asthma");
        assert!(!matches(&filter, json!({"name": "Asthma"})));
        assert!(matches(&filter, json!({"name": "Severe asthma"})));
    }

    #[test]
    fn test_contains_matches_any_list_entry() {
        let filter = Filter::contains_ignore_case("diseases", "diab");
        assert!(matches(&filter, json!({"diseases": ["Asthma", "Diabetes"]})));
        assert!(!matches(&filter, json!({"diseases": ["Asthma"]})));
        assert!(!matches(&filter, json!({"diseases": []})));
    }

    #[test]
    fn test_missing_or_non_text_field_never_matches() {
        let filter = Filter::contains_ignore_case("location", "1");
        assert!(!matches(&filter, json!({})));
        assert!(!matches(&filter, json!({"location": 1})));
        assert!(!matches(&filter, json!({"location": null})));
    }

    #[test]
    fn test_any_of_is_logical_or() {
        let filter = Filter::AnyOf(vec![
            Filter::contains_ignore_case("name", "toronto"),
            Filter::contains_ignore_case("location", "toronto"),
        ]);
        assert!(matches(&filter, json!({"name": "Clinic", "location": "Toronto"})));
        assert!(matches(&filter, json!({"name": "Toronto Clinic", "location": "x"})));
        assert!(!matches(&filter, json!({"name": "Clinic", "location": "Berlin"})));
    }

    #[test]
    fn test_sub_predicates_do_not_combine_fields() {
        // "clinic toronto" only appears if name and location were concatenated.
        let filter = Filter::AnyOf(vec![
            Filter::contains_ignore_case("name", "clinic toronto"),
            Filter::contains_ignore_case("location", "clinic toronto"),
        ]);
        assert!(!matches(&filter, json!({"name": "Clinic", "location": "Toronto"})));
    }
}
