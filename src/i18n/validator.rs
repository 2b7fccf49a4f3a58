//! Table consistency validation.
//!
//! Every language is checked against the first (canonical) language of the
//! table: missing or extra leaf paths, and templates whose `{n}` placeholders
//! differ from the canonical template. Mismatches are reported, never fixed;
//! the resolver degrades gracefully on them at lookup time.

use crate::i18n::table::{is_leaf, kind_of, node_to_string, TranslationTable};
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Structural problems that make a language unusable
    pub errors: Vec<String>,

    /// Inconsistencies between languages
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for cross-language table consistency.
pub struct TableValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TableValidator {
    /// Compare every language in `table` with the first one.
    pub fn validate(table: &TranslationTable) -> ValidationReport {
        let mut report = ValidationReport::new();

        let mut languages = table.iter();
        let Some((canonical_id, canonical)) = languages.next() else {
            return report;
        };

        if is_leaf(canonical) {
            report.errors.push(format!(
                "Language '{}' must be an object, found {}",
                canonical_id,
                kind_of(canonical)
            ));
        }
        let canonical_leaves = Self::leaves(canonical);

        for (language, root) in languages {
            if is_leaf(root) {
                report.errors.push(format!(
                    "Language '{}' must be an object, found {}",
                    language,
                    kind_of(root)
                ));
                continue;
            }
            let leaves = Self::leaves(root);

            for (path, template) in &canonical_leaves {
                match leaves.get(path) {
                    None => report.warnings.push(format!(
                        "Missing path '{}' in '{}' (present in '{}')",
                        path, language, canonical_id
                    )),
                    Some(translated) => {
                        let expected = Self::extract_placeholders(template);
                        let found = Self::extract_placeholders(translated);
                        if expected != found {
                            report.warnings.push(format!(
                                "Placeholder mismatch at '{}': '{}' has {:?}, '{}' has {:?}",
                                path, canonical_id, expected, language, found
                            ));
                        }
                    }
                }
            }

            for path in leaves.keys() {
                if !canonical_leaves.contains_key(path) {
                    report.warnings.push(format!(
                        "Extra path '{}' in '{}' (absent from '{}')",
                        path, language, canonical_id
                    ));
                }
            }
        }

        report
    }

    /// Flatten a language tree into dotted path -> leaf text.
    fn leaves(root: &Value) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        Self::collect_leaves(root, None, &mut out);
        out
    }

    fn collect_leaves(node: &Value, prefix: Option<&str>, out: &mut BTreeMap<String, String>) {
        let mut visit = |key: &str, value: &Value| {
            let path = match prefix {
                Some(prefix) => format!("{}.{}", prefix, key),
                None => key.to_string(),
            };
            if is_leaf(value) {
                out.insert(path, node_to_string(value));
            } else {
                Self::collect_leaves(value, Some(&path), out);
            }
        };

        match node {
            Value::Object(map) => map.iter().for_each(|(k, v)| visit(k, v)),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .for_each(|(i, v)| visit(&i.to_string(), v)),
            _ => {}
        }
    }

    /// Distinct placeholder indices used by a template.
    fn extract_placeholders(text: &str) -> BTreeSet<usize> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{(\d+)\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).and_then(|m| m.as_str().parse().ok()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: Value) -> TranslationTable {
        TranslationTable::from_value(value).unwrap()
    }

    // ==================== Placeholder Extraction Tests ====================

    #[test]
    fn test_extract_placeholders() {
        let found = TableValidator::extract_placeholders("{0} and {1}, again {0}");
        assert_eq!(found, BTreeSet::from([0, 1]));
    }

    #[test]
    fn test_extract_placeholders_ignores_named_tokens() {
        assert!(TableValidator::extract_placeholders("{name} {x1}").is_empty());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_validate_consistent_table() {
        let report = TableValidator::validate(&table(json!({
            "en": { "greet": "Hello {0}", "menu": { "open": "Open" } },
            "fr": { "greet": "Bonjour {0}", "menu": { "open": "Ouvrir" } }
        })));
        assert!(report.is_clean());
    }

    #[test]
    fn test_validate_empty_table() {
        assert!(TableValidator::validate(&table(json!({}))).is_clean());
    }

    #[test]
    fn test_validate_missing_path() {
        let report = TableValidator::validate(&table(json!({
            "en": { "greet": "Hello", "bye": "Bye" },
            "fr": { "greet": "Bonjour" }
        })));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Missing path 'bye' in 'fr'"));
    }

    #[test]
    fn test_validate_extra_path() {
        let report = TableValidator::validate(&table(json!({
            "en": { "greet": "Hello" },
            "fr": { "greet": "Bonjour", "extra": "En plus" }
        })));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Extra path 'extra' in 'fr'"));
    }

    #[test]
    fn test_validate_placeholder_mismatch() {
        let report = TableValidator::validate(&table(json!({
            "en": { "pair": "{0} and {1}" },
            "fr": { "pair": "{0} et" }
        })));
        assert!(report.has_warnings());
        assert!(report.warnings[0].contains("Placeholder mismatch at 'pair'"));
    }

    #[test]
    fn test_validate_non_object_language_is_error() {
        let report = TableValidator::validate(&table(json!({
            "en": { "greet": "Hello" },
            "fr": "Bonjour"
        })));
        assert!(report.has_errors());
        assert!(report.errors[0].contains("'fr' must be an object"));
    }

    #[test]
    fn test_validation_report_with_error() {
        let mut report = ValidationReport::new();
        report.errors.push("Test error".to_string());

        assert!(!report.is_clean());
        assert!(report.has_errors());
        assert!(!report.has_warnings());
    }
}
