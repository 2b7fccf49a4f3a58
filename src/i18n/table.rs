//! Translation table: language id -> nested tree of template strings.
//!
//! The table keeps the document order of its language keys, so the first
//! language in the source JSON is the first entry of [`TranslationTable::languages`].

use crate::i18n::error::{Result, TranslationError};
use serde_json::{Map, Value};
use std::path::Path;

/// Nested table of localized templates keyed by language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTable {
    languages: Map<String, Value>,
}

impl TranslationTable {
    /// Build a table from a parsed JSON document.
    ///
    /// The root must be an object; anything else is rejected with
    /// [`TranslationError::InvalidTable`]. An empty object is accepted here and
    /// rejected later at registration.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(languages) => Ok(Self { languages }),
            other => Err(TranslationError::InvalidTable(format!(
                "root must be an object keyed by language, found {}",
                kind_of(&other)
            ))),
        }
    }

    /// Parse a table from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| TranslationError::InvalidTable(e.to_string()))?;
        Self::from_value(value)
    }

    /// Read and parse a table from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TranslationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Language ids in document order.
    pub fn languages(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }

    /// The sub-table for one language, if registered.
    pub fn language(&self, id: &str) -> Option<&Value> {
        self.languages.get(id)
    }

    /// The first language in document order, used as the canonical layout.
    pub fn first_language(&self) -> Option<(&str, &Value)> {
        self.languages.iter().next().map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains_language(&self, id: &str) -> bool {
        self.languages.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.languages.iter()
    }
}

/// Coerce a node to its string form.
///
/// Text leaves come back verbatim; scalars use their JSON spelling; objects
/// and arrays (reached when a lookup stops early) render as compact JSON.
pub fn node_to_string(node: &Value) -> String {
    match node {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a node is a terminal (non-structural) value.
pub fn is_leaf(node: &Value) -> bool {
    !matches!(node, Value::Object(_) | Value::Array(_))
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
