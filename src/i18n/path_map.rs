//! Path map: a mirror of one language's table whose leaves are their own
//! dotted paths.
//!
//! Consumers use it for path discovery (`map.get("menu.file.open")` returns
//! `Some("menu.file.open")` only when that leaf exists). The resolver never
//! consults it.

use crate::i18n::table::is_leaf;
use serde::Serialize;
use serde_json::{Map, Value};

/// Structure congruent to a language table with path strings at the leaves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PathMap {
    root: Value,
}

impl PathMap {
    /// Walk a single language's table and mirror it.
    ///
    /// An empty or non-structural table yields an empty map.
    pub fn generate(table: &Value) -> Self {
        let root = match table {
            Value::Object(_) | Value::Array(_) => mirror(table, None),
            _ => Value::Object(Map::new()),
        };
        Self { root }
    }

    /// Look up the leaf at a dotted path, returning the path string stored there.
    pub fn get(&self, path: &str) -> Option<&str> {
        let mut node = &self.root;
        for segment in path.split('.') {
            node = child(node, segment)?;
        }
        node.as_str()
    }

    /// Every leaf path, depth first in document order.
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// The mirrored tree as JSON.
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}.{}", prefix, key),
        None => key.to_string(),
    }
}

fn mirror(node: &Value, prefix: Option<&str>) -> Value {
    match node {
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, value)| {
                    let keyed_path = join(prefix, key);
                    (key.clone(), mirror_entry(value, keyed_path))
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(index, value)| mirror_entry(value, join(prefix, &index.to_string())))
                .collect(),
        ),
        _ => Value::String(prefix.unwrap_or_default().to_string()),
    }
}

fn mirror_entry(value: &Value, keyed_path: String) -> Value {
    if is_leaf(value) {
        Value::String(keyed_path)
    } else {
        mirror(value, Some(&keyed_path))
    }
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn collect(node: &Value, out: &mut Vec<String>) {
    match node {
        Value::Object(map) => map.values().for_each(|v| collect(v, out)),
        Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
        Value::String(path) => out.push(path.clone()),
        _ => {}
    }
}
