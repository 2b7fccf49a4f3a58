//! Resolver: dotted path + positional arguments -> formatted string.
//!
//! # Lookup rules
//!
//! - The path is split on `.` and walked from the language's sub-table.
//! - A segment that does not exist on the current node is skipped and the
//!   walk stays where it is. A malformed path therefore yields the string form
//!   of an intermediate node instead of an error.
//! - Only an unknown language is an error.
//!
//! # Placeholders
//!
//! For each argument index `i` in ascending order, the first occurrence of
//! `{i}` in the current text is replaced with the argument. Later occurrences
//! of the same index stay verbatim, as do placeholders with no argument.

use crate::i18n::error::{Result, TranslationError};
use crate::i18n::table::{node_to_string, TranslationTable};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// One positional argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arg {
    /// A single value, already stringified.
    Value(String),
    /// A prebuilt argument list. Passed alone, it becomes the full argument list.
    List(Vec<String>),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(value) => f.write_str(value),
            Arg::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Value(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Value(value.to_string())
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Value(value.clone())
    }
}

macro_rules! arg_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Value(value.to_string())
                }
            }
        )*
    };
}

arg_from_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char);

impl<T: ToString> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::List(items.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for Arg {
    fn from(items: &[T]) -> Self {
        Arg::List(items.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for Arg {
    fn from(items: [T; N]) -> Self {
        Arg::List(items.iter().map(ToString::to_string).collect())
    }
}

/// Flatten a lone list argument, otherwise stringify each argument.
pub fn normalize_args(args: &[Arg]) -> Vec<String> {
    match args {
        [Arg::List(items)] => items.clone(),
        _ => args.iter().map(ToString::to_string).collect(),
    }
}

/// Outcome of looking up one path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<'a> {
    Found(&'a Value),
    Missing,
}

/// Look up one segment on a node.
pub fn step<'a>(node: &'a Value, segment: &str) -> Step<'a> {
    let found = match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    };
    found.map_or(Step::Missing, Step::Found)
}

/// Result of a resolution, with the number of path segments that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub value: String,
    pub missing_segments: usize,
}

/// Resolves paths against a borrowed table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a TranslationTable,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a TranslationTable) -> Self {
        Self { table }
    }

    /// Resolve `path` in `language` and substitute `args`.
    ///
    /// # Errors
    /// [`TranslationError::UnknownLanguage`] when `language` is not a table key.
    pub fn resolve(&self, language: &str, path: &str, args: &[String]) -> Result<Resolution> {
        let mut node = self
            .table
            .language(language)
            .ok_or_else(|| TranslationError::UnknownLanguage(language.to_string()))?;

        let mut missing_segments = 0;
        for segment in path.split('.') {
            match step(node, segment) {
                Step::Found(next) => node = next,
                Step::Missing => {
                    debug!(language, path, segment, "Path segment not found, staying on current node");
                    missing_segments += 1;
                }
            }
        }

        let template = node_to_string(node);
        Ok(Resolution {
            value: substitute(&template, args),
            missing_segments,
        })
    }
}

/// Replace the first `{i}` for each argument index, in ascending order.
pub fn substitute(template: &str, args: &[String]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |text, (index, arg)| {
            text.replacen(&format!("{{{}}}", index), arg, 1)
        })
}
