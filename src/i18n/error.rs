//! Error kinds raised by the translation registry.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from registry operations.
///
/// All variants are raised synchronously to the immediate caller; nothing in
/// the registry catches or retries them.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The registry was requested before it was installed into the context.
    #[error("translations are not registered: install a registry before requesting it")]
    NotRegistered,

    /// A registry was installed into a context that already holds one.
    #[error("translations are already registered in this context")]
    AlreadyRegistered,

    /// The supplied table has no language keys.
    #[error("no language keys found, table must be {{ <language>: {{ ... }} }}")]
    NoLanguagesProvided,

    /// Resolving against, or switching to, a language absent from the table.
    #[error("language '{0}' doesn't exist in the translation table")]
    UnknownLanguage(String),

    /// The table document does not have the expected shape.
    #[error("invalid translation table: {0}")]
    InvalidTable(String),

    /// The table file could not be read.
    #[error("failed to read translation table {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_message_names_language() {
        let err = TranslationError::UnknownLanguage("de".to_string());
        assert!(err.to_string().contains("'de'"));
    }

    #[test]
    fn test_no_languages_message_shows_expected_shape() {
        let msg = TranslationError::NoLanguagesProvided.to_string();
        assert!(msg.contains("{ <language>: { ... } }"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = TranslationError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("missing.json"));
        assert!(err.source().is_some());
    }
}
