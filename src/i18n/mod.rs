//! Runtime translation registry.
//!
//! Resolves dotted paths against a nested table of localized templates,
//! memoizes one live [`TranslationState`] per (path, arguments) pair, and
//! rewrites every memoized state in place when the active language changes.
//!
//! # Architecture
//!
//! - `table`: the language -> nested template tree, loaded from JSON
//! - `path_map`: mirror of the first language whose leaves are their own paths
//! - `resolver`: path traversal and `{n}` placeholder substitution
//! - `state`: translation states and the cache that owns them
//! - `registry`: the registry, language switching, and the publication context
//! - `validator`: cross-language consistency checks run at registration
//! - `metrics`: per-registry counters
//!
//! # Example
//!
//! ```rust,ignore
//! use translation_registry::i18n::{TranslationContext, TranslationTable};
//! use translation_registry::t;
//!
//! let table = TranslationTable::from_json_str(r#"{
//!     "en": { "greet": "Hello {0}" },
//!     "fr": { "greet": "Bonjour {0}" }
//! }"#)?;
//! let registry = TranslationContext::global().install("en", table)?;
//!
//! let greeting = t!(registry, "greet", "Sam")?;
//! assert_eq!(greeting.value(), "Hello Sam");
//!
//! registry.change_language("fr")?;
//! assert_eq!(greeting.value(), "Bonjour Sam");
//! ```

mod error;
mod metrics;
mod path_map;
mod registry;
mod resolver;
mod state;
mod table;
mod validator;

pub use error::{Result, TranslationError};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use path_map::PathMap;
pub use registry::{Registry, RegistryOptions, TranslationContext};
pub use resolver::{normalize_args, substitute, Arg, Resolution, Resolver, Step};
pub use state::{cache_key, TranslationState};
pub use table::TranslationTable;
pub use validator::{TableValidator, ValidationReport};

/// Translate through a registry with inline arguments.
///
/// `t!(registry, "path", a, b)` is `registry.translate("path", &[Arg::from(a), Arg::from(b)])`.
#[macro_export]
macro_rules! t {
    ($registry:expr, $path:expr) => {
        $registry.translate($path, &[])
    };
    ($registry:expr, $path:expr, $($arg:expr),+ $(,)?) => {
        $registry.translate($path, &[$($crate::i18n::Arg::from($arg)),+])
    };
}
