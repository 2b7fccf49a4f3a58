//! Translation registry and the context it is published through.
//!
//! A [`Registry`] owns the table, the path map, the active language and the
//! state cache. Consumers reach it through a [`TranslationContext`]: the host
//! installs a registry once and every later `get()` hands back the same
//! `Arc<Registry>`. [`TranslationContext::global`] is a process-wide context
//! for hosts that have nowhere else to keep one.

use crate::i18n::error::{Result, TranslationError};
use crate::i18n::metrics::TranslationMetrics;
use crate::i18n::path_map::PathMap;
use crate::i18n::resolver::{normalize_args, Arg, Resolver};
use crate::i18n::state::{cache_key, CacheLookup, StateCache, TranslationState};
use crate::i18n::table::TranslationTable;
use crate::i18n::validator::TableValidator;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Behaviour switches for a registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Reject an unknown target language in `change_language` before touching
    /// any state. When off, the active language is switched first and the
    /// error only surfaces while re-resolving the first cached state.
    pub strict_language_switch: bool,
}

/// Runtime translation registry.
#[derive(Debug)]
pub struct Registry {
    table: TranslationTable,
    path_map: PathMap,
    languages: Vec<String>,
    language: RwLock<String>,
    cache: StateCache,
    options: RegistryOptions,
    metrics: TranslationMetrics,
}

impl Registry {
    /// Build a registry with default options.
    ///
    /// # Errors
    /// [`TranslationError::NoLanguagesProvided`] when `table` has no languages.
    pub fn new(default_language: impl Into<String>, table: TranslationTable) -> Result<Self> {
        Self::with_options(default_language, table, RegistryOptions::default())
    }

    pub fn with_options(
        default_language: impl Into<String>,
        table: TranslationTable,
        options: RegistryOptions,
    ) -> Result<Self> {
        let default_language = default_language.into();

        let path_map = match table.first_language() {
            Some((_, first)) => PathMap::generate(first),
            None => return Err(TranslationError::NoLanguagesProvided),
        };

        if !table.contains_language(&default_language) {
            warn!(
                language = %default_language,
                "Default language is not in the translation table; lookups will fail until a known language is selected"
            );
        }

        let report = TableValidator::validate(&table);
        for error in &report.errors {
            warn!("Translation table error: {}", error);
        }
        for warning in &report.warnings {
            warn!("Translation table warning: {}", warning);
        }

        let languages = table.languages();
        info!(
            default = %default_language,
            languages = ?languages,
            paths = path_map.paths().len(),
            "Translation registry created"
        );

        Ok(Self {
            table,
            path_map,
            languages,
            language: RwLock::new(default_language),
            cache: StateCache::new(),
            options,
            metrics: TranslationMetrics::new(),
        })
    }

    /// Translate `path` in the active language, memoized per (path, args).
    ///
    /// Repeated calls with the same key return the same `Arc`. The returned
    /// state is rewritten in place by [`Registry::change_language`].
    ///
    /// # Errors
    /// [`TranslationError::UnknownLanguage`] when a new state must be created
    /// and the active language is not in the table.
    pub fn translate(&self, path: &str, args: &[Arg]) -> Result<Arc<TranslationState>> {
        let args = normalize_args(args);
        let key = cache_key(path, &args);

        let (state, lookup) = self.cache.get_or_try_insert_with(key, || {
            let language = self.language();
            let value = self.resolve(&language, path, &args)?;
            debug!(path, language = %language, "Caching new translation state");
            Ok::<_, TranslationError>(TranslationState::new(path.to_string(), args.clone(), value))
        })?;

        match lookup {
            CacheLookup::Hit => self.metrics.record_cache_hit(),
            CacheLookup::Miss => self.metrics.record_cache_miss(),
        }
        Ok(state)
    }

    /// Short alias for [`Registry::translate`].
    pub fn t(&self, path: &str, args: &[Arg]) -> Result<Arc<TranslationState>> {
        self.translate(path, args)
    }

    /// Resolve `path` in `language` without touching the cache.
    pub fn translate_from_language(&self, language: &str, path: &str, args: &[Arg]) -> Result<String> {
        self.resolve(language, path, &normalize_args(args))
    }

    /// Switch the active language and re-resolve every cached state in place.
    ///
    /// Switching to the active language is a no-op. States are re-resolved in
    /// insertion order; on failure the active language has already changed
    /// and only the states before the failing one carry the new text (unless
    /// [`RegistryOptions::strict_language_switch`] is set).
    pub fn change_language(&self, language: &str) -> Result<()> {
        let previous = {
            let mut active = self.language.write().unwrap_or_else(PoisonError::into_inner);
            if *active == language {
                return Ok(());
            }
            if self.options.strict_language_switch && !self.table.contains_language(language) {
                return Err(TranslationError::UnknownLanguage(language.to_string()));
            }
            std::mem::replace(&mut *active, language.to_string())
        };

        self.metrics.record_language_switch();
        let states = self.cache.snapshot();
        info!(
            from = %previous,
            to = language,
            cached = states.len(),
            "Changing language"
        );

        for state in states {
            let value = self.resolve(language, state.path(), state.args())?;
            state.set_value(value);
            self.metrics.record_state_reresolved();
        }
        Ok(())
    }

    /// The active language.
    pub fn language(&self) -> String {
        self.language
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Available languages in table order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Path map generated from the first language.
    pub fn path_map(&self) -> &PathMap {
        &self.path_map
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    /// Number of cached states.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    fn resolve(&self, language: &str, path: &str, args: &[String]) -> Result<String> {
        match Resolver::new(&self.table).resolve(language, path, args) {
            Ok(resolution) => {
                self.metrics.record_resolution(resolution.missing_segments);
                Ok(resolution.value)
            }
            Err(e) => {
                self.metrics.record_resolution_failure();
                Err(e)
            }
        }
    }
}

/// Publication point for a registry.
///
/// Holds at most one registry for its whole lifetime; installation is one-shot.
#[derive(Debug, Default)]
pub struct TranslationContext {
    slot: OnceLock<Arc<Registry>>,
}

static GLOBAL_CONTEXT: TranslationContext = TranslationContext::new();

impl TranslationContext {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// The process-wide context.
    pub fn global() -> &'static TranslationContext {
        &GLOBAL_CONTEXT
    }

    /// Create a registry and publish it.
    ///
    /// # Errors
    /// - [`TranslationError::AlreadyRegistered`] if this context already holds a registry
    /// - [`TranslationError::NoLanguagesProvided`] if `table` is empty
    pub fn install(
        &self,
        default_language: impl Into<String>,
        table: TranslationTable,
    ) -> Result<Arc<Registry>> {
        self.install_with_options(default_language, table, RegistryOptions::default())
    }

    pub fn install_with_options(
        &self,
        default_language: impl Into<String>,
        table: TranslationTable,
        options: RegistryOptions,
    ) -> Result<Arc<Registry>> {
        if self.is_registered() {
            return Err(TranslationError::AlreadyRegistered);
        }
        let registry = Registry::with_options(default_language, table, options)?;
        self.provide(Arc::new(registry))
    }

    /// Publish an already-built registry.
    pub fn provide(&self, registry: Arc<Registry>) -> Result<Arc<Registry>> {
        self.slot
            .set(Arc::clone(&registry))
            .map_err(|_| TranslationError::AlreadyRegistered)?;
        info!(language = %registry.language(), "Translations registered");
        Ok(registry)
    }

    /// Retrieve the published registry.
    ///
    /// # Errors
    /// [`TranslationError::NotRegistered`] before `install`/`provide` succeeded.
    pub fn get(&self) -> Result<Arc<Registry>> {
        self.slot
            .get()
            .cloned()
            .ok_or(TranslationError::NotRegistered)
    }

    pub fn is_registered(&self) -> bool {
        self.slot.get().is_some()
    }
}
