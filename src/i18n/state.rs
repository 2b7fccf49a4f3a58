//! Translation states and the cache that owns them.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// One cached translation.
///
/// Handed out as `Arc<TranslationState>`; the same allocation is returned for
/// every request with the same cache key, and a language switch rewrites
/// `value` in place so every holder sees the new text.
#[derive(Debug)]
pub struct TranslationState {
    path: String,
    args: Vec<String>,
    value: RwLock<String>,
}

impl TranslationState {
    pub(crate) fn new(path: String, args: Vec<String>, value: String) -> Self {
        Self {
            path,
            args,
            value: RwLock::new(value),
        }
    }

    /// The current resolved text.
    pub fn value(&self) -> String {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Arguments captured when the state was created.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Lookup path captured when the state was created.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn set_value(&self, value: String) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl fmt::Display for TranslationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value.read().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Cache key: the path followed by the dot-joined arguments.
///
/// Arguments containing `.` can alias each other (`["a.b"]` and `["a", "b"]`
/// share a key); the first state created for the key wins.
pub fn cache_key(path: &str, args: &[String]) -> String {
    format!("{}.{}", path, args.join("."))
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: Vec<Arc<TranslationState>>,
    index: HashMap<String, usize>,
}

/// Insertion-ordered, never-shrinking map from cache key to state.
#[derive(Debug, Default)]
pub struct StateCache {
    inner: Mutex<CacheInner>,
}

/// Whether [`StateCache::get_or_try_insert_with`] found or created the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLookup {
    Hit,
    Miss,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the state stored under `key`, creating it with `create` if absent.
    ///
    /// If `create` fails nothing is inserted.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: String,
        create: impl FnOnce() -> Result<TranslationState, E>,
    ) -> Result<(Arc<TranslationState>, CacheLookup), E> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(&slot) = inner.index.get(&key) {
            return Ok((Arc::clone(&inner.entries[slot]), CacheLookup::Hit));
        }

        let state = Arc::new(create()?);
        let slot = inner.entries.len();
        inner.entries.push(Arc::clone(&state));
        inner.index.insert(key, slot);
        Ok((state, CacheLookup::Miss))
    }

    pub fn get(&self, key: &str) -> Option<Arc<TranslationState>> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner
            .index
            .get(key)
            .map(|&slot| Arc::clone(&inner.entries[slot]))
    }

    /// All states in insertion order.
    pub fn snapshot(&self) -> Vec<Arc<TranslationState>> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
