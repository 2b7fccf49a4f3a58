//! Registry metrics.
//!
//! Counters for cache behaviour, resolutions and language switches. Each
//! [`Registry`](crate::i18n::Registry) owns one instance.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Atomic counters for a single registry.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// `translate` calls answered by an existing state
    cache_hits: AtomicUsize,

    /// `translate` calls that created a new state
    cache_misses: AtomicUsize,

    /// Resolver invocations that produced a string
    resolutions: AtomicUsize,

    /// Path segments skipped because they were not found
    missing_segments: AtomicUsize,

    /// Resolver invocations that failed (unknown language)
    resolution_failures: AtomicUsize,

    /// Language switches that changed the active language
    language_switches: AtomicUsize,

    /// Cached states rewritten by language switches
    states_reresolved: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful resolution and how many segments it skipped.
    pub fn record_resolution(&self, missing_segments: usize) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        if missing_segments > 0 {
            self.missing_segments
                .fetch_add(missing_segments, Ordering::Relaxed);
        }
    }

    pub fn record_resolution_failure(&self) {
        self.resolution_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_language_switch(&self) {
        self.language_switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_reresolved(&self) {
        self.states_reresolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    pub fn missing_segments(&self) -> usize {
        self.missing_segments.load(Ordering::Relaxed)
    }

    pub fn resolution_failures(&self) -> usize {
        self.resolution_failures.load(Ordering::Relaxed)
    }

    pub fn language_switches(&self) -> usize {
        self.language_switches.load(Ordering::Relaxed)
    }

    pub fn states_reresolved(&self) -> usize {
        self.states_reresolved.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            resolutions: self.resolutions(),
            missing_segments: self.missing_segments(),
            resolution_failures: self.resolution_failures(),
            language_switches: self.language_switches(),
            states_reresolved: self.states_reresolved(),
        }
    }
}

/// Snapshot of registry statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub resolutions: usize,
    pub missing_segments: usize,
    pub resolution_failures: usize,
    pub language_switches: usize,
    pub states_reresolved: usize,
}
