//! Cache statistics and metrics tracking
//!
//! Counters are plain atomics so recording never contends with the cache's
//! own lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time statistics for a [`super::RecencyCache`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,

    /// Fixed capacity
    pub capacity: usize,

    /// Lookups answered from the cache, including callers that waited on
    /// another thread's construction
    pub hits: u64,

    /// Lookups that ran the factory
    pub misses: u64,

    /// Entries inserted after a successful factory call
    pub inserts: u64,

    /// Entries removed to respect the capacity
    pub evictions: u64,

    /// Factory calls that returned an error
    pub factory_failures: u64,
}

impl CacheStats {
    /// Calculate hit rate (hits / total accesses)
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate miss rate (misses / total accesses)
    pub fn miss_rate(&self) -> f64 {
        if self.total_accesses() == 0 {
            0.0
        } else {
            1.0 - self.hit_rate()
        }
    }

    /// Calculate fill percentage (size / capacity)
    pub fn fill_percentage(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.size as f64 / self.capacity as f64
        }
    }

    /// Total number of access operations (hits + misses)
    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Lock-free metrics collector for cache operations
#[derive(Debug, Default)]
pub(crate) struct MetricsCollector {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
    factory_failures: AtomicU64,
}

impl MetricsCollector {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_factory_failure(&self) {
        self.factory_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Build a statistics snapshot for the given size and capacity
    pub(crate) fn snapshot(&self, size: usize, capacity: usize) -> CacheStats {
        CacheStats {
            size,
            capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            factory_failures: self.factory_failures.load(Ordering::Relaxed),
        }
    }
}
