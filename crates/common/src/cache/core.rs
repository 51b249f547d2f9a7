//! Thread-safe recency cache with factory-driven population
//!
//! [`RecencyCache`] pairs an arena LRU list with a value factory. Lookups
//! that hit promote the entry to the front; lookups that miss run the factory
//! once, insert the result at the front and evict the least recently used
//! entry when the capacity would otherwise be exceeded.
//!
//! Concurrent first-time lookups of the same key are coalesced: one caller
//! runs the factory while the others block on an in-flight marker and reuse
//! its result. The factory always runs outside the cache lock, so a slow
//! construction for one key does not stall lookups of other keys.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, warn};

use super::config::CacheConfig;
use super::error::{CacheError, CacheResult};
use super::stats::{CacheStats, MetricsCollector};
use crate::collections::LruCache;

/// Boxed value factory: builds the value for a key seen for the first time
pub type Factory<K, V, E> = Box<dyn Fn(&K) -> Result<V, E> + Send + Sync>;

/// Bounded, recency-ordered cache that builds missing values on demand
///
/// Values are handed out by `Clone`; store cheap handles such as `Arc<T>`
/// when the value itself is expensive to copy.
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
///
/// use patterncache_common::cache::RecencyCache;
///
/// let cache = RecencyCache::new(3, |key: &i32| Ok::<_, Infallible>(key.to_string())).unwrap();
/// assert_eq!(cache.get_or_add(42).unwrap(), "42");
/// assert_eq!(cache.count(), 1);
/// ```
pub struct RecencyCache<K, V, E>
where
    K: Eq + Hash,
{
    state: Mutex<CacheState<K, V>>,
    factory: Factory<K, V, E>,
    capacity: NonZeroUsize,
    metrics: MetricsCollector,
    track_metrics: bool,
}

struct CacheState<K, V>
where
    K: Eq + Hash,
{
    entries: LruCache<K, V>,
    in_flight: HashMap<Arc<K>, Arc<Flight<V>>>,
}

impl<K, V, E> RecencyCache<K, V, E>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when `capacity` is zero.
    pub fn new<F>(capacity: usize, factory: F) -> CacheResult<Self>
    where
        F: Fn(&K) -> Result<V, E> + Send + Sync + 'static,
    {
        Self::from_config(&CacheConfig::with_capacity(capacity), factory)
    }

    /// Create a cache from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when the configured capacity is
    /// zero.
    pub fn from_config<F>(config: &CacheConfig, factory: F) -> CacheResult<Self>
    where
        F: Fn(&K) -> Result<V, E> + Send + Sync + 'static,
    {
        config.validate()?;
        let capacity = NonZeroUsize::new(config.capacity).ok_or_else(|| {
            CacheError::InvalidArgument("cache capacity must be a positive integer".to_string())
        })?;

        Ok(Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                in_flight: HashMap::new(),
            }),
            factory: Box::new(factory),
            capacity,
            metrics: MetricsCollector::default(),
            track_metrics: config.track_metrics,
        })
    }

    /// Return the value for `key`, building it with the factory on first sight
    ///
    /// A hit moves the entry to the most-recently-used position without
    /// calling the factory. A caller that waited for a concurrent construction
    /// of the same key is treated as a hit: it shares that value and promotes
    /// the entry. A miss calls the factory, inserts the new value at
    /// the front and evicts exactly one least-recently-used entry if the
    /// cache was full.
    ///
    /// # Errors
    ///
    /// Returns the factory's error unchanged. A failed construction inserts
    /// nothing and evicts nothing.
    pub fn get_or_add(&self, key: K) -> Result<V, E> {
        let key = Arc::new(key);

        let flight = loop {
            let waiting_on = {
                let mut state = self.state.lock();

                let cached = state.entries.get(&*key).cloned();
                if let Some(value) = cached {
                    drop(state);
                    self.record(MetricsCollector::record_hit);
                    return Ok(value);
                }

                match state.in_flight.get(&key) {
                    Some(flight) => Arc::clone(flight),
                    None => {
                        let flight = Arc::new(Flight::new());
                        state.in_flight.insert(Arc::clone(&key), Arc::clone(&flight));
                        break flight;
                    }
                }
            };

            // Another caller is building this key; an abandoned flight means
            // its factory failed, so start over and possibly lead the next try.
            if let Some(value) = waiting_on.wait() {
                return Ok(self.accept_shared(&key, value));
            }
        };

        self.record(MetricsCollector::record_miss);
        debug!(capacity = self.capacity.get(), "recency cache miss, running factory");

        let mut guard = FlightGuard { state: &self.state, key: Arc::clone(&key), flight, armed: true };

        let value = match (self.factory)(&*key) {
            Ok(value) => value,
            Err(err) => {
                self.record(MetricsCollector::record_factory_failure);
                warn!("recency cache factory failed; nothing was inserted");
                return Err(err);
            }
        };

        let evicted = {
            let mut state = self.state.lock();
            state.in_flight.remove(&key);
            state.entries.insert(key, value.clone())
        };
        guard.complete(value.clone());

        self.record(MetricsCollector::record_insert);
        if evicted.is_some() {
            self.record(MetricsCollector::record_eviction);
            debug!(capacity = self.capacity.get(), "recency cache evicted least recently used entry");
        }
        drop(evicted);

        Ok(value)
    }

    /// Finish a lookup that waited on another caller's construction
    ///
    /// Counts as a hit and promotes the entry, exactly like a lookup that
    /// found the value already cached. The entry may have been evicted in the
    /// meantime; the value is still returned.
    fn accept_shared(&self, key: &K, value: V) -> V {
        self.state.lock().entries.get(key);
        self.record(MetricsCollector::record_hit);
        value
    }

    /// Current number of live entries, always within `0..=capacity`
    pub fn count(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Fixed capacity chosen at construction
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Check whether `key` is cached without changing its recency
    pub fn contains(&self, key: &K) -> bool {
        self.state.lock().entries.contains(key)
    }

    /// Snapshot of all entries, most recently used first
    ///
    /// The snapshot is taken under the cache lock and owns its data, so later
    /// lookups never show through it.
    pub fn enumerate(&self) -> Vec<(K, V)>
    where
        K: Clone,
    {
        self.state.lock().entries.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.count(), self.capacity.get())
    }

    fn record(&self, event: fn(&MetricsCollector)) {
        if self.track_metrics {
            event(&self.metrics);
        }
    }
}

impl<K, V, E> fmt::Debug for RecencyCache<K, V, E>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("RecencyCache")
            .field("count", &state.entries.len())
            .field("capacity", &self.capacity)
            .field("in_flight", &state.in_flight.len())
            .field("track_metrics", &self.track_metrics)
            .finish()
    }
}

/// Rendezvous point for callers waiting on another caller's construction
struct Flight<V> {
    outcome: Mutex<Option<FlightOutcome<V>>>,
    ready: Condvar,
}

enum FlightOutcome<V> {
    Ready(V),
    Abandoned,
}

impl<V: Clone> Flight<V> {
    fn new() -> Self {
        Self { outcome: Mutex::new(None), ready: Condvar::new() }
    }

    /// Block until the leader finishes; `None` when it gave up
    fn wait(&self) -> Option<V> {
        let mut outcome = self.outcome.lock();
        while outcome.is_none() {
            self.ready.wait(&mut outcome);
        }
        match outcome.as_ref() {
            Some(FlightOutcome::Ready(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn finish(&self, outcome: FlightOutcome<V>) {
        *self.outcome.lock() = Some(outcome);
        self.ready.notify_all();
    }
}

/// Owned by the caller running the factory
///
/// If the factory returns an error or panics, dropping the armed guard
/// withdraws the in-flight marker and wakes waiters so they can retry.
struct FlightGuard<'a, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    state: &'a Mutex<CacheState<K, V>>,
    key: Arc<K>,
    flight: Arc<Flight<V>>,
    armed: bool,
}

impl<K, V> FlightGuard<'_, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn complete(&mut self, value: V) {
        self.armed = false;
        self.flight.finish(FlightOutcome::Ready(value));
    }
}

impl<K, V> Drop for FlightGuard<'_, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn drop(&mut self) {
        if self.armed {
            self.state.lock().in_flight.remove(&self.key);
            self.flight.finish(FlightOutcome::Abandoned);
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for cache::core.
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    use super::*;

    fn string_cache(capacity: usize) -> RecencyCache<i32, String, Infallible> {
        RecencyCache::new(capacity, |key: &i32| Ok(key.to_string())).unwrap()
    }

    fn keys(cache: &RecencyCache<i32, String, Infallible>) -> Vec<i32> {
        cache.enumerate().into_iter().map(|(key, _)| key).collect()
    }

    /// Validates the store item scenario.
    ///
    /// Assertions:
    /// - Confirms `cache.count()` equals `0` then `1`.
    /// - Confirms `cache.enumerate()` equals `vec![(42, "42")]`.
    #[test]
    fn test_store_item() {
        let cache = string_cache(3);
        assert_eq!(cache.count(), 0);

        assert_eq!(cache.get_or_add(42).unwrap(), "42");
        assert_eq!(cache.count(), 1);
        assert_eq!(cache.enumerate(), vec![(42, "42".to_string())]);
    }

    /// Validates the expire old items scenario.
    ///
    /// Assertions:
    /// - Confirms `cache.count()` equals `3`.
    /// - Confirms `keys(&cache)` equals `vec![4, 3, 2]`.
    #[test]
    fn test_expire_old_items() {
        let cache = string_cache(3);
        for key in 1..=4 {
            cache.get_or_add(key).unwrap();
        }

        assert_eq!(cache.count(), 3);
        assert_eq!(keys(&cache), vec![4, 3, 2]);
        assert!(!cache.contains(&1));
        let values: Vec<_> = cache.enumerate().into_iter().map(|(_, value)| value).collect();
        assert_eq!(values, vec!["4", "3", "2"]);
    }

    /// Validates the reorder items scenario.
    ///
    /// Assertions:
    /// - Confirms `keys(&cache)` equals `vec![3, 4, 2]`.
    /// - Confirms the factory ran only four times.
    #[test]
    fn test_reorder_items() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = RecencyCache::new(3, move |key: &i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(key.to_string())
        })
        .unwrap();

        for key in [1, 2, 3, 4, 3] {
            cache.get_or_add(key).unwrap();
        }

        let order: Vec<_> = cache.enumerate().into_iter().map(|(key, _)| key).collect();
        assert_eq!(cache.count(), 3);
        assert_eq!(order, vec![3, 4, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    /// Validates the zero capacity scenario.
    ///
    /// Assertions:
    /// - Ensures construction fails with `CacheError::InvalidArgument`.
    #[test]
    fn test_zero_capacity_rejected() {
        let result = RecencyCache::new(0, |key: &i32| Ok::<_, Infallible>(*key));
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    /// Validates the factory failure scenario.
    ///
    /// Assertions:
    /// - Confirms the factory error is returned unchanged.
    /// - Confirms order and count are unchanged and nothing was evicted.
    #[test]
    fn test_factory_failure_leaves_cache_untouched() {
        let cache = RecencyCache::new(2, |key: &i32| {
            if *key < 0 {
                Err(format!("negative key {key}"))
            } else {
                Ok(key * 10)
            }
        })
        .unwrap();

        cache.get_or_add(1).unwrap();
        cache.get_or_add(2).unwrap();

        assert_eq!(cache.get_or_add(-1), Err("negative key -1".to_string()));
        assert_eq!(cache.count(), 2);
        assert_eq!(cache.enumerate(), vec![(2, 20), (1, 10)]);

        let stats = cache.stats();
        assert_eq!(stats.factory_failures, 1);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.inserts, 2);
    }

    /// Validates the stats tracking scenario.
    ///
    /// Assertions:
    /// - Confirms hits, misses and evictions are counted.
    /// - Confirms disabled tracking leaves counters at zero.
    #[test]
    fn test_stats_tracking() {
        let cache = string_cache(2);
        for key in [1, 2, 1, 3] {
            cache.get_or_add(key).unwrap();
        }

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.size, 2);
        assert_eq!(stats.capacity, 2);

        let config = CacheConfig::builder().capacity(2).track_metrics(false).build();
        let quiet =
            RecencyCache::from_config(&config, |key: &i32| Ok::<_, Infallible>(*key)).unwrap();
        quiet.get_or_add(1).unwrap();
        assert_eq!(quiet.stats().misses, 0);
        assert_eq!(quiet.stats().size, 1);
    }

    /// Validates the single-flight construction scenario.
    ///
    /// Assertions:
    /// - Confirms eight racing callers for one key run the factory once.
    /// - Confirms every caller receives the same value.
    #[test]
    fn test_concurrent_first_lookup_runs_factory_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = Arc::new(
            RecencyCache::new(4, move |key: &i32| {
                counter.fetch_add(1, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(50));
                Ok::<_, Infallible>(Arc::new(key.to_string()))
            })
            .unwrap(),
        );
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_add(7).unwrap()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|value| Arc::ptr_eq(value, &results[0])));
        assert_eq!(cache.count(), 1);
    }

    /// Validates the waiter retry scenario after a leader failure.
    ///
    /// Assertions:
    /// - Confirms the failing first attempt is reported to its caller.
    /// - Confirms the waiting caller retries and succeeds.
    #[test]
    fn test_waiter_retries_after_leader_failure() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let cache = Arc::new(
            RecencyCache::new(2, move |key: &i32| {
                let attempt = counter.fetch_add(1, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(50));
                if attempt == 0 {
                    Err("transient")
                } else {
                    Ok(*key)
                }
            })
            .unwrap(),
        );
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_add(5)
                })
            })
            .collect();

        let mut results: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
        results.sort();

        // Either the second caller waited and retried, or it arrived after the
        // failure and led a fresh attempt; both end with one error and one value.
        assert_eq!(results, vec![Ok(5), Err("transient")]);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(cache.enumerate(), vec![(5, 5)]);
    }

    /// Validates the factory panic scenario.
    ///
    /// Assertions:
    /// - Ensures a panicking factory leaves no in-flight marker behind.
    /// - Confirms the key can be built on the next lookup.
    #[test]
    fn test_factory_panic_releases_in_flight_marker() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let cache = Arc::new(
            RecencyCache::new(2, move |key: &i32| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    panic!("factory blew up");
                }
                Ok::<_, Infallible>(*key)
            })
            .unwrap(),
        );

        let panicking = Arc::clone(&cache);
        assert!(thread::spawn(move || panicking.get_or_add(1)).join().is_err());

        assert_eq!(cache.get_or_add(1).unwrap(), 1);
        assert_eq!(cache.count(), 1);
        assert!(format!("{cache:?}").contains("in_flight: 0"));
    }

    /// Validates the shared construction promotion scenario.
    ///
    /// Assertions:
    /// - Confirms a waiter's result moves its key to the front.
    /// - Confirms the waiter is counted as a hit.
    #[test]
    fn test_waiter_promotes_shared_entry() {
        let cache = string_cache(3);
        for key in [1, 2, 3] {
            cache.get_or_add(key).unwrap();
        }
        assert_eq!(keys(&cache), vec![3, 2, 1]);

        let value = cache.accept_shared(&1, "1".to_string());

        assert_eq!(value, "1");
        assert_eq!(keys(&cache), vec![1, 3, 2]);
        assert_eq!(cache.stats().hits, 1);

        // An entry evicted before the waiter woke is not resurrected
        assert_eq!(cache.accept_shared(&9, "9".to_string()), "9");
        assert_eq!(keys(&cache), vec![1, 3, 2]);
    }

    /// Validates the capacity invariant under concurrency scenario.
    ///
    /// Assertions:
    /// - Confirms each returned value matches its key.
    /// - Confirms `cache.count()` equals `10` afterwards.
    #[test]
    fn test_concurrent_churn_respects_capacity() {
        let cache = Arc::new(string_cache(10));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..2_000 {
                        let key = (i * 8 + worker) % 500;
                        assert_eq!(cache.get_or_add(key).unwrap(), key.to_string());
                        assert!(cache.count() <= 10);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.count(), 10);
        assert_eq!(cache.enumerate().len(), 10);
    }
}
