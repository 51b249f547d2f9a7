//! Bounded recency cache with on-demand value construction
//!
//! The cache keeps at most `capacity` entries ordered by last use. A lookup
//! either returns the cached value (and marks it most recently used) or
//! runs the factory supplied at construction, stores the result at the
//! front and evicts the least recently used entry when full.
//!
//! # Features
//!
//! - **Thread-safe**: one `parking_lot::Mutex` guards the list and index
//! - **Single-flight**: concurrent misses on one key run the factory once
//! - **Failure-transparent**: factory errors reach the caller unchanged and
//!   leave the cache untouched
//! - **Metrics tracking**: optional hit/miss/eviction counters
//!
//! # Examples
//!
//! ## Recency order
//! ```
//! use std::convert::Infallible;
//!
//! use patterncache_common::cache::RecencyCache;
//!
//! let cache = RecencyCache::new(3, |key: &i32| Ok::<_, Infallible>(key.to_string())).unwrap();
//! for key in 1..=4 {
//!     cache.get_or_add(key).unwrap();
//! }
//! cache.get_or_add(3).unwrap();
//!
//! let keys: Vec<i32> = cache.enumerate().into_iter().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec![3, 4, 2]);
//! ```
//!
//! ## Configuration from TOML
//! ```
//! use patterncache_common::cache::CacheConfig;
//!
//! let config = CacheConfig::from_toml_str("capacity = 64\ntrack_metrics = false").unwrap();
//! assert_eq!(config.capacity, 64);
//! assert!(!config.track_metrics);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod stats;

pub use config::{CacheConfig, CacheConfigBuilder, DEFAULT_CACHE_SIZE};
pub use core::{Factory, RecencyCache};
pub use error::{CacheError, CacheResult};
pub use stats::CacheStats;
