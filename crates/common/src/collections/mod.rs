//! Specialized data structures
//!
//! - **[`lru_cache`]**: arena-backed LRU list used as the ordering structure
//!   of the runtime `RecencyCache`
//!
//! ## Usage
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! use patterncache_common::collections::LruCache;
//!
//! let mut list = LruCache::new(NonZeroUsize::new(10).unwrap());
//! list.insert(Arc::new(1), "one");
//! ```

pub mod lru_cache;

pub use lru_cache::LruCache;
