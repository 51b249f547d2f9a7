//! Bounded recency caching for compiled patterns.
//!
//! The crate provides a thread-safe cache that keeps the most recently used
//! values and builds missing ones through a caller-supplied factory, plus a
//! pattern layer that keys that cache by pattern text and frozen compile
//! settings.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: errors, collections, utilities, pattern settings and keys
//! - `observability`: tracing instrumentation
//! - `runtime` (default): the recency cache and the compiled pattern cache

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
#[macro_use]
pub mod utils;
#[cfg(feature = "foundation")]
pub mod collections;
#[cfg(feature = "foundation")]
pub mod error;
#[cfg(feature = "foundation")]
pub mod pattern;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod cache;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use cache::{CacheConfig, CacheError, CacheResult, CacheStats, RecencyCache};
#[cfg(feature = "foundation")]
pub use error::{CommonError, CommonResult, ErrorClassification, ErrorSeverity};
#[cfg(feature = "runtime")]
pub use pattern::{PatternCache, PatternCompiler};
#[cfg(feature = "foundation")]
pub use pattern::{FrozenSettings, PatternKey, PatternOptions, PatternSettings};
