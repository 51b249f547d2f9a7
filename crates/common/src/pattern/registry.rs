//! Process-wide compiled pattern cache
//!
//! [`PatternCache`] memoizes the output of a [`PatternCompiler`] keyed by
//! [`PatternKey`]. Compiled programs are handed out as `Arc` handles so every
//! caller asking for the same pattern and settings shares one instance.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::key::PatternKey;
use super::settings::{FrozenSettings, PatternSettings};
use crate::cache::{CacheConfig, CacheResult, CacheStats, RecencyCache, DEFAULT_CACHE_SIZE};

/// Engine hook that turns pattern text and settings into a compiled program
pub trait PatternCompiler: Send + Sync + 'static {
    /// Compiled program shared between callers
    type Compiled: Send + Sync + 'static;
    /// Compilation failure reported to the caller
    type Error;

    /// Compile `pattern` with the frozen `settings`
    ///
    /// # Errors
    ///
    /// Returns the engine's error when the pattern cannot be compiled.
    fn compile(&self, pattern: &str, settings: &FrozenSettings) -> Result<Self::Compiled, Self::Error>;
}

/// Bounded cache of compiled patterns
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
///
/// use patterncache_common::pattern::{
///     FrozenSettings, PatternCache, PatternCompiler, PatternSettings,
/// };
///
/// struct Upper;
///
/// impl PatternCompiler for Upper {
///     type Compiled = String;
///     type Error = Infallible;
///
///     fn compile(&self, pattern: &str, _: &FrozenSettings) -> Result<String, Infallible> {
///         Ok(pattern.to_uppercase())
///     }
/// }
///
/// let cache = PatternCache::new(Upper).unwrap();
/// let compiled = cache.get_or_compile("abc", &PatternSettings::new()).unwrap();
/// assert_eq!(compiled.as_str(), "ABC");
/// ```
pub struct PatternCache<C: PatternCompiler> {
    inner: RecencyCache<PatternKey, Arc<C::Compiled>, C::Error>,
}

impl<C: PatternCompiler> PatternCache<C> {
    /// Cache with the default capacity of [`DEFAULT_CACHE_SIZE`]
    ///
    /// # Errors
    ///
    /// Never fails for the default configuration; the `Result` mirrors
    /// [`PatternCache::with_config`].
    pub fn new(compiler: C) -> CacheResult<Self> {
        Self::with_config(compiler, &CacheConfig::with_capacity(DEFAULT_CACHE_SIZE))
    }

    /// Cache sized and instrumented by `config`
    ///
    /// # Errors
    ///
    /// Returns [`crate::cache::CacheError::InvalidArgument`] when the
    /// configured capacity is zero.
    pub fn with_config(compiler: C, config: &CacheConfig) -> CacheResult<Self> {
        let compiler = Arc::new(compiler);
        let inner = RecencyCache::from_config(config, move |key: &PatternKey| {
            compiler.compile(key.pattern(), key.settings()).map(Arc::new)
        })?;
        debug!(capacity = config.capacity, "pattern cache created");
        Ok(Self { inner })
    }

    /// Return the compiled program for `pattern` under `settings`
    ///
    /// The settings are frozen into the key before lookup, so editing
    /// `settings` afterwards has no effect on the cached entry.
    ///
    /// # Errors
    ///
    /// Returns the compiler's error; nothing is cached in that case.
    #[instrument(level = "trace", skip(self, settings), fields(pattern_len = pattern.len()))]
    pub fn get_or_compile(
        &self,
        pattern: &str,
        settings: &PatternSettings,
    ) -> Result<Arc<C::Compiled>, C::Error> {
        self.get_or_compile_key(PatternKey::new(pattern, settings))
    }

    /// Lookup with an already built key
    ///
    /// # Errors
    ///
    /// Returns the compiler's error; nothing is cached in that case.
    pub fn get_or_compile_key(&self, key: PatternKey) -> Result<Arc<C::Compiled>, C::Error> {
        self.inner.get_or_add(key)
    }

    /// Whether the program for `key` is currently cached
    pub fn contains(&self, key: &PatternKey) -> bool {
        self.inner.contains(key)
    }

    /// Number of cached programs
    pub fn count(&self) -> usize {
        self.inner.count()
    }

    /// Maximum number of cached programs
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Cached programs, most recently used first
    pub fn enumerate(&self) -> Vec<(PatternKey, Arc<C::Compiled>)> {
        self.inner.enumerate()
    }

    /// Hit, miss and eviction counters
    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }
}

impl<C: PatternCompiler> fmt::Debug for PatternCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternCache").field("inner", &self.inner).finish()
    }
}
