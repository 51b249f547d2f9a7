//! Cache configuration types and builder patterns
//!
//! This module provides the configuration for a [`super::RecencyCache`]:
//! its fixed capacity and whether access metrics are collected. A
//! configuration can be built in code or loaded from TOML.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{CacheError, CacheResult};
use crate::error::{CommonError, ErrorClassification};

/// Number of entries kept by the process-wide pattern cache unless configured
/// otherwise.
pub const DEFAULT_CACHE_SIZE: usize = 15;

/// Configuration for cache behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Maximum number of live entries; must be positive and never changes
    /// after the cache is built
    pub capacity: usize,

    /// Whether to collect hit/miss/eviction counters
    pub track_metrics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_CACHE_SIZE, track_metrics: true }
    }
}

impl CacheConfig {
    /// Create a new configuration builder
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Quick preset for a cache holding `capacity` entries
    ///
    /// # Example
    /// ```
    /// use patterncache_common::cache::CacheConfig;
    ///
    /// let config = CacheConfig::with_capacity(100);
    /// assert_eq!(config.capacity, 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, ..Self::default() }
    }

    /// Parse a configuration from a TOML document
    ///
    /// Missing keys fall back to [`CacheConfig::default`]. The parsed
    /// configuration is validated before it is returned.
    ///
    /// # Errors
    ///
    /// - [`CommonError::Serialization`] when the document is not valid TOML.
    /// - [`CommonError::Config`] naming the field when a key is unknown or
    ///   holds a value of the wrong type.
    /// - [`CacheError::InvalidArgument`] when `capacity` is zero.
    ///
    /// # Example
    /// ```
    /// use patterncache_common::cache::CacheConfig;
    ///
    /// let config = CacheConfig::from_toml_str("capacity = 32").unwrap();
    /// assert_eq!(config.capacity, 32);
    /// assert!(config.track_metrics);
    /// ```
    pub fn from_toml_str(source: &str) -> CacheResult<Self> {
        let result = Self::parse_toml(source);
        if let Err(err) = &result {
            warn!(
                severity = %err.severity(),
                retryable = err.is_retryable(),
                error = %err,
                "rejected cache configuration"
            );
        }
        result
    }

    /// Render the configuration as a TOML document
    ///
    /// The output is accepted by [`CacheConfig::from_toml_str`].
    ///
    /// # Errors
    ///
    /// Returns [`CommonError::Serialization`] if TOML encoding fails.
    pub fn to_toml_string(&self) -> CacheResult<String> {
        Ok(toml::to_string(self)?)
    }

    fn parse_toml(source: &str) -> CacheResult<Self> {
        let table: toml::Table = toml::from_str(source)?;
        for (field, value) in &table {
            check_field(field, value)?;
        }

        let config: Self = toml::Value::Table(table).try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants a cache relies on
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when `capacity` is zero.
    pub fn validate(&self) -> CacheResult<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidArgument(
                "cache capacity must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reject unknown keys and values of the wrong type, naming the field
fn check_field(field: &str, value: &toml::Value) -> Result<(), CommonError> {
    let expected = match field {
        "capacity" if value.as_integer().is_some_and(|n| n >= 0) => return Ok(()),
        "capacity" => "a non-negative integer",
        "track_metrics" if value.is_bool() => return Ok(()),
        "track_metrics" => "a boolean",
        _ => return Err(CommonError::config_field(field, "unknown configuration key")),
    };
    Err(CommonError::config_field(field, format!("expected {expected}, found {}", value.type_str())))
}

/// Builder for CacheConfig with fluent API
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    /// Set the fixed capacity
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Enable or disable metrics tracking
    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CacheConfig {
        self.config
    }
}
