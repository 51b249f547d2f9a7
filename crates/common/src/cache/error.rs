use thiserror::Error;

use crate::error::{CommonError, ErrorSeverity};
use crate::{impl_error_classification, impl_error_conversion};

/// Errors raised while building or configuring a cache
///
/// Failures of the value factory are not wrapped here: `get_or_add` hands
/// the factory's own error back to the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Malformed configuration document or a key with a bad value
    #[error(transparent)]
    Common(#[from] CommonError),

    /// A construction argument violates a cache invariant (zero capacity)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for cache construction and configuration
pub type CacheResult<T> = Result<T, CacheError>;

impl_error_conversion!(CacheError, Common);

impl_error_classification!(CacheError, Common,
    Self::InvalidArgument(_) => {
        retryable: false,  // Construction arguments do not fix themselves
        severity: ErrorSeverity::Error,
    }
);
