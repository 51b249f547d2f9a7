//! Common error types and classification shared by the cache modules
//!
//! The error handling system mirrors the layering used across the crate:
//!
//! 1. **`CommonError`**: the failure patterns that recur in more than one
//!    module (configuration and serialization).
//!
//! 2. **`ErrorClassification` trait**: a standard interface for classifying
//!    errors by retryability and severity.
//!
//! 3. **`ErrorSeverity` enum**: a unified severity level for logging.
//!
//! Module-specific errors compose with `CommonError` rather than duplicating
//! its variants:
//!
//! ```rust,ignore
//! #[derive(Debug, Error)]
//! pub enum CacheError {
//!     #[error("Invalid argument: {0}")]
//!     InvalidArgument(String),
//!
//!     #[error(transparent)]
//!     Common(#[from] CommonError),
//! }
//!
//! impl_error_classification!(CacheError, Common,
//!     Self::InvalidArgument(_) => {
//!         retryable: false,
//!         severity: ErrorSeverity::Error,
//!     }
//! );
//! ```
//!
//! ## Standard Error Patterns
//!
//! | Pattern | CommonError Variant | When to Use |
//! |---------|-------------------|-------------|
//! | **Configuration** | `Config` | Unknown keys, values of the wrong type |
//! | **Serialization** | `Serialization` | Malformed TOML, encoding errors |

use std::fmt;

/// Standard result type using CommonError
pub type CommonResult<T> = Result<T, CommonError>;

/// Common error variants that appear across multiple modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// A configuration key is unknown or holds a value of the wrong type
    Config { field: String, message: String },

    /// Serialization or deserialization errors
    Serialization { format: String, message: String },
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { field, message } => {
                write!(f, "Configuration error in field '{}': {}", field, message)
            }
            Self::Serialization { format, message } => {
                write!(f, "Serialization error ({}): {}", format, message)
            }
        }
    }
}

impl std::error::Error for CommonError {}

impl ErrorClassification for CommonError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config { .. } => ErrorSeverity::Error,
            Self::Serialization { .. } => ErrorSeverity::Error,
        }
    }
}

impl CommonError {
    /// Create a configuration error for a specific field
    pub fn config_field<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Config { field: field.into(), message: message.into() }
    }

    /// Create a serialization error with format information
    pub fn serialization_format<F: Into<String>, S: Into<String>>(format: F, message: S) -> Self {
        Self::Serialization { format: format.into(), message: message.into() }
    }

    /// Name of the offending configuration field, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Config { field, .. } => Some(field),
            Self::Serialization { .. } => None,
        }
    }
}

/// Error classification trait for consistent error handling across modules
pub trait ErrorClassification {
    /// Check if this error is retryable
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    ///
    /// Used for logging decisions.
    fn severity(&self) -> ErrorSeverity;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl From<toml::de::Error> for CommonError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization_format("TOML", err.to_string())
    }
}

impl From<toml::ser::Error> for CommonError {
    fn from(err: toml::ser::Error) -> Self {
        Self::serialization_format("TOML", err.to_string())
    }
}

/// Utility macro for routing TOML errors through `CommonError`
///
/// ```rust,ignore
/// #[derive(Debug, thiserror::Error)]
/// pub enum MyError {
///     #[error(transparent)]
///     Common(#[from] CommonError),
/// }
///
/// impl_error_conversion!(MyError, Common);
/// ```
///
/// This generates `From<toml::de::Error>` and `From<toml::ser::Error>` for
/// `MyError` (via CommonError).
#[macro_export]
macro_rules! impl_error_conversion {
    ($error_type:ty, $variant:ident) => {
        impl From<toml::de::Error> for $error_type {
            fn from(err: toml::de::Error) -> Self {
                Self::$variant($crate::error::CommonError::from(err))
            }
        }

        impl From<toml::ser::Error> for $error_type {
            fn from(err: toml::ser::Error) -> Self {
                Self::$variant($crate::error::CommonError::from(err))
            }
        }
    };
}

/// Macro to implement ErrorClassification by delegating to CommonError
///
/// # Usage
///
/// ```rust,ignore
/// impl_error_classification!(MyError, Common,
///     Self::Specific(_) => {
///         retryable: false,
///         severity: ErrorSeverity::Error,
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_error_classification {
    (
        $error_type:ty,
        $common_variant:ident
        $(,
            $variant:pat => {
                retryable: $retryable:expr,
                severity: $severity:expr
                $(,)?
            }
        )*
        $(,)?
    ) => {
        impl $crate::error::ErrorClassification for $error_type {
            fn is_retryable(&self) -> bool {
                match self {
                    Self::$common_variant(e) => e.is_retryable(),
                    $(
                        $variant => $retryable,
                    )*
                }
            }

            fn severity(&self) -> $crate::error::ErrorSeverity {
                match self {
                    Self::$common_variant(e) => e.severity(),
                    $(
                        $variant => $severity,
                    )*
                }
            }
        }
    };
}
