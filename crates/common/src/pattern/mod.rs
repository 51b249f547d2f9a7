//! Compiled pattern caching
//!
//! - **[`options`]**: compile option flags, enums and engine build defaults
//! - **[`settings`]**: mutable settings and their frozen snapshots
//! - **[`key`]**: composite key of pattern text and frozen settings
//! - **[`registry`]**: bounded cache of compiled patterns
//!
//! # Examples
//!
//! ```
//! use patterncache_common::pattern::{PatternKey, PatternOptions, PatternSettings};
//!
//! let mut settings = PatternSettings::with_options(PatternOptions::MULTILINE);
//! let key = PatternKey::new("^abc$", &settings);
//!
//! settings.set_options(PatternOptions::NONE);
//! assert_eq!(key.settings().options(), PatternOptions::MULTILINE);
//! ```

pub mod key;
pub mod options;
#[cfg(feature = "runtime")]
pub mod registry;
pub mod settings;

pub use key::PatternKey;
pub use options::{
    BackslashR, BuildDefaults, ExtraCompileOptions, NewLine, PatternOptions, BUILD_DEFAULTS,
};
#[cfg(feature = "runtime")]
pub use registry::{PatternCache, PatternCompiler};
pub use settings::{FrozenSettings, PatternSettings, ResolvedSettings};
