//! Pattern compile settings in mutable and frozen form
//!
//! [`PatternSettings`] is the caller-owned, freely mutable settings object.
//! [`PatternSettings::freeze`] copies it into a [`FrozenSettings`] snapshot
//! that has getters only, which is what a cache key holds. Freezing never
//! locks or aliases the source: the caller may keep editing it afterwards.
//!
//! Both forms keep "unset" distinct from "set to the default" so an engine
//! can fall back to its own build defaults. Comparison and hashing of a
//! snapshot go through [`ResolvedSettings`], where every unset field has been
//! replaced by [`BUILD_DEFAULTS`].

use std::hash::{Hash, Hasher};

use super::options::{
    BackslashR, ExtraCompileOptions, NewLine, PatternOptions, BUILD_DEFAULTS,
};

/// Field values shared by the mutable and frozen forms
#[derive(Debug, Clone, Copy, Default)]
struct SettingValues {
    options: PatternOptions,
    new_line: Option<NewLine>,
    backslash_r: Option<BackslashR>,
    parens_limit: Option<u32>,
    max_pattern_length: Option<u32>,
    extra_compile_options: ExtraCompileOptions,
}

impl SettingValues {
    fn resolve(&self) -> ResolvedSettings {
        ResolvedSettings {
            options: self.options,
            new_line: self.new_line.unwrap_or(BUILD_DEFAULTS.new_line),
            backslash_r: self.backslash_r.unwrap_or(BUILD_DEFAULTS.backslash_r),
            parens_limit: self.parens_limit.unwrap_or(BUILD_DEFAULTS.parens_limit),
            max_pattern_length: self.max_pattern_length,
            extra_compile_options: self.extra_compile_options,
        }
    }
}

/// Mutable compile settings owned by the caller
///
/// # Examples
///
/// ```
/// use patterncache_common::pattern::{NewLine, PatternOptions, PatternSettings};
///
/// let mut settings = PatternSettings::with_options(PatternOptions::IGNORE_CASE);
/// settings.set_new_line(NewLine::CrLf).set_parens_limit(64);
///
/// let frozen = settings.freeze();
/// settings.set_parens_limit(8);
///
/// assert_eq!(frozen.parens_limit(), 64);
/// assert_eq!(settings.parens_limit(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternSettings {
    values: SettingValues,
}

impl PatternSettings {
    /// Settings with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings with the given options and every other field unset
    pub fn with_options(options: PatternOptions) -> Self {
        Self { values: SettingValues { options, ..SettingValues::default() } }
    }

    /// Compile options
    pub fn options(&self) -> PatternOptions {
        self.values.options
    }

    /// Newline convention, falling back to the build default
    pub fn new_line(&self) -> NewLine {
        self.values.new_line.unwrap_or(BUILD_DEFAULTS.new_line)
    }

    /// `\R` behavior, falling back to the build default
    pub fn backslash_r(&self) -> BackslashR {
        self.values.backslash_r.unwrap_or(BUILD_DEFAULTS.backslash_r)
    }

    /// Parenthesis nesting limit, falling back to the build default
    pub fn parens_limit(&self) -> u32 {
        self.values.parens_limit.unwrap_or(BUILD_DEFAULTS.parens_limit)
    }

    /// Maximum pattern length; `None` means unlimited
    pub fn max_pattern_length(&self) -> Option<u32> {
        self.values.max_pattern_length
    }

    /// Extra compile options
    pub fn extra_compile_options(&self) -> ExtraCompileOptions {
        self.values.extra_compile_options
    }

    /// Replace the compile options
    pub fn set_options(&mut self, options: PatternOptions) -> &mut Self {
        self.values.options = options;
        self
    }

    /// Set the newline convention explicitly
    pub fn set_new_line(&mut self, new_line: NewLine) -> &mut Self {
        self.values.new_line = Some(new_line);
        self
    }

    /// Set the `\R` behavior explicitly
    pub fn set_backslash_r(&mut self, backslash_r: BackslashR) -> &mut Self {
        self.values.backslash_r = Some(backslash_r);
        self
    }

    /// Set the parenthesis nesting limit explicitly
    pub fn set_parens_limit(&mut self, limit: u32) -> &mut Self {
        self.values.parens_limit = Some(limit);
        self
    }

    /// Set or clear the maximum pattern length
    pub fn set_max_pattern_length(&mut self, length: Option<u32>) -> &mut Self {
        self.values.max_pattern_length = length;
        self
    }

    /// Replace the extra compile options
    pub fn set_extra_compile_options(&mut self, options: ExtraCompileOptions) -> &mut Self {
        self.values.extra_compile_options = options;
        self
    }

    /// Return every field to its unset state
    pub fn reset(&mut self) -> &mut Self {
        self.values = SettingValues::default();
        self
    }

    /// Copy the current values into an immutable snapshot
    ///
    /// The snapshot shares nothing with `self`; later edits to either side
    /// are invisible to the other.
    #[must_use]
    pub fn freeze(&self) -> FrozenSettings {
        FrozenSettings { values: self.values }
    }
}

/// Immutable settings snapshot produced by [`PatternSettings::freeze`]
///
/// Equality and hashing use the resolved values, so a snapshot with a field
/// left unset equals one with that field set to its build default.
#[derive(Debug, Clone, Copy)]
pub struct FrozenSettings {
    values: SettingValues,
}

impl FrozenSettings {
    /// Compile options
    pub fn options(&self) -> PatternOptions {
        self.values.options
    }

    /// Newline convention, falling back to the build default
    pub fn new_line(&self) -> NewLine {
        self.resolve().new_line
    }

    /// `\R` behavior, falling back to the build default
    pub fn backslash_r(&self) -> BackslashR {
        self.resolve().backslash_r
    }

    /// Parenthesis nesting limit, falling back to the build default
    pub fn parens_limit(&self) -> u32 {
        self.resolve().parens_limit
    }

    /// Maximum pattern length; `None` means unlimited
    pub fn max_pattern_length(&self) -> Option<u32> {
        self.values.max_pattern_length
    }

    /// Extra compile options
    pub fn extra_compile_options(&self) -> ExtraCompileOptions {
        self.values.extra_compile_options
    }

    /// Newline convention as given, `None` when left to the engine
    pub fn explicit_new_line(&self) -> Option<NewLine> {
        self.values.new_line
    }

    /// `\R` behavior as given, `None` when left to the engine
    pub fn explicit_backslash_r(&self) -> Option<BackslashR> {
        self.values.backslash_r
    }

    /// Parenthesis limit as given, `None` when left to the engine
    pub fn explicit_parens_limit(&self) -> Option<u32> {
        self.values.parens_limit
    }

    /// Effective values with build defaults substituted for unset fields
    pub fn resolve(&self) -> ResolvedSettings {
        self.values.resolve()
    }

    /// Independent mutable copy carrying the same set and unset fields
    pub fn to_mutable(&self) -> PatternSettings {
        PatternSettings { values: self.values }
    }
}

impl PartialEq for FrozenSettings {
    fn eq(&self, other: &Self) -> bool {
        self.resolve() == other.resolve()
    }
}

impl Eq for FrozenSettings {}

impl Hash for FrozenSettings {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resolve().hash(state);
    }
}

impl From<&PatternSettings> for FrozenSettings {
    fn from(settings: &PatternSettings) -> Self {
        settings.freeze()
    }
}

/// Effective settings after default substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedSettings {
    /// Compile options
    pub options: PatternOptions,
    /// Newline convention
    pub new_line: NewLine,
    /// `\R` behavior
    pub backslash_r: BackslashR,
    /// Parenthesis nesting limit
    pub parens_limit: u32,
    /// Maximum pattern length; `None` means unlimited
    pub max_pattern_length: Option<u32>,
    /// Extra compile options
    pub extra_compile_options: ExtraCompileOptions,
}
