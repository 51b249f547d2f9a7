//! Composite cache key: pattern text plus frozen settings

use std::fmt;

use super::settings::{FrozenSettings, PatternSettings};

/// Immutable key identifying one compiled pattern
///
/// The key owns a copy of the pattern text and a frozen copy of the
/// settings, so nothing the caller does after construction can change it.
/// Two keys are equal when the pattern text is identical and the resolved
/// settings match; the hash follows the same definition.
///
/// # Examples
///
/// ```
/// use patterncache_common::pattern::{PatternKey, PatternSettings, BUILD_DEFAULTS};
///
/// let mut explicit = PatternSettings::new();
/// explicit.set_parens_limit(BUILD_DEFAULTS.parens_limit);
///
/// let a = PatternKey::new("a+b", &PatternSettings::new());
/// let b = PatternKey::new("a+b", &explicit);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternKey {
    pattern: String,
    settings: FrozenSettings,
}

impl PatternKey {
    /// Capture `pattern` verbatim and freeze `settings`
    pub fn new(pattern: impl Into<String>, settings: &PatternSettings) -> Self {
        Self { pattern: pattern.into(), settings: settings.freeze() }
    }

    /// Build a key from settings that are already frozen
    pub fn from_frozen(pattern: impl Into<String>, settings: FrozenSettings) -> Self {
        Self { pattern: pattern.into(), settings }
    }

    /// Pattern text exactly as given
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Frozen settings captured with the pattern
    pub fn settings(&self) -> &FrozenSettings {
        &self.settings
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/ (options {:#x})", self.pattern, self.settings.options().bits())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for pattern::key.
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    use super::*;
    use crate::pattern::{BackslashR, PatternOptions, BUILD_DEFAULTS};

    fn hash_of(key: &PatternKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Validates the compare equal scenario.
    ///
    /// Assertions:
    /// - Confirms implicit and explicit defaults produce equal keys.
    /// - Confirms the hashes match.
    #[test]
    fn should_compare_equal() {
        let implicit_defaults = PatternSettings::new();
        let mut explicit_defaults = PatternSettings::new();
        explicit_defaults
            .set_new_line(BUILD_DEFAULTS.new_line)
            .set_backslash_r(BUILD_DEFAULTS.backslash_r)
            .set_parens_limit(BUILD_DEFAULTS.parens_limit)
            .set_max_pattern_length(None);

        let key_a = PatternKey::new("test", &implicit_defaults);
        let key_b = PatternKey::new("test", &explicit_defaults);

        assert_eq!(key_a, key_b);
        assert_eq!(hash_of(&key_a), hash_of(&key_b));

        let set: HashSet<_> = [key_a, key_b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    /// Validates the not compare equal scenario.
    ///
    /// Assertions:
    /// - Confirms a non-default parens limit makes keys unequal.
    /// - Confirms different pattern text makes keys unequal.
    #[test]
    fn should_not_compare_equal() {
        let defaults = PatternSettings::new();
        let mut other = PatternSettings::new();
        other.set_parens_limit(42);

        assert_ne!(PatternKey::new("test", &defaults), PatternKey::new("test", &other));
        assert_ne!(PatternKey::new("test", &defaults), PatternKey::new("Test", &defaults));
        assert_ne!(PatternKey::new("test", &defaults), PatternKey::new("test ", &defaults));
    }

    /// Validates the freeze settings scenario.
    ///
    /// Assertions:
    /// - Confirms mutating the source after key construction leaves the key
    ///   unchanged.
    /// - Confirms the source accepts further edits.
    #[test]
    fn should_freeze_settings() {
        let mut settings = PatternSettings::with_options(PatternOptions::IGNORE_CASE);
        let key = PatternKey::new("test", &settings);
        let before = *key.settings();

        settings
            .set_options(PatternOptions::MULTILINE)
            .set_backslash_r(BackslashR::AnyCrLf)
            .set_parens_limit(1);

        assert_eq!(key.settings().options(), PatternOptions::IGNORE_CASE);
        assert_eq!(key.settings().backslash_r(), BUILD_DEFAULTS.backslash_r);
        assert_eq!(key.settings().parens_limit(), BUILD_DEFAULTS.parens_limit);
        assert_eq!(key.settings().resolve(), before.resolve());
        assert_eq!(settings.parens_limit(), 1);
    }

    /// Validates the from frozen scenario.
    ///
    /// Assertions:
    /// - Confirms `from_frozen` and `new` agree for the same inputs.
    /// - Confirms `Display` shows pattern and options.
    #[test]
    fn from_frozen_matches_new() {
        let settings = PatternSettings::with_options(PatternOptions::IGNORE_CASE);
        let key = PatternKey::from_frozen("a|b", settings.freeze());

        assert_eq!(key, PatternKey::new("a|b", &settings));
        assert_eq!(key.pattern(), "a|b");
        assert_eq!(key.to_string(), "/a|b/ (options 0x8)");
    }
}
