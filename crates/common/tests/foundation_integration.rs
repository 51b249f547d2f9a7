//! Integration tests for the foundation tier
//!
//! Builds with `--no-default-features --features foundation`: the LRU list,
//! pattern keys and the shared error type must work without the runtime tier

#![cfg(feature = "foundation")]

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

use patterncache_common::collections::LruCache;
use patterncache_common::pattern::{NewLine, BUILD_DEFAULTS};
use patterncache_common::{
    CommonError, ErrorClassification, ErrorSeverity, PatternKey, PatternOptions, PatternSettings,
};

/// Verifies the bare LRU list keeps recency order and reports evictions.
///
/// # Test Steps
/// 1. Insert keys 1 through 3 into a list of capacity 2
/// 2. Verify key 1 came back as the evicted entry
/// 3. Promote key 2 with `get` and verify the MRU-first order
#[test]
fn test_lru_list_without_runtime() {
    let capacity = NonZeroUsize::new(2).unwrap();
    let mut list = LruCache::new(capacity);

    assert!(list.insert(Arc::new(1), "one").is_none());
    assert!(list.insert(Arc::new(2), "two").is_none());
    let evicted = list.insert(Arc::new(3), "three");
    assert_eq!(evicted.map(|(key, value)| (*key, value)), Some((1, "one")));

    assert_eq!(list.get(&2), Some(&"two"));
    let order: Vec<i32> = list.iter().map(|(key, _)| *key).collect();
    assert_eq!(order, vec![2, 3]);
    assert_eq!(list.len(), list.cap());
}

/// Verifies pattern keys hash by resolved settings without the runtime tier.
#[test]
fn test_pattern_keys_without_runtime() {
    let implicit = PatternKey::new("a+b", &PatternSettings::new());
    let mut settings = PatternSettings::new();
    settings.set_new_line(BUILD_DEFAULTS.new_line);
    let explicit = PatternKey::new("a+b", &settings);
    settings.set_new_line(NewLine::CrLf).set_options(PatternOptions::MULTILINE);
    let changed = PatternKey::new("a+b", &settings);

    let keys: HashSet<PatternKey> = [implicit.clone(), explicit, changed.clone()].into();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&implicit));
    assert!(keys.contains(&changed));
    assert_eq!(changed.settings().new_line(), NewLine::CrLf);
}

/// Verifies the shared error type converts TOML failures on its own.
#[test]
fn test_common_error_without_runtime() {
    let parse_err = toml::from_str::<toml::Table>("capacity = [").unwrap_err();
    let err = CommonError::from(parse_err);

    assert!(matches!(err, CommonError::Serialization { ref format, .. } if format == "TOML"));
    assert_eq!(err.field(), None);
    assert!(!err.is_retryable());
    assert_eq!(err.severity(), ErrorSeverity::Error);
}
