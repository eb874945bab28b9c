//! Property-based tests for entry naming and exclusion.

#![allow(clippy::unwrap_used)]

use nbpack_core::ExclusionSet;
use nbpack_core::packing::DEFAULT_EXCLUDES;
use nbpack_core::packing::normalize_entry_name;
use nbpack_core::packing::normalize_entry_str;
use proptest::prelude::*;
use std::path::PathBuf;

proptest! {
    /// Normalizing twice gives the same result as normalizing once.
    #[test]
    fn prop_normalization_idempotent(name in r"[./\\a-zA-Z0-9_-]{0,40}") {
        let once = normalize_entry_str(&name);
        prop_assert_eq!(normalize_entry_str(&once), once);
    }

    /// Normalized names never start with `./` or `/` and never contain `\`.
    #[test]
    fn prop_normalized_names_are_relative(name in r"[./\\a-z]{0,30}") {
        let normalized = normalize_entry_str(&name);
        prop_assert!(!normalized.starts_with('/'));
        prop_assert!(!normalized.starts_with("./"));
        prop_assert!(!normalized.contains('\\'));
    }

    /// Relative paths of plain segments are joined with `/` unchanged.
    #[test]
    fn prop_plain_segments_joined(
        segments in prop::collection::vec("[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,12}", 1..6)
    ) {
        let path: PathBuf = segments.iter().collect();
        prop_assert_eq!(normalize_entry_name(&path), segments.join("/"));
    }

    /// A default segment anywhere in the path excludes it.
    #[test]
    fn prop_default_segment_excludes(
        prefix in prop::collection::vec("[a-z]{1,8}", 0..4),
        suffix in prop::collection::vec("[a-z]{1,8}", 0..4),
        index in 0..DEFAULT_EXCLUDES.len(),
    ) {
        let set = ExclusionSet::default();
        let path: PathBuf = prefix
            .iter()
            .map(String::as_str)
            .chain([DEFAULT_EXCLUDES[index]])
            .chain(suffix.iter().map(String::as_str))
            .collect();
        prop_assert!(set.is_excluded(&path));
    }

    /// Segments that merely contain an excluded name are kept.
    #[test]
    fn prop_partial_segment_kept(
        segments in prop::collection::vec("[a-z]{1,8}", 0..4),
        extra in "[0-9_][a-z0-9_]{0,5}",
        index in 0..DEFAULT_EXCLUDES.len(),
    ) {
        let set = ExclusionSet::default();
        prop_assume!(!segments.iter().any(|s| set.contains(s)));
        let mut path: PathBuf = segments.iter().collect();
        path.push(format!("{}{extra}", DEFAULT_EXCLUDES[index]));
        prop_assert!(!set.is_excluded(&path));
    }
}
