//! Exclusion filtering and entry name normalization.
//!
//! Exclusion works on whole path segments: a relative path is dropped from
//! the package when any of its components (directory names or the file name)
//! equals a member of the [`ExclusionSet`]. There is no glob or substring
//! matching, so `dist` excludes `src/dist/app.js` but keeps
//! `src/distfiles/app.js`.

use std::collections::BTreeSet;
use std::path::Component;
use std::path::Path;

/// Segments that are always excluded from a package.
pub const DEFAULT_EXCLUDES: [&str; 5] = [".git", ".github", "node_modules", "dist", "__pycache__"];

/// Set of path segments excluded from a package.
///
/// Always contains [`DEFAULT_EXCLUDES`]; callers can only add to it.
/// Matching is exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use nbpack_core::packing::ExclusionSet;
/// use std::path::Path;
///
/// let excludes = ExclusionSet::new().with_extra(["temp"]);
///
/// assert!(excludes.is_excluded(Path::new("a/node_modules/b.js")));
/// assert!(excludes.is_excluded(Path::new("temp/cache.bin")));
/// assert!(!excludes.is_excluded(Path::new("a/node_modules_extra/b.js")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    segments: BTreeSet<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self {
            segments: DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ExclusionSet {
    /// Creates a set holding only the default segments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds extra segments, ignoring blank ones.
    #[must_use]
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for segment in extra {
            self.insert(segment.as_ref());
        }
        self
    }

    /// Adds one segment after trimming surrounding whitespace.
    ///
    /// Returns `false` if the segment was blank or already present.
    pub fn insert(&mut self, segment: &str) -> bool {
        let segment = segment.trim();
        if segment.is_empty() {
            return false;
        }
        self.segments.insert(segment.to_string())
    }

    /// Returns whether `segment` is a member of the set.
    #[must_use]
    pub fn contains(&self, segment: &str) -> bool {
        self.segments.contains(segment)
    }

    /// Returns whether any segment of `relative` is in the set.
    #[must_use]
    pub fn is_excluded(&self, relative: &Path) -> bool {
        relative.components().any(|component| match component {
            Component::Normal(name) => name.to_str().is_some_and(|name| self.contains(name)),
            _ => false,
        })
    }

    /// Iterates over the segments in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Number of segments in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; the defaults cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Converts a relative path into a package entry name.
///
/// Components are joined with `/` regardless of the host separator, and the
/// result is passed through [`normalize_entry_str`]. Non-UTF-8 components
/// are converted lossily; the walker rejects such paths before naming them.
///
/// # Examples
///
/// ```
/// use nbpack_core::packing::filters::normalize_entry_name;
/// use std::path::Path;
///
/// assert_eq!(normalize_entry_name(Path::new("./src/index.js")), "src/index.js");
/// assert_eq!(normalize_entry_name(Path::new("manifest.json")), "manifest.json");
/// ```
#[must_use]
pub fn normalize_entry_name(relative: &Path) -> String {
    let joined = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    normalize_entry_str(&joined)
}

/// Normalizes an entry name given as a string.
///
/// Backslashes become `/` and any leading `./` or `/` prefixes are removed.
/// Only whole `./` prefixes are stripped, so `.env` stays `.env`. Applying
/// the function to its own output returns it unchanged.
///
/// # Examples
///
/// ```
/// use nbpack_core::packing::filters::normalize_entry_str;
///
/// assert_eq!(normalize_entry_str(r"assets\icon.png"), "assets/icon.png");
/// assert_eq!(normalize_entry_str("/./lib/util.js"), "lib/util.js");
/// assert_eq!(normalize_entry_str(".env"), ".env");
/// ```
#[must_use]
pub fn normalize_entry_str(name: &str) -> String {
    let replaced = name.replace('\\', "/");
    let mut rest = replaced.as_str();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }
    rest.to_string()
}
