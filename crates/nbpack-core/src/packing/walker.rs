//! Plugin tree traversal with segment exclusion.
//!
//! The walker produces the complete, sorted list of files to archive before
//! any byte of output is written. Excluded directories are pruned instead of
//! descended, which yields the same file set as testing every descendant.

use crate::Result;
use crate::packing::config::PackConfig;
use crate::packing::filters::normalize_entry_name;
use crate::packing::source::SourceDir;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;
use walkdir::WalkDir;

/// A regular file selected for the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    /// Absolute path of the file on disk.
    pub path: PathBuf,

    /// Path relative to the source directory.
    pub relative: PathBuf,

    /// Normalized entry name written to the archive.
    pub name: String,

    /// File size at walk time.
    pub size: u64,
}

/// Result of walking a plugin directory.
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    /// Files to archive, sorted by relative path.
    pub entries: Vec<PackEntry>,

    /// Number of paths dropped by the exclusion set. A pruned directory
    /// counts once regardless of its contents.
    pub excluded: usize,

    /// Entry names of symlinks that were not archived.
    pub skipped_symlinks: Vec<String>,
}

/// Walks `source` and selects the files that belong in the package.
///
/// `skip` lists absolute paths that must never be archived, such as the
/// output file when it lives inside the source tree.
///
/// Entries come back sorted by relative path in ascending component-wise
/// byte order, independent of the order the filesystem reports them.
///
/// # Errors
///
/// Returns [`crate::PackError::Walk`] if a directory cannot be read or a
/// followed symlink is broken or loops, and [`crate::PackError::Io`] with
/// [`io::ErrorKind::InvalidData`] for a path that is not valid UTF-8.
///
/// # Examples
///
/// ```no_run
/// use nbpack_core::packing::PackConfig;
/// use nbpack_core::packing::SourceDir;
/// use nbpack_core::packing::walker::collect_entries;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = SourceDir::new("plugins/echo")?;
/// let outcome = collect_entries(&source, &PackConfig::default(), &[])?;
/// for entry in &outcome.entries {
///     println!("{}", entry.name);
/// }
/// # Ok(())
/// # }
/// ```
pub fn collect_entries(
    source: &SourceDir,
    config: &PackConfig,
    skip: &[PathBuf],
) -> Result<WalkOutcome> {
    let root = source.as_path();
    let mut outcome = WalkOutcome::default();
    let mut excluded = 0;

    let walker = WalkDir::new(root)
        .follow_links(config.follow_symlinks)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| {
            let keep = !config.excludes.is_excluded(relative_to(entry.path(), root));
            if !keep {
                debug!(path = %entry.path().display(), "excluded");
                excluded += 1;
            }
            keep
        });

    for entry in walker {
        let entry = entry?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            continue;
        }

        let relative = relative_to(entry.path(), root).to_path_buf();
        if relative.to_str().is_none() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("file name is not valid UTF-8: {}", entry.path().display()),
            )
            .into());
        }
        let name = normalize_entry_name(&relative);

        if file_type.is_symlink() {
            warn!(entry = %name, "skipping symlink");
            outcome.skipped_symlinks.push(name);
            continue;
        }

        if skip.iter().any(|s| s == entry.path()) {
            debug!(entry = %name, "skipping package output inside source tree");
            continue;
        }

        if !file_type.is_file() {
            debug!(entry = %name, "skipping special file");
            continue;
        }

        let size = entry.metadata()?.len();
        outcome.entries.push(PackEntry {
            path: entry.path().to_path_buf(),
            relative,
            name,
            size,
        });
    }

    outcome.excluded = excluded;
    outcome
        .entries
        .sort_by(|a, b| a.relative.cmp(&b.relative));
    outcome.skipped_symlinks.sort();

    Ok(outcome)
}

fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
