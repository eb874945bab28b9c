//! Package listing data structures.

use std::path::PathBuf;
use std::time::SystemTime;

/// Contents of a package, in archive order.
#[derive(Debug, Clone, Default)]
pub struct PackageListing {
    /// Path of the package that was read.
    pub path: PathBuf,

    /// Entries in the order they appear in the tar stream.
    pub entries: Vec<PackageEntry>,

    /// Number of entries.
    pub total_entries: usize,

    /// Sum of all entry sizes (uncompressed).
    pub total_size: u64,
}

impl PackageListing {
    /// Creates an empty listing for `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Adds an entry and updates the totals.
    pub fn add_entry(&mut self, entry: PackageEntry) {
        self.total_size += entry.size;
        self.total_entries += 1;
        self.entries.push(entry);
    }

    /// Looks up an entry by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&PackageEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// A single entry of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Entry name exactly as stored in the tar header (lossy UTF-8).
    pub name: String,

    /// Kind of tar entry.
    pub kind: EntryKind,

    /// Uncompressed size in bytes.
    pub size: u64,

    /// Unix permission bits, when the header carries them.
    pub mode: Option<u32>,

    /// Modification time, when the header carries one.
    pub modified: Option<SystemTime>,
}

/// Tar entry kind, reduced to what matters for plugin packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Hard link.
    Hardlink,
    /// Anything else (devices, FIFOs, ...).
    Other,
}

impl EntryKind {
    /// Single-character marker used by long listings.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::File => '-',
            Self::Directory => 'd',
            Self::Symlink => 'l',
            Self::Hardlink => 'h',
            Self::Other => '?',
        }
    }
}

impl From<tar::EntryType> for EntryKind {
    fn from(entry_type: tar::EntryType) -> Self {
        match entry_type {
            tar::EntryType::Regular | tar::EntryType::Continuous => Self::File,
            tar::EntryType::Directory => Self::Directory,
            tar::EntryType::Symlink => Self::Symlink,
            tar::EntryType::Link => Self::Hardlink,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, size: u64) -> PackageEntry {
        PackageEntry {
            name: name.to_string(),
            kind: EntryKind::File,
            size,
            mode: Some(0o644),
            modified: None,
        }
    }

    #[test]
    fn test_listing_totals() {
        let mut listing = PackageListing::new(PathBuf::from("echo.nbp"));
        listing.add_entry(entry("manifest.json", 13));
        listing.add_entry(entry("index.js", 100));

        assert_eq!(listing.total_entries, 2);
        assert_eq!(listing.total_size, 113);
        assert_eq!(listing.find("index.js").map(|e| e.size), Some(100));
        assert!(listing.find("./index.js").is_none());
    }

    #[test]
    fn test_entry_kind_from_tar() {
        assert_eq!(EntryKind::from(tar::EntryType::Regular), EntryKind::File);
        assert_eq!(EntryKind::from(tar::EntryType::Directory), EntryKind::Directory);
        assert_eq!(EntryKind::from(tar::EntryType::Symlink), EntryKind::Symlink);
        assert_eq!(EntryKind::from(tar::EntryType::Link), EntryKind::Hardlink);
        assert_eq!(EntryKind::from(tar::EntryType::Fifo), EntryKind::Other);
        assert_eq!(EntryKind::Directory.marker(), 'd');
    }
}
