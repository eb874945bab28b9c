//! Validated plugin source directory.

use crate::PackError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// File that must sit at the root of every plugin package.
pub const MANIFEST_FILE: &str = "manifest.json";

/// A plugin source directory that passed precondition checks.
///
/// Once constructed, a `SourceDir` is known to:
/// - be an absolute canonical path
/// - be a directory
/// - directly contain a regular `manifest.json`
///
/// Validation happens before any output is created, so a rejected source
/// never leaves files behind.
///
/// # Examples
///
/// ```no_run
/// use nbpack_core::packing::SourceDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = SourceDir::new("plugins/echo")?;
/// println!("Packing {}", source.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDir(PathBuf);

impl SourceDir {
    /// Validates `path` and resolves it to its canonical form.
    ///
    /// # Errors
    ///
    /// - [`PackError::SourceNotFound`] if the path does not exist
    /// - [`PackError::NotADirectory`] if it is not a directory
    /// - [`PackError::ManifestMissing`] if `manifest.json` is not a regular
    ///   file directly inside it
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let canonical = path.canonicalize().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PackError::SourceNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                PackError::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to resolve {}: {e}", path.display()),
                ))
            }
        })?;

        if !canonical.is_dir() {
            return Err(PackError::NotADirectory { path: canonical });
        }

        if !canonical.join(MANIFEST_FILE).is_file() {
            return Err(PackError::ManifestMissing { dir: canonical });
        }

        Ok(Self(canonical))
    }

    /// Returns the canonical directory path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns the path of the manifest file.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.0.join(MANIFEST_FILE)
    }
}

impl AsRef<Path> for SourceDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
