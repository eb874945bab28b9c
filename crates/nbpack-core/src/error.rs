//! Error types for plugin packing operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packing or inspecting a plugin package.
#[derive(Error, Debug)]
pub enum PackError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed at a specific path.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Path being visited when traversal failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Source directory does not exist.
    #[error("source directory not found: {path}")]
    SourceNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// Source path exists but is not a directory.
    #[error("source is not a directory: {path}")]
    NotADirectory {
        /// The resolved source path.
        path: PathBuf,
    },

    /// Source directory has no `manifest.json` at its root.
    #[error("manifest.json not found in: {dir}")]
    ManifestMissing {
        /// The resolved source directory.
        dir: PathBuf,
    },

    /// Compression level outside 1-9.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Builder was finalized with a required setting missing, or the output
    /// would overwrite the source manifest.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is missing or inconsistent.
        reason: String,
    },

    /// Package being inspected is not a readable gzip-compressed tar stream.
    #[error("invalid package: {0}")]
    InvalidPackage(String),
}

impl PackError {
    /// Returns `true` if this error rejects the caller's input before any
    /// filesystem side effect took place.
    ///
    /// Configuration errors are always fixable by changing the arguments
    /// (source path, manifest presence, compression level).
    ///
    /// # Examples
    ///
    /// ```
    /// use nbpack_core::PackError;
    /// use std::path::PathBuf;
    ///
    /// let err = PackError::ManifestMissing {
    ///     dir: PathBuf::from("/plugins/echo"),
    /// };
    /// assert!(err.is_configuration_error());
    ///
    /// let err = PackError::Io(std::io::Error::other("disk full"));
    /// assert!(!err.is_configuration_error());
    /// ```
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::NotADirectory { .. }
                | Self::ManifestMissing { .. }
                | Self::InvalidCompressionLevel { .. }
                | Self::InvalidConfiguration { .. }
        )
    }

    /// Returns `true` if this error came from the storage layer.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Walk { .. })
    }
}

impl From<walkdir::Error> for PackError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        Self::Walk { path, source }
    }
}
