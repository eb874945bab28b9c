//! Error conversion utilities for CLI.
//!
//! Converts nbpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use nbpack_core::PackError;
use std::path::Path;

/// Converts a packing error into an anyhow error with a hint where one helps.
pub fn convert_pack_error(err: PackError, src: &Path) -> anyhow::Error {
    match err {
        PackError::SourceNotFound { path } => anyhow!(
            "Configuration error: source directory '{}' does not exist\n\
             HINT: Pass the plugin root with --src.",
            path.display()
        ),
        PackError::NotADirectory { path } => anyhow!(
            "Configuration error: source '{}' is not a directory\n\
             HINT: --src must point at the plugin root, not a file inside it.",
            path.display()
        ),
        PackError::ManifestMissing { dir } => anyhow!(
            "Configuration error: manifest.json not found in '{}'\n\
             HINT: Every plugin needs a manifest.json at its root.",
            dir.display()
        ),
        PackError::InvalidCompressionLevel { level } => anyhow!(
            "Configuration error: invalid compression level {level}\n\
             HINT: Use a level between 1 (fastest) and 9 (smallest)."
        ),
        PackError::InvalidConfiguration { reason } => anyhow!(
            "Configuration error: {reason}\n\
             HINT: Point --out at a new file, not at the plugin's manifest.json."
        ),
        err if err.is_io_error() => {
            anyhow::Error::from(err).context(format!("I/O error while packing '{}'", src.display()))
        }
        _ => anyhow::Error::from(err).context(format!("Error packing '{}'", src.display())),
    }
}

/// Converts an inspection error for `package`.
pub fn convert_inspect_error(err: PackError, package: &Path) -> anyhow::Error {
    match err {
        PackError::InvalidPackage(reason) => anyhow!(
            "Invalid package '{}': {}\n\
             HINT: The file is not a gzip-compressed tar archive or is truncated.",
            package.display(),
            reason
        ),
        PackError::Io(io_err) => anyhow!(
            "I/O error while reading '{}': {}",
            package.display(),
            io_err
        ),
        _ => anyhow::Error::from(err).context(format!("Error reading '{}'", package.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_manifest_missing() {
        let err = PackError::ManifestMissing {
            dir: PathBuf::from("/plugins/echo"),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new("echo")));
        assert!(msg.contains("manifest.json not found"));
        assert!(msg.contains("/plugins/echo"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_io_error() {
        let err = PackError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let msg = format!("{:?}", convert_pack_error(err, Path::new("echo")));
        assert!(msg.contains("I/O error"));
        assert!(!msg.contains("HINT"));
    }

    #[test]
    fn test_convert_walk_error_keeps_path() {
        let err = PackError::Walk {
            path: PathBuf::from("/plugins/echo/locked"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new("echo")));
        assert!(msg.contains("I/O error while packing 'echo'"));
        assert!(msg.contains("/plugins/echo/locked"));
    }

    #[test]
    fn test_convert_invalid_configuration() {
        let err = PackError::InvalidConfiguration {
            reason: "output would overwrite the plugin manifest".to_string(),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new("echo")));
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_invalid_package() {
        let err = PackError::InvalidPackage("bad header".to_string());
        let msg = format!("{:?}", convert_inspect_error(err, Path::new("x.nbp")));
        assert!(msg.contains("Invalid package 'x.nbp'"));
        assert!(msg.contains("bad header"));
    }
}
