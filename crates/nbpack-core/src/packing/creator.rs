//! Fluent builder for packing plugins.

use std::path::Path;
use std::path::PathBuf;

use crate::PackError;
use crate::ProgressCallback;
use crate::Result;
use crate::packing::config::PackConfig;
use crate::packing::report::PackReport;
use crate::packing::writer::pack_plugin_with_progress;

/// Builder for packing a plugin directory.
///
/// # Examples
///
/// ```no_run
/// use nbpack_core::packing::PluginPacker;
///
/// let report = PluginPacker::new()
///     .source("plugins/echo")
///     .output("build/echo.nbp")
///     .exclude("coverage")
///     .compression_level(9)
///     .reproducible(true)
///     .pack()?;
///
/// println!("Packed {} files", report.files_added);
/// # Ok::<(), nbpack_core::PackError>(())
/// ```
#[derive(Debug, Default)]
pub struct PluginPacker {
    source: Option<PathBuf>,
    output: Option<PathBuf>,
    config: PackConfig,
}

impl PluginPacker {
    /// Creates a packer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the plugin source directory.
    #[must_use]
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the package path to write.
    #[must_use]
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the whole configuration.
    ///
    /// Settings applied earlier through the other builder methods are lost.
    #[must_use]
    pub fn config(mut self, config: PackConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a path segment to exclude on top of the defaults.
    ///
    /// ```
    /// use nbpack_core::packing::PluginPacker;
    ///
    /// let packer = PluginPacker::new().exclude("coverage").exclude("tmp");
    /// ```
    #[must_use]
    pub fn exclude<S: AsRef<str>>(mut self, segment: S) -> Self {
        self.config.excludes.insert(segment.as_ref());
        self
    }

    /// Sets the gzip compression level (1-9).
    #[must_use]
    pub fn compression_level(mut self, level: u8) -> Self {
        self.config.compression_level = level;
        self
    }

    /// Normalizes header metadata for byte-identical output.
    #[must_use]
    pub fn reproducible(mut self, reproducible: bool) -> Self {
        self.config.reproducible = reproducible;
        self
    }

    /// Archives symlink targets instead of skipping links.
    #[must_use]
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.config.follow_symlinks = follow;
        self
    }

    /// Writes through a temporary file and renames it into place.
    #[must_use]
    pub fn atomic(mut self, atomic: bool) -> Self {
        self.config.atomic = atomic;
        self
    }

    /// Packs the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidConfiguration`] if the source or output is
    /// not set, otherwise any error from
    /// [`pack_plugin`](crate::packing::pack_plugin).
    pub fn pack(self) -> Result<PackReport> {
        let mut noop = crate::NoopProgress;
        self.pack_with_progress(&mut noop)
    }

    /// Packs the plugin, reporting progress to `progress`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::pack`].
    pub fn pack_with_progress(self, progress: &mut dyn ProgressCallback) -> Result<PackReport> {
        let source = self
            .source
            .ok_or_else(|| PackError::InvalidConfiguration {
                reason: "source directory not set".to_string(),
            })?;
        let output = self
            .output
            .ok_or_else(|| PackError::InvalidConfiguration {
                reason: "output path not set".to_string(),
            })?;

        pack_plugin_with_progress(source, output, &self.config, progress)
    }
}
