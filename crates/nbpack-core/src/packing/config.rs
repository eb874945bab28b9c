//! Configuration for plugin packing operations.

use crate::PackError;
use crate::Result;
use crate::packing::filters::ExclusionSet;

/// Configuration for plugin packing operations.
///
/// # Examples
///
/// ```
/// use nbpack_core::packing::PackConfig;
///
/// let config = PackConfig::default()
///     .with_extra_excludes(["temp", "coverage"])
///     .with_compression_level(9)
///     .with_reproducible(true);
///
/// assert!(config.excludes.contains("temp"));
/// assert!(config.excludes.contains("node_modules"));
/// ```
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Path segments excluded from the package.
    ///
    /// Default: [`crate::packing::filters::DEFAULT_EXCLUDES`].
    pub excludes: ExclusionSet,

    /// Gzip compression level (1-9).
    ///
    /// Default: `6`.
    pub compression_level: u8,

    /// Normalize header metadata so identical trees give identical bytes.
    ///
    /// When set, every entry gets a fixed mtime, uid/gid 0 and normalized
    /// permission bits. When unset, headers mirror the source files.
    ///
    /// Default: `false`.
    pub reproducible: bool,

    /// Archive the targets of symlinks instead of skipping them.
    ///
    /// Default: `false`.
    pub follow_symlinks: bool,

    /// Write to a temporary sibling and rename into place on success.
    ///
    /// When unset, the destination is written in place and a failure
    /// leaves a truncated file behind.
    ///
    /// Default: `true`.
    pub atomic: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            excludes: ExclusionSet::default(),
            compression_level: 6,
            reproducible: false,
            follow_symlinks: false,
            atomic: true,
        }
    }
}

impl PackConfig {
    /// Creates a new `PackConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds segments to the default exclusion set.
    #[must_use]
    pub fn with_extra_excludes<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excludes = self.excludes.with_extra(extra);
        self
    }

    /// Sets the compression level.
    ///
    /// Out-of-range levels are accepted here and rejected by `validate()`.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets reproducible header metadata.
    #[must_use]
    pub fn with_reproducible(mut self, reproducible: bool) -> Self {
        self.reproducible = reproducible;
        self
    }

    /// Sets whether to follow symlinks.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets atomic output replacement.
    #[must_use]
    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidCompressionLevel`] if the level is not in
    /// 1-9.
    pub fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.compression_level) {
            return Err(PackError::InvalidCompressionLevel {
                level: self.compression_level,
            });
        }
        Ok(())
    }

    pub(crate) fn gzip_level(&self) -> flate2::Compression {
        flate2::Compression::new(u32::from(self.compression_level))
    }
}
