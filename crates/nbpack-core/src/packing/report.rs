//! Packing operation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of a completed packing run.
///
/// # Examples
///
/// ```
/// use nbpack_core::packing::PackReport;
///
/// let mut report = PackReport::default();
/// report.files_added = 3;
/// report.bytes_written = 1000;
/// report.bytes_compressed = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Path the package was written to.
    pub output: PathBuf,

    /// Entry names in the order they were written.
    pub entries: Vec<String>,

    /// Number of files added to the package.
    pub files_added: usize,

    /// Number of paths removed by the exclusion set.
    pub paths_excluded: usize,

    /// Number of symlinks left out of the package.
    pub symlinks_skipped: usize,

    /// Source bytes written into the package (uncompressed file contents).
    pub bytes_written: u64,

    /// Size of the finished package on disk.
    pub bytes_compressed: u64,

    /// Duration of the packing run.
    pub duration: Duration,

    /// Warnings generated during packing.
    pub warnings: Vec<String>,
}

impl PackReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved by compression, in percent.
    ///
    /// Returns 0.0 if nothing was written or the package grew. Small plugins
    /// often grow because of tar block padding.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 {
            return 0.0;
        }
        if self.bytes_compressed == 0 {
            return 100.0;
        }
        let saved = self.bytes_written.saturating_sub(self.bytes_compressed);
        (saved as f64 / self.bytes_written as f64) * 100.0
    }
}
