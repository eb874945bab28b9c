//! Output file placement with optional atomic replacement.

use crate::Result;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Destination of a package being written.
///
/// In atomic mode bytes go to a hidden sibling of the destination
/// (`.<name>.nbpack-tmp-<pid>-<n>`) which is renamed over the destination by
/// [`PackageOutput::commit`]. Dropping an uncommitted output removes the
/// temporary file, so a failed run leaves any previous package untouched.
///
/// In direct mode the destination itself is written and nothing is cleaned
/// up on failure.
#[derive(Debug)]
pub struct PackageOutput {
    dest: PathBuf,
    temp: Option<PathBuf>,
    committed: bool,
}

impl PackageOutput {
    /// Plans an output at `dest`.
    ///
    /// `dest` should already have an existing parent directory.
    #[must_use]
    pub fn new(dest: PathBuf, atomic: bool) -> Self {
        let temp = atomic.then(|| temp_sibling(&dest));
        Self {
            dest,
            temp,
            committed: false,
        }
    }

    /// Final destination path.
    #[must_use]
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Path bytes are actually written to.
    #[must_use]
    pub fn write_path(&self) -> &Path {
        self.temp.as_deref().unwrap_or(&self.dest)
    }

    /// Paths the walker must never pick up.
    #[must_use]
    pub fn reserved_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.dest.clone()];
        paths.extend(self.temp.clone());
        paths
    }

    /// Creates (or truncates) the file at [`Self::write_path`].
    pub fn create(&self) -> Result<File> {
        Ok(File::create(self.write_path())?)
    }

    /// Moves the finished package into place.
    pub fn commit(mut self) -> Result<()> {
        if let Some(temp) = &self.temp {
            std::fs::rename(temp, &self.dest)?;
        }
        self.committed = true;
        Ok(())
    }
}

impl Drop for PackageOutput {
    fn drop(&mut self) {
        if !self.committed
            && let Some(temp) = &self.temp
        {
            let _ = std::fs::remove_file(temp);
        }
    }
}

fn temp_sibling(dest: &Path) -> PathBuf {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let pid = process::id();
    let original_name = dest
        .file_name()
        .map_or_else(|| "package".to_string(), |n| n.to_string_lossy().to_string());
    dest.with_file_name(format!(".{original_name}.nbpack-tmp-{pid}-{counter}"))
}
