//! Progress tracking helpers used by the package writer.
//!
//! - **`ProgressTracker`**: numbers entries and forwards lifecycle events
//! - **`ProgressReader`**: reports bytes read from a source file in batches

use crate::ProgressCallback;
use std::io::Read;

/// Forwards entry lifecycle events with automatic 1-based numbering.
pub struct ProgressTracker<'a> {
    progress: &'a mut dyn ProgressCallback,
    current_entry: usize,
    total_entries: usize,
}

impl<'a> ProgressTracker<'a> {
    /// Creates a tracker for `total_entries` entries.
    #[must_use]
    pub fn new(progress: &'a mut dyn ProgressCallback, total_entries: usize) -> Self {
        Self {
            progress,
            current_entry: 0,
            total_entries,
        }
    }

    /// Reports that an entry is about to be appended.
    pub fn on_entry_start(&mut self, name: &str) {
        self.current_entry += 1;
        self.progress
            .on_entry_start(name, self.total_entries, self.current_entry);
    }

    /// Reports that an entry was appended.
    pub fn on_entry_complete(&mut self, name: &str) {
        self.progress.on_entry_complete(name);
    }

    /// Reports that the package is finished. Call exactly once.
    pub fn on_complete(&mut self) {
        self.progress.on_complete();
    }

    /// Borrows the underlying callback, e.g. to wrap a reader.
    pub fn callback(&mut self) -> &mut dyn ProgressCallback {
        &mut *self.progress
    }
}

/// Reader wrapper that reports consumed bytes to a progress callback.
///
/// Updates are batched (1 MiB by default) and the remainder is flushed on
/// drop. The reader also keeps a running total so the writer can check that
/// a file delivered exactly the number of bytes its header announced.
pub struct ProgressReader<'a, R> {
    inner: R,
    progress: &'a mut dyn ProgressCallback,
    bytes_since_last_update: u64,
    batch_threshold: u64,
    total: u64,
}

impl<'a, R> ProgressReader<'a, R> {
    /// Wraps `inner` with the default 1 MiB batch threshold.
    #[must_use]
    pub fn new(inner: R, progress: &'a mut dyn ProgressCallback) -> Self {
        Self::with_batch_threshold(inner, progress, 1024 * 1024)
    }

    /// Wraps `inner` with a custom batch threshold in bytes.
    #[must_use]
    pub fn with_batch_threshold(
        inner: R,
        progress: &'a mut dyn ProgressCallback,
        batch_threshold: u64,
    ) -> Self {
        Self {
            inner,
            progress,
            bytes_since_last_update: 0,
            batch_threshold,
            total: 0,
        }
    }

    /// Total bytes read through this wrapper.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total
    }

    /// Sends any pending byte count to the callback.
    pub fn flush_progress(&mut self) {
        if self.bytes_since_last_update > 0 {
            self.progress.on_bytes_read(self.bytes_since_last_update);
            self.bytes_since_last_update = 0;
        }
    }
}

impl<R: Read> Read for ProgressReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let bytes_read = self.inner.read(buf)?;
        if bytes_read > 0 {
            self.total += bytes_read as u64;
            self.bytes_since_last_update += bytes_read as u64;
            if self.bytes_since_last_update >= self.batch_threshold {
                self.flush_progress();
            }
        }
        Ok(bytes_read)
    }
}

impl<R> Drop for ProgressReader<'_, R> {
    fn drop(&mut self) {
        self.flush_progress();
    }
}
