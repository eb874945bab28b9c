//! Progress reporting hooks for packing operations.

/// Callback trait for progress reporting during packing.
///
/// Implement this trait to receive progress updates while files are added to
/// a package. The trait requires `Send` so a callback can be handed to
/// another thread that owns the packing run.
///
/// # Examples
///
/// ```
/// use nbpack_core::ProgressCallback;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, name: &str, total: usize, current: usize) {
///         println!("[{current}/{total}] {name}");
///     }
///
///     fn on_bytes_read(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _name: &str) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before an entry is appended.
    ///
    /// # Arguments
    ///
    /// * `name` - Normalized entry name
    /// * `total` - Number of entries that will be written
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, name: &str, total: usize, current: usize);

    /// Called as source bytes are consumed, batched per 1 MiB.
    fn on_bytes_read(&mut self, bytes: u64);

    /// Called after an entry has been appended.
    fn on_entry_complete(&mut self, name: &str);

    /// Called once after the package has been finalized.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _name: &str, _total: usize, _current: usize) {}

    fn on_bytes_read(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _name: &str) {}

    fn on_complete(&mut self) {}
}
