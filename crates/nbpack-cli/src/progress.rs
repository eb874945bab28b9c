//! Progress bar implementation for CLI operations.

use crate::output::format_size;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use nbpack_core::ProgressCallback;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// The entry count is only known once the walk finishes, so the bar starts
/// empty and takes its length from the first `on_entry_start`. Bytes read
/// are shown in the prefix, the current entry in the message.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_read: u64,
}

impl CliProgress {
    /// Creates a hidden-length progress bar labelled `label`.
    #[must_use]
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Packing [████████░░░░] 42/100 files (15.2 MB, 3s) lib/index.js"
        let template = format!(
            "{label} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} files ({{prefix}}, {{elapsed}}) {{wide_msg}}"
        );
        bar.set_style(
            ProgressStyle::default_bar()
                .template(&template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_prefix(format_size(0));

        Self { bar, bytes_read: 0 }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, name: &str, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message(name.to_string());
    }

    fn on_bytes_read(&mut self, bytes: u64) {
        self.bytes_read += bytes;
        self.bar.set_prefix(format_size(self.bytes_read));
    }

    fn on_entry_complete(&mut self, _name: &str) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
