//! Plugin packing.
//!
//! Turns a plugin source directory into a `.nbp` package: a gzip-compressed
//! tar archive of every non-excluded regular file, in sorted order.

pub mod atomic;
pub mod config;
pub mod creator;
pub mod filters;
pub mod progress;
pub mod report;
pub mod source;
pub mod walker;
pub mod writer;

pub use config::PackConfig;
pub use creator::PluginPacker;
pub use filters::DEFAULT_EXCLUDES;
pub use filters::ExclusionSet;
pub use filters::normalize_entry_name;
pub use filters::normalize_entry_str;
pub use report::PackReport;
pub use source::MANIFEST_FILE;
pub use source::SourceDir;
pub use walker::PackEntry;
pub use writer::pack_plugin;
pub use writer::pack_plugin_with_progress;
