//! Packer for `.nbp` plugin packages.
//!
//! A plugin package is a gzip-compressed tar archive of a plugin source
//! directory. `nbpack-core` validates the source, walks it with segment-based
//! exclusions, and writes every remaining regular file in sorted order under
//! a normalized forward-slash name. Packages can be listed and verified
//! without extraction.
//!
//! # Examples
//!
//! ```no_run
//! use nbpack_core::PackConfig;
//! use nbpack_core::pack_plugin;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PackConfig::default().with_extra_excludes(["coverage"]);
//! let report = pack_plugin("plugins/echo", "build/echo.nbp", &config)?;
//! println!("Packed {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod inspection;
pub mod io;
pub mod packing;
pub mod report;

pub use error::PackError;
pub use error::Result;
pub use inspection::PackageListing;
pub use inspection::VerificationReport;
pub use inspection::VerificationStatus;
pub use inspection::list_package;
pub use inspection::verify_package;
pub use packing::ExclusionSet;
pub use packing::PackConfig;
pub use packing::PackReport;
pub use packing::PluginPacker;
pub use packing::pack_plugin;
pub use packing::pack_plugin_with_progress;
pub use report::NoopProgress;
pub use report::ProgressCallback;
