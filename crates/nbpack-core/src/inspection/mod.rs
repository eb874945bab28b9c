//! Package inspection without extraction.
//!
//! # Examples
//!
//! ```no_run
//! use nbpack_core::list_package;
//! use nbpack_core::verify_package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let listing = list_package("build/echo.nbp")?;
//! println!("Package contains {} entries", listing.total_entries);
//!
//! let report = verify_package("build/echo.nbp")?;
//! if report.is_loadable() {
//!     println!("Package is loadable");
//! }
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod package;
pub mod report;
pub mod verify;

pub use list::list_package;
pub use package::EntryKind;
pub use package::PackageEntry;
pub use package::PackageListing;
pub use report::IssueCategory;
pub use report::IssueSeverity;
pub use report::VerificationIssue;
pub use report::VerificationReport;
pub use report::VerificationStatus;
pub use verify::verify_package;
