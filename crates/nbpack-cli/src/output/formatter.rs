//! Output formatter trait for CLI results.

use anyhow::Result;
use nbpack_core::PackReport;
use nbpack_core::PackageListing;
use nbpack_core::VerificationReport;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of a pack run
    fn format_pack_result(&self, report: &PackReport) -> Result<()>;

    /// Format package entry names, one per line
    fn format_listing_short(&self, listing: &PackageListing) -> Result<()>;

    /// Format package entries with type, mode and size
    fn format_listing_long(&self, listing: &PackageListing, human_readable: bool) -> Result<()>;

    /// Format a verification report
    fn format_verification_report(&self, report: &VerificationReport) -> Result<()>;

    /// Format a failed operation
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
