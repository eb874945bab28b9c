//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use nbpack_core::PackReport;
use nbpack_core::PackageListing;
use nbpack_core::VerificationReport;
use nbpack_core::inspection::EntryKind;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PackOutput<'a> {
    output_path: String,
    files_added: usize,
    paths_excluded: usize,
    symlinks_skipped: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    duration_ms: u128,
    entries: &'a [String],
    warnings: &'a [String],
}

impl<'a> From<&'a PackReport> for PackOutput<'a> {
    fn from(report: &'a PackReport) -> Self {
        Self {
            output_path: report.output.display().to_string(),
            files_added: report.files_added,
            paths_excluded: report.paths_excluded,
            symlinks_skipped: report.symlinks_skipped,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
            entries: &report.entries,
            warnings: &report.warnings,
        }
    }
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    name: &'a str,
    kind: &'static str,
    size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<u32>,
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    path: String,
    total_entries: usize,
    total_size: u64,
    entries: Vec<EntryOutput<'a>>,
}

#[derive(Serialize)]
struct IssueOutput<'a> {
    severity: String,
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<&'a str>,
    message: &'a str,
}

#[derive(Serialize)]
struct VerifyOutput<'a> {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    plugin_id: Option<&'a str>,
    total_entries: usize,
    total_size: u64,
    issues: Vec<IssueOutput<'a>>,
}

const fn kind_name(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::File => "file",
        EntryKind::Directory => "directory",
        EntryKind::Symlink => "symlink",
        EntryKind::Hardlink => "hardlink",
        EntryKind::Other => "other",
    }
}

fn listing_output(listing: &PackageListing) -> ListingOutput<'_> {
    ListingOutput {
        path: listing.path.display().to_string(),
        total_entries: listing.total_entries,
        total_size: listing.total_size,
        entries: listing
            .entries
            .iter()
            .map(|e| EntryOutput {
                name: &e.name,
                kind: kind_name(e.kind),
                size: e.size,
                mode: e.mode,
            })
            .collect(),
    }
}

fn verify_output(report: &VerificationReport) -> VerifyOutput<'_> {
    VerifyOutput {
        status: report.status.to_string().to_lowercase(),
        plugin_id: report.plugin_id.as_deref(),
        total_entries: report.total_entries,
        total_size: report.total_size,
        issues: report
            .issues
            .iter()
            .map(|i| IssueOutput {
                severity: i.severity.to_string().to_lowercase(),
                category: i.category.to_string(),
                entry: i.entry.as_deref(),
                message: &i.message,
            })
            .collect(),
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        Self::output(&JsonOutput::success("pack", PackOutput::from(report)))
    }

    fn format_listing_short(&self, listing: &PackageListing) -> Result<()> {
        Self::output(&JsonOutput::success("list", listing_output(listing)))
    }

    fn format_listing_long(&self, listing: &PackageListing, _human_readable: bool) -> Result<()> {
        Self::output(&JsonOutput::success("list", listing_output(listing)))
    }

    fn format_verification_report(&self, report: &VerificationReport) -> Result<()> {
        Self::output(&JsonOutput::success("verify", verify_output(report)))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
