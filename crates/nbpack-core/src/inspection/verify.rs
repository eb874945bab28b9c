//! Package verification implementation.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use crate::Result;
use crate::inspection::list::scan_package;
use crate::inspection::package::EntryKind;
use crate::inspection::package::PackageListing;
use crate::inspection::report::IssueCategory;
use crate::inspection::report::IssueSeverity;
use crate::inspection::report::VerificationIssue;
use crate::inspection::report::VerificationReport;
use crate::inspection::report::status_for;
use crate::packing::MANIFEST_FILE;

/// Checks that a package is something a plugin loader can consume.
///
/// Problems with the package content are reported as issues, never as
/// errors. The checks are:
///
/// | Check | Severity |
/// |-------|----------|
/// | no `manifest.json` at the root | Critical |
/// | manifest is not a JSON object | High |
/// | manifest has no string `id` | Medium |
/// | manifest has no string `version` | Info |
/// | absolute, `..`, `\` or `./` entry name | High |
/// | duplicate entry name | Medium |
/// | entry that is not a regular file | Low |
///
/// # Errors
///
/// Returns an error only if the file cannot be opened or is not a readable
/// gzip-compressed tar stream.
///
/// # Examples
///
/// ```no_run
/// use nbpack_core::VerificationStatus;
/// use nbpack_core::verify_package;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = verify_package("build/echo.nbp")?;
/// if report.status == VerificationStatus::Fail {
///     for issue in &report.issues {
///         eprintln!("[{}] {}", issue.severity, issue.message);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub fn verify_package<P: AsRef<Path>>(package: P) -> Result<VerificationReport> {
    let (listing, manifest) = scan_package(package.as_ref(), Some(MANIFEST_FILE))?;

    let mut issues = check_entries(&listing);
    let plugin_id = match manifest {
        Some(bytes) => check_manifest(&bytes, &mut issues),
        None => {
            issues.push(VerificationIssue::new(
                IssueSeverity::Critical,
                IssueCategory::ManifestMissing,
                None,
                format!("{MANIFEST_FILE} not found at package root"),
            ));
            None
        }
    };

    issues.sort_by(|a, b| b.severity.cmp(&a.severity));

    Ok(VerificationReport {
        status: status_for(&issues),
        issues,
        total_entries: listing.total_entries,
        total_size: listing.total_size,
        plugin_id,
    })
}

fn check_entries(listing: &PackageListing) -> Vec<VerificationIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for entry in &listing.entries {
        let name = entry.name.as_str();

        if let Some(reason) = unsafe_name_reason(name) {
            issues.push(VerificationIssue::new(
                IssueSeverity::High,
                IssueCategory::UnsafeName,
                Some(name),
                format!("{reason}: {name}"),
            ));
        }

        if !seen.insert(name) {
            issues.push(VerificationIssue::new(
                IssueSeverity::Medium,
                IssueCategory::DuplicateEntry,
                Some(name),
                format!("duplicate entry: {name}"),
            ));
        }

        if entry.kind != EntryKind::File {
            issues.push(VerificationIssue::new(
                IssueSeverity::Low,
                IssueCategory::NonFileEntry,
                Some(name),
                format!("not a regular file ({:?}): {name}", entry.kind),
            ));
        }
    }

    issues
}

fn unsafe_name_reason(name: &str) -> Option<&'static str> {
    if name.starts_with('/') {
        Some("absolute entry name")
    } else if name.contains('\\') {
        Some("backslash in entry name")
    } else if name.split('/').any(|segment| segment == "..") {
        Some("parent directory reference")
    } else if name.starts_with("./") {
        Some("entry name starts with ./")
    } else {
        None
    }
}

/// Validates the manifest and returns its `id`.
fn check_manifest(bytes: &[u8], issues: &mut Vec<VerificationIssue>) -> Option<String> {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            issues.push(VerificationIssue::new(
                IssueSeverity::High,
                IssueCategory::ManifestInvalid,
                Some(MANIFEST_FILE),
                format!("{MANIFEST_FILE} is not valid JSON: {e}"),
            ));
            return None;
        }
    };

    let Some(object) = value.as_object() else {
        issues.push(VerificationIssue::new(
            IssueSeverity::High,
            IssueCategory::ManifestInvalid,
            Some(MANIFEST_FILE),
            format!("{MANIFEST_FILE} is not a JSON object"),
        ));
        return None;
    };

    if object.get("version").and_then(Value::as_str).is_none() {
        issues.push(VerificationIssue::new(
            IssueSeverity::Info,
            IssueCategory::ManifestIncomplete,
            Some(MANIFEST_FILE),
            format!("{MANIFEST_FILE} has no string \"version\"; updates cannot be compared"),
        ));
    }

    match object.get("id").and_then(Value::as_str) {
        Some(id) => Some(id.to_string()),
        None => {
            issues.push(VerificationIssue::new(
                IssueSeverity::Medium,
                IssueCategory::ManifestIncomplete,
                Some(MANIFEST_FILE),
                format!("{MANIFEST_FILE} has no string \"id\""),
            ));
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::inspection::VerificationStatus;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn package(entries: &[(&str, &str)]) -> NamedTempFile {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::fast()));
        for (name, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_entry_type(tar::EntryType::Regular);
            // Raw path bytes, bypassing the builder's own path checks.
            header.as_old_mut().name[..name.len()].copy_from_slice(name.as_bytes());
            header.set_cksum();
            builder.append(&header, data.as_bytes()).unwrap();
        }
        let bytes = builder.into_inner().unwrap().finish().unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file
    }

    fn categories(report: &VerificationReport) -> Vec<IssueCategory> {
        report.issues.iter().map(|i| i.category).collect()
    }

    #[test]
    fn test_valid_package_passes() {
        let file = package(&[
            ("index.js", "1"),
            ("manifest.json", r#"{"id":"echo","version":"1.0.0"}"#),
        ]);

        let report = verify_package(file.path()).unwrap();

        assert_eq!(report.status, VerificationStatus::Pass);
        assert!(report.issues.is_empty());
        assert_eq!(report.plugin_id.as_deref(), Some("echo"));
        assert_eq!(report.total_entries, 2);
    }

    #[test]
    fn test_missing_manifest_is_critical() {
        let file = package(&[("lib/manifest.json", r#"{"id":"echo","version":"1.0.0"}"#)]);

        let report = verify_package(file.path()).unwrap();

        assert_eq!(report.status, VerificationStatus::Fail);
        assert_eq!(report.issues[0].severity, IssueSeverity::Critical);
        assert_eq!(categories(&report), [IssueCategory::ManifestMissing]);
    }

    #[test]
    fn test_manifest_checks() {
        let file = package(&[("manifest.json", "{not json")]);
        let report = verify_package(file.path()).unwrap();
        assert_eq!(categories(&report), [IssueCategory::ManifestInvalid]);
        assert_eq!(report.status, VerificationStatus::Fail);

        let file = package(&[("manifest.json", "[1, 2]")]);
        let report = verify_package(file.path()).unwrap();
        assert_eq!(categories(&report), [IssueCategory::ManifestInvalid]);

        let file = package(&[("manifest.json", r#"{"id": 7, "version": "1.0.0"}"#)]);
        let report = verify_package(file.path()).unwrap();
        assert_eq!(categories(&report), [IssueCategory::ManifestIncomplete]);
        assert_eq!(report.status, VerificationStatus::Warning);
    }

    #[test]
    fn test_missing_version_is_info() {
        let file = package(&[("manifest.json", r#"{"id":"echo","version":2}"#)]);

        let report = verify_package(file.path()).unwrap();

        assert_eq!(report.status, VerificationStatus::Pass);
        assert_eq!(categories(&report), [IssueCategory::ManifestIncomplete]);
        assert_eq!(report.issues[0].severity, IssueSeverity::Info);
        assert!(report.is_loadable());
        assert_eq!(report.plugin_id.as_deref(), Some("echo"));
    }

    #[test]
    fn test_unsafe_names() {
        let file = package(&[
            ("manifest.json", r#"{"id":"echo","version":"1.0.0"}"#),
            ("./index.js", ""),
            ("lib\\win.js", ""),
            ("a/../../escape", ""),
        ]);

        let report = verify_package(file.path()).unwrap();

        assert_eq!(report.status, VerificationStatus::Fail);
        assert_eq!(
            categories(&report),
            [IssueCategory::UnsafeName; 3],
            "{:?}",
            report.issues
        );
    }

    #[test]
    fn test_unsafe_name_reason() {
        assert!(unsafe_name_reason("/etc/passwd").is_some());
        assert!(unsafe_name_reason("..").is_some());
        assert!(unsafe_name_reason("a/..b/c").is_none());
        assert!(unsafe_name_reason(".env").is_none());
        assert!(unsafe_name_reason("lib/index.js").is_none());
    }

    #[test]
    fn test_duplicates_warn() {
        let file = package(&[
            ("manifest.json", r#"{"id":"echo","version":"1.0.0"}"#),
            ("index.js", "1"),
            ("index.js", "2"),
        ]);

        let report = verify_package(file.path()).unwrap();

        assert_eq!(report.status, VerificationStatus::Warning);
        assert_eq!(categories(&report), [IssueCategory::DuplicateEntry]);
        assert_eq!(report.issues[0].entry.as_deref(), Some("index.js"));
    }

    #[test]
    fn test_directory_entry_is_low() {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::fast()));
        let manifest = br#"{"id":"echo","version":"1.0.0"}"#;
        let mut header = tar::Header::new_gnu();
        header.set_size(manifest.len() as u64);
        header.set_entry_type(tar::EntryType::Regular);
        builder
            .append_data(&mut header, "manifest.json", &manifest[..])
            .unwrap();
        let mut dir = tar::Header::new_gnu();
        dir.set_entry_type(tar::EntryType::Directory);
        dir.set_size(0);
        builder.append_data(&mut dir, "lib/", std::io::empty()).unwrap();
        let bytes = builder.into_inner().unwrap().finish().unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let report = verify_package(file.path()).unwrap();

        assert_eq!(report.status, VerificationStatus::Pass);
        assert_eq!(categories(&report), [IssueCategory::NonFileEntry]);
    }
}
