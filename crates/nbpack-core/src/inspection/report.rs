//! Package verification report types.

use std::fmt;

/// Overall verdict of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// No issue above `Low`.
    Pass,
    /// At least one `Medium` issue, nothing worse.
    Warning,
    /// At least one `High` or `Critical` issue.
    Fail,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warning => write!(f, "WARNING"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Issue severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueSeverity {
    /// Informational.
    Info,
    /// Unusual but harmless for a loader.
    Low,
    /// Loader may misbehave.
    Medium,
    /// Loader will reject or mis-place content.
    High,
    /// Package is unusable.
    Critical,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// What kind of problem an issue describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCategory {
    /// No `manifest.json` at the package root.
    ManifestMissing,
    /// `manifest.json` is not a JSON object.
    ManifestInvalid,
    /// `manifest.json` has no string `id`.
    ManifestIncomplete,
    /// Entry name a loader cannot place safely.
    UnsafeName,
    /// Same name stored more than once.
    DuplicateEntry,
    /// Entry that is not a regular file.
    NonFileEntry,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ManifestMissing => "manifest_missing",
            Self::ManifestInvalid => "manifest_invalid",
            Self::ManifestIncomplete => "manifest_incomplete",
            Self::UnsafeName => "unsafe_name",
            Self::DuplicateEntry => "duplicate_entry",
            Self::NonFileEntry => "non_file_entry",
        };
        f.write_str(s)
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationIssue {
    /// How bad it is.
    pub severity: IssueSeverity,
    /// What kind of problem it is.
    pub category: IssueCategory,
    /// Entry the issue refers to, if any.
    pub entry: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl VerificationIssue {
    pub(crate) fn new(
        severity: IssueSeverity,
        category: IssueCategory,
        entry: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            entry: entry.map(str::to_string),
            message: message.into(),
        }
    }
}

/// Result of [`verify_package`](crate::inspection::verify_package).
#[derive(Debug, Clone)]
pub struct VerificationReport {
    /// Overall verdict.
    pub status: VerificationStatus,
    /// Findings, most severe first.
    pub issues: Vec<VerificationIssue>,
    /// Number of entries in the package.
    pub total_entries: usize,
    /// Sum of entry sizes.
    pub total_size: u64,
    /// `id` from the manifest, when present.
    pub plugin_id: Option<String>,
}

impl VerificationReport {
    /// Returns `true` unless the status is `Fail`.
    #[must_use]
    pub fn is_loadable(&self) -> bool {
        self.status != VerificationStatus::Fail
    }

    /// Issues at or above `severity`.
    pub fn issues_at_least(
        &self,
        severity: IssueSeverity,
    ) -> impl Iterator<Item = &VerificationIssue> {
        self.issues.iter().filter(move |i| i.severity >= severity)
    }
}

/// Derives the status from the most severe issue.
pub(crate) fn status_for(issues: &[VerificationIssue]) -> VerificationStatus {
    match issues.iter().map(|i| i.severity).max() {
        Some(IssueSeverity::Critical | IssueSeverity::High) => VerificationStatus::Fail,
        Some(IssueSeverity::Medium) => VerificationStatus::Warning,
        _ => VerificationStatus::Pass,
    }
}
