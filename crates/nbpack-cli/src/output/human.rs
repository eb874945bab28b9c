//! Human-readable output formatter with colors and styling.

use super::format_size;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use nbpack_core::PackReport;
use nbpack_core::PackageListing;
use nbpack_core::VerificationReport;
use nbpack_core::VerificationStatus;
use nbpack_core::inspection::IssueSeverity;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            self.line(&format!(
                "{} Plugin packed: {}",
                style("✓").green().bold(),
                report.output.display()
            ));
        } else {
            self.line(&format!("Plugin packed: {}", report.output.display()));
        }

        self.line("");
        self.line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        self.line(&format!(
            "  Total size:       {}",
            format_size(report.bytes_written)
        ));
        self.line(&format!(
            "  Package size:     {}",
            format_size(report.bytes_compressed)
        ));

        if self.verbose {
            self.line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
            self.line(&format!("  Paths excluded:   {}", report.paths_excluded));
            self.line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.has_warnings() {
            self.line("");
            if self.use_colors {
                self.line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.line("Warnings:");
            }
            for warning in &report.warnings {
                self.line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_listing_short(&self, listing: &PackageListing) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &listing.entries {
            self.line(&entry.name);
        }

        Ok(())
    }

    fn format_listing_long(&self, listing: &PackageListing, human_readable: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &listing.entries {
            let size_str = if human_readable {
                format_size(entry.size)
            } else {
                entry.size.to_string()
            };

            let mode_str = entry
                .mode
                .map_or_else(|| "-".to_string(), |m| format!("{m:o}"));

            self.line(&format!(
                "{}{:<6} {:>10}  {}",
                entry.kind.marker(),
                mode_str,
                size_str,
                entry.name
            ));
        }

        self.line("");
        self.line(&format!(
            "Total: {} entries, {}",
            Self::format_number(listing.total_entries),
            format_size(listing.total_size)
        ));

        Ok(())
    }

    fn format_verification_report(&self, report: &VerificationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let status_str = match report.status {
                VerificationStatus::Pass => style("PASSED").green().bold(),
                VerificationStatus::Warning => style("WARNING").yellow().bold(),
                VerificationStatus::Fail => style("FAILED").red().bold(),
            };
            self.line(&format!("Package verification: {status_str}"));
        } else {
            self.line(&format!("Package verification: {}", report.status));
        }

        if let Some(id) = &report.plugin_id {
            self.line(&format!("  Plugin id: {id}"));
        }
        self.line(&format!(
            "  Total entries: {}",
            Self::format_number(report.total_entries)
        ));
        self.line(&format!(
            "  Total size: {}",
            format_size(report.total_size)
        ));

        if !report.issues.is_empty() {
            self.line("");
            self.line("Issues:");

            for issue in &report.issues {
                let severity_str = if self.use_colors {
                    match issue.severity {
                        IssueSeverity::Critical => style("CRITICAL").red().bold().to_string(),
                        IssueSeverity::High => style("HIGH").red().to_string(),
                        IssueSeverity::Medium => style("MEDIUM").yellow().to_string(),
                        IssueSeverity::Low => style("LOW").blue().to_string(),
                        IssueSeverity::Info => style("INFO").cyan().to_string(),
                    }
                } else {
                    format!("[{}]", issue.severity)
                };

                self.line(&format!("  {severity_str} {}", issue.message));
            }
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
