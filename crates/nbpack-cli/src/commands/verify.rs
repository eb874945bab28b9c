//! Verify command implementation

use crate::cli::VerifyArgs;
use crate::error::convert_inspect_error;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use nbpack_core::VerificationStatus;
use nbpack_core::verify_package;

pub fn execute(args: &VerifyArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let report =
        verify_package(&args.package).map_err(|e| convert_inspect_error(e, &args.package))?;

    formatter.format_verification_report(&report)?;

    // Warnings still exit 0: a loader accepts the package.
    match report.status {
        VerificationStatus::Pass | VerificationStatus::Warning => Ok(()),
        VerificationStatus::Fail => bail!("Package verification failed: {}", args.package.display()),
    }
}
