//! List command implementation

use crate::cli::ListArgs;
use crate::error::convert_inspect_error;
use crate::output::OutputFormatter;
use anyhow::Result;
use nbpack_core::list_package;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let listing =
        list_package(&args.package).map_err(|e| convert_inspect_error(e, &args.package))?;

    if args.long {
        formatter.format_listing_long(&listing, args.human_readable)?;
    } else {
        formatter.format_listing_short(&listing)?;
    }

    Ok(())
}
