//! Pack command implementation.

use crate::cli::PackArgs;
use crate::error::convert_pack_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use nbpack_core::NoopProgress;
use nbpack_core::PackConfig;
use nbpack_core::pack_plugin_with_progress;
use tracing::debug;

pub fn execute(args: &PackArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let config = PackConfig::default()
        .with_extra_excludes(&args.exclude)
        .with_compression_level(args.compression_level)
        .with_reproducible(args.reproducible)
        .with_follow_symlinks(args.follow_symlinks)
        .with_atomic(!args.no_atomic);
    debug!(
        src = %args.src.display(),
        out = %args.out.display(),
        excludes = ?config.excludes.iter().collect::<Vec<_>>(),
        "packing plugin"
    );

    let result = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Packing");
        pack_plugin_with_progress(&args.src, &args.out, &config, &mut progress)
    } else {
        let mut noop = NoopProgress;
        pack_plugin_with_progress(&args.src, &args.out, &config, &mut noop)
    };
    let report = result.map_err(|e| convert_pack_error(e, &args.src))?;

    formatter.format_pack_result(&report)?;

    Ok(())
}
