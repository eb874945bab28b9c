//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nbpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a plugin directory into a .nbp package
    Pack(PackArgs),
    /// List package contents without extraction
    List(ListArgs),
    /// Check that a package is loadable
    Verify(VerifyArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Pack(_) => "pack",
            Self::List(_) => "list",
            Self::Verify(_) => "verify",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct PackArgs {
    /// Plugin source directory (must contain manifest.json)
    #[arg(long, value_name = "DIR")]
    pub src: PathBuf,

    /// Output package path
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,

    /// Extra path segment to exclude (can be repeated)
    #[arg(long = "exclude", short = 'x', value_name = "SEGMENT")]
    pub exclude: Vec<String>,

    /// Compression level (1-9)
    #[arg(
        short = 'l',
        long,
        default_value_t = 6,
        value_parser = clap::value_parser!(u8).range(1..=9)
    )]
    pub compression_level: u8,

    /// Normalize timestamps and ownership for byte-identical output
    #[arg(long)]
    pub reproducible: bool,

    /// Archive symlink targets instead of skipping symlinks
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Write the output file in place instead of through a temporary file
    #[arg(long)]
    pub no_atomic: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the package file
    #[arg(value_name = "PACKAGE")]
    pub package: PathBuf,

    /// Show detailed entry information
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Path to the package file
    #[arg(value_name = "PACKAGE")]
    pub package: PathBuf,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
