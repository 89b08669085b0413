//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "aero",
    about = "Component lifecycle integrity toolkit",
    version
)]
pub struct Cli {
    /// Explicit config file (merged over user and project config).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database path override.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug detail.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a JSON fixture of components with nested histories.
    Import(ImportArgs),
    /// Run the exception detection engine against one component.
    Scan(ScanArgs),
    /// Scan every component and print fleet-wide counts.
    Fleet(FleetArgs),
    /// Score documentation completeness for one component.
    Trace(TraceArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to a JSON array of component records.
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    pub component_id: String,
}

#[derive(Debug, Args)]
pub struct FleetArgs {
    /// Concurrent component scans (defaults from config).
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Debug, Args)]
pub struct TraceArgs {
    pub component_id: String,
}
