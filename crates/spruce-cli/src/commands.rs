use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "spruce")]
#[command(about = "Project health and automation-pattern scanner", long_about = None)]
pub struct Cli {
    /// Project root directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Emit raw JSON instead of the formatted report
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a full health scan plus pattern detection
    Checkup,
    /// Run a light scan (fingerprint diff only)
    Startup,
    /// Show persisted project state and deferred items
    Status,
    /// Print the effective configuration
    PrintConfig,
}
