pub mod build_config;
pub mod cli;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "series-builder")]
#[command(about = "Segment game logs into series and build list outputs")]
pub struct CliConfig {
    /// Path to the TOML build configuration
    #[arg(short, long, default_value = "configs/series-example.toml")]
    pub config: String,

    /// Override output.path from the configuration
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Show the build plan without generating anything
    #[arg(long)]
    pub dry_run: bool,
}
