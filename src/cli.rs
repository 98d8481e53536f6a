//! CLI definitions for the Planner probe.

use std::path::PathBuf;

use clap::Parser;

/// Planner probe CLI.
#[derive(Debug, Parser)]
#[command(name = "planner-probe")]
#[command(about = "Microsoft Planner integration probe server")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "PLANNER_PROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Environment file loaded before the process environment is read
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Server host (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Server port (overrides the config file and PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}
