//! Planner probe - Microsoft Planner integration server
//!
//! Main entry point: loads `.env` and configuration, initializes tracing,
//! then serves `/`, `/health` and `/test`.

mod cli;
mod server;

use clap::Parser;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::server::{EnvFile, init_tracing, load_config, load_env_file, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Must run before the environment is read.
    let env_file = load_env_file(&cli.env_file);
    let config = load_config(&cli)?;

    init_tracing(&config.logging)?;

    match env_file {
        EnvFile::Loaded => debug!("Loaded environment from {}", cli.env_file.display()),
        EnvFile::Missing => debug!("No {} file found", cli.env_file.display()),
        EnvFile::Invalid(e) => warn!("Ignoring {}: {}", cli.env_file.display(), e),
    }

    run_server(config).await
}
