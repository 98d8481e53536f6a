//! Startup logic for the Planner probe.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use planner_probe_api::{AppState, ProbeServer};
use planner_probe_config::{Config, ConfigError, ConfigLoader, GraphConfig, LoggingConfig};
use planner_probe_graph::GraphConnector;

use crate::cli::Cli;

/// Outcome of loading the `.env` file, reported once tracing is up.
#[derive(Debug)]
pub(crate) enum EnvFile {
    Loaded,
    Missing,
    Invalid(String),
}

pub(crate) fn load_env_file(path: &Path) -> EnvFile {
    match dotenvy::from_path(path) {
        Ok(()) => EnvFile::Loaded,
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => EnvFile::Missing,
        Err(e) => EnvFile::Invalid(e.to_string()),
    }
}

/// Config file (or defaults), then environment, then CLI flags.
pub(crate) fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => Config::default(),
    };
    ConfigLoader::apply_env(&mut config, |name| std::env::var(name).ok())?;

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    Ok(config)
}

/// Initialize tracing with console output and, when configured, a daily
/// rotated log file.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;

    let file_layer = match &logging.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("planner-probe")
                .filename_suffix("log")
                .max_log_files(30)
                .build(log_dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes on drop, so it lives for the whole process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Log each missing required variable and return their names.
pub(crate) fn report_missing_env(graph: &GraphConfig) -> Vec<&'static str> {
    let missing = graph.missing_required();
    if missing.is_empty() {
        info!("All required environment variables found");
    } else {
        warn!("Missing environment variables:");
        for name in &missing {
            warn!("   - {}", name);
        }
        warn!("Create a .env file with your Microsoft 365 credentials");
    }
    missing
}

/// Build the server, connecting to Graph up front when credentials exist.
///
/// Missing credentials or a failed connection never prevent startup; `/test`
/// retries the connection on demand.
pub(crate) async fn prepare_server(config: Config) -> ProbeServer {
    info!("Starting Microsoft Planner Integration Server");
    info!("Version: {}", planner_probe_api::VERSION);

    let missing = report_missing_env(&config.graph);
    let state = Arc::new(AppState::new(Arc::new(GraphConnector::new(config.graph))));

    if missing.is_empty() && !state.warm_up().await {
        warn!("Continuing without a Graph client; /test will retry initialization");
    }

    ProbeServer::new(config.server, state)
}

/// Run the server in foreground.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let server = prepare_server(config).await;
    server.run().await
}
