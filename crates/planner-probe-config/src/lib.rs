//! # Planner Probe Config
//!
//! Configuration management for the Planner probe server.
//!
//! Configuration comes from three layers, later layers winning:
//! built-in defaults, an optional TOML file (with `${VAR}` expansion), and
//! the process environment (`MICROSOFT_*` credentials and `PORT`).

mod error;
mod loader;
mod schema;
mod secret;

pub use error::ConfigError;
pub use loader::{ConfigLoader, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_PORT, ENV_TENANT_ID};
pub use schema::*;
pub use secret::SecretString;
