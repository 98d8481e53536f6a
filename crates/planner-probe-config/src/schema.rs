//! Configuration schema definitions.

use serde::Deserialize;
use std::path::PathBuf;

use crate::loader::{ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_TENANT_ID};
use crate::secret::SecretString;

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub graph: GraphConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Microsoft identity platform and Graph settings.
///
/// The three credential fields are optional so that the server can start
/// (and report what is missing) without them.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    pub client_secret: Option<SecretString>,

    #[serde(default)]
    pub tenant_id: Option<String>,

    /// Identity authority host, without the tenant segment.
    #[serde(default = "default_authority_host")]
    pub authority_host: String,

    /// Graph API root including the version segment.
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,

    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            tenant_id: None,
            authority_host: default_authority_host(),
            graph_base_url: default_graph_base_url(),
            scopes: default_scopes(),
        }
    }
}

impl GraphConfig {
    /// Names of the required environment variables with no usable value,
    /// in declaration order. Empty values count as missing.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(self.client_id.as_deref()) {
            missing.push(ENV_CLIENT_ID);
        }
        if is_blank(self.client_secret.as_ref().map(SecretString::expose)) {
            missing.push(ENV_CLIENT_SECRET);
        }
        if is_blank(self.tenant_id.as_deref()) {
            missing.push(ENV_TENANT_ID);
        }
        missing
    }

    pub fn has_credentials(&self) -> bool {
        self.missing_required().is_empty()
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

fn default_authority_host() -> String {
    "https://login.microsoftonline.com".to_string()
}

fn default_graph_base_url() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}

fn default_scopes() -> Vec<String> {
    vec!["https://graph.microsoft.com/.default".to_string()]
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily-rotated log files. Console only when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
