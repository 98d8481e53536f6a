//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;
use crate::secret::SecretString;

pub const ENV_CLIENT_ID: &str = "MICROSOFT_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "MICROSOFT_CLIENT_SECRET";
pub const ENV_TENANT_ID: &str = "MICROSOFT_TENANT_ID";
pub const ENV_PORT: &str = "PORT";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        let mut config = Config::default();
        Self::apply_env(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Overlay credential and port variables resolved through `lookup`.
    ///
    /// Unset or empty variables leave the existing value untouched.
    pub fn apply_env<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(client_id) = get(ENV_CLIENT_ID) {
            config.graph.client_id = Some(client_id);
        }
        if let Some(secret) = get(ENV_CLIENT_SECRET) {
            config.graph.client_secret = Some(SecretString::new(secret));
        }
        if let Some(tenant_id) = get(ENV_TENANT_ID) {
            config.graph.tenant_id = Some(tenant_id);
        }
        if let Some(port) = get(ENV_PORT) {
            config.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_PORT.to_string(),
                message: format!("'{}' is not a valid port number", port),
            })?;
        }

        Ok(())
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        Self::expand_with(content, |name| std::env::var(name).ok())
    }

    fn expand_with<F>(content: &str, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::InvalidValue {
            field: "pattern".to_string(),
            message: e.to_string(),
        })?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value =
                lookup(var_name).ok_or_else(|| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }
}
