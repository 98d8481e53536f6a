//! Bearer token and the token endpoint response.

use serde::Deserialize;

use planner_probe_config::SecretString;

/// Opaque bearer credential held for the lifetime of a client.
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: SecretString,
    expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_in: Option<u64>) -> Self {
        Self {
            secret: SecretString::new(value),
            expires_in,
        }
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.secret.expose()
    }

    /// Lifetime in seconds as reported by the authority. Informational only.
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }
}

/// Deserialized token endpoint response.
///
/// Only the fields the client credentials flow needs. Not `Serialize`, so
/// the token cannot be dumped by accident.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}
