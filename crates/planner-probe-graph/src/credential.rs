//! Client-credential token acquisition.

use tracing::debug;
use zeroize::Zeroizing;

use planner_probe_config::{
    ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_TENANT_ID, GraphConfig, SecretString,
};

use crate::error::{AuthError, authority_error_message};
use crate::token::{AccessToken, TokenResponse};

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Application identity registered with the tenant.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
    pub tenant_id: String,
}

impl ClientCredentials {
    /// Extract credentials, failing on the first blank field.
    pub fn from_config(config: &GraphConfig) -> Result<Self, AuthError> {
        if let Some(name) = config.missing_required().first().copied() {
            return Err(AuthError::MissingCredential(name));
        }
        match (&config.client_id, &config.client_secret, &config.tenant_id) {
            (Some(client_id), Some(client_secret), Some(tenant_id)) => Ok(Self {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                tenant_id: tenant_id.clone(),
            }),
            (None, _, _) => Err(AuthError::MissingCredential(ENV_CLIENT_ID)),
            (_, None, _) => Err(AuthError::MissingCredential(ENV_CLIENT_SECRET)),
            (_, _, None) => Err(AuthError::MissingCredential(ENV_TENANT_ID)),
        }
    }
}

/// Exchanges client credentials for a bearer token at
/// `{authority}/{tenant}/oauth2/v2.0/token`.
///
/// Every call hits the network; nothing is cached and nothing is retried.
pub struct ClientCredentialProvider {
    http: reqwest::Client,
    token_endpoint: String,
    credentials: ClientCredentials,
    scope: String,
}

impl ClientCredentialProvider {
    pub fn new(credentials: ClientCredentials) -> Self {
        Self::with_authority(credentials, DEFAULT_AUTHORITY_HOST)
    }

    /// Use a custom authority host (sovereign clouds, tests).
    pub fn with_authority(credentials: ClientCredentials, authority_host: &str) -> Self {
        let token_endpoint = format!(
            "{}/{}/oauth2/v2.0/token",
            authority_host.trim_end_matches('/'),
            credentials.tenant_id
        );
        Self {
            http: reqwest::Client::new(),
            token_endpoint,
            credentials,
            scope: DEFAULT_SCOPE.to_string(),
        }
    }

    /// Replace the requested scopes. An empty list keeps the current scope.
    pub fn with_scopes(mut self, scopes: &[String]) -> Self {
        if !scopes.is_empty() {
            self.scope = scopes.join(" ");
        }
        self
    }

    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub async fn acquire_token(&self) -> Result<AccessToken, AuthError> {
        debug!(endpoint = %self.token_endpoint, "Requesting client-credential token");

        let secret = Zeroizing::new(self.credentials.client_secret.expose().to_owned());
        let fields = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", secret.as_str()),
            ("scope", self.scope.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&fields)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: authority_error_message(&body),
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        if let Some(token_type) = &token.token_type {
            if !token_type.eq_ignore_ascii_case("bearer") {
                return Err(AuthError::UnsupportedTokenType(token_type.clone()));
            }
        }

        debug!(expires_in = ?token.expires_in, "Token acquired");
        Ok(AccessToken::new(token.access_token, token.expires_in))
    }
}

#[cfg(test)]
#[path = "credential_tests.rs"]
mod tests;
