//! Turns configuration into a ready Planner client.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use url::Url;

use planner_probe_config::GraphConfig;

use crate::client::GraphClient;
use crate::credential::{ClientCredentialProvider, ClientCredentials};
use crate::error::AuthError;
use crate::planner::PlannerApi;

/// Produces an authenticated [`PlannerApi`].
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn PlannerApi>, AuthError>;
}

/// Acquires a client-credential token and wraps it in a [`GraphClient`].
///
/// Credentials are checked at connect time, not construction time, so a
/// connector can exist before the environment is complete.
pub struct GraphConnector {
    config: GraphConfig,
}

impl GraphConnector {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for GraphConnector {
    async fn connect(&self) -> Result<Arc<dyn PlannerApi>, AuthError> {
        let credentials = ClientCredentials::from_config(&self.config)?;
        let base_url = Url::parse(&self.config.graph_base_url)
            .map_err(|e| AuthError::InvalidEndpoint(format!("{}: {}", self.config.graph_base_url, e)))?;

        let provider = ClientCredentialProvider::with_authority(credentials, &self.config.authority_host)
            .with_scopes(&self.config.scopes);
        let token = provider.acquire_token().await?;
        let client = GraphClient::with_base_url(&token, base_url)?;

        info!("Microsoft Graph client initialized successfully");
        Ok(Arc::new(client))
    }
}
