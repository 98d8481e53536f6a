//! Graph client bound to a single bearer token.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, AuthError, graph_error_message};
use crate::planner::{Collection, Group, Plan, PlannerApi, Task};
use crate::token::AccessToken;

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// HTTP client that injects `Authorization: Bearer <token>` on every call.
///
/// The token is not checked for expiry; an expired or under-privileged token
/// only surfaces as an [`ApiError::Status`] on the first call.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GraphClient {
    pub fn new(token: &AccessToken) -> Result<Self, AuthError> {
        let base_url = Url::parse(DEFAULT_GRAPH_BASE_URL)
            .map_err(|e| AuthError::InvalidEndpoint(e.to_string()))?;
        Self::with_base_url(token, base_url)
    }

    pub fn with_base_url(token: &AccessToken, base_url: Url) -> Result<Self, AuthError> {
        if base_url.cannot_be_a_base() {
            return Err(AuthError::InvalidEndpoint(base_url.to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
            .map_err(|_| AuthError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AuthError::ClientBuild(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_collection<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ApiError> {
        debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: graph_error_message(&body),
            });
        }

        let page: Collection<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(page.value)
    }
}

#[async_trait]
impl PlannerApi for GraphClient {
    async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        let url = self.endpoint(&["groups"])?;
        self.get_collection(url).await
    }

    async fn list_plans(&self, group_id: &str) -> Result<Vec<Plan>, ApiError> {
        let url = self.endpoint(&["groups", group_id, "planner", "plans"])?;
        self.get_collection(url).await
    }

    async fn list_tasks(&self, plan_id: &str) -> Result<Vec<Task>, ApiError> {
        let url = self.endpoint(&["planner", "plans", plan_id, "tasks"])?;
        self.get_collection(url).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
