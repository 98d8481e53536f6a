//! HTTP route definitions.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::http::handlers::{health_check, run_probe, service_info};
use crate::state::AppState;

/// Create the router.
///
/// ```text
/// GET /        - Service description and endpoint index
/// GET /health  - Health check
/// GET /test    - Run the Planner probe
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/test", get(run_probe))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
