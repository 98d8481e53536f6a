//! Service error types and their HTTP rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use planner_probe_graph::{ApiError, AuthError};

pub const INIT_FAILED_ERROR: &str = "Failed to initialize Microsoft Graph client";
pub const INIT_FAILED_MESSAGE: &str =
    "Check your environment variables and Microsoft 365 credentials";
pub const TEST_FAILED_ERROR: &str = "Test failed";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Credential acquisition or client construction failed.
    #[error("Initialization failed: {0}")]
    Initialization(#[from] AuthError),

    /// The groups call failed.
    #[error("Probe failed: {0}")]
    Probe(#[from] ApiError),
}

/// Error body returned with HTTP 500.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ServiceError {
    pub fn body(&self) -> ErrorBody {
        match self {
            // The cause is already logged; the client gets the generic hint.
            Self::Initialization(_) => ErrorBody {
                error: INIT_FAILED_ERROR.to_string(),
                message: INIT_FAILED_MESSAGE.to_string(),
            },
            Self::Probe(e) => ErrorBody {
                error: TEST_FAILED_ERROR.to_string(),
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.body())).into_response()
    }
}
