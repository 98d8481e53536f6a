//! Identity and Graph error types.

use serde::Deserialize;
use thiserror::Error;

/// Failure to obtain or use a credential.
///
/// Secret values never appear in the formatted output.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required credential is absent; carries the environment variable name.
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// The identity authority rejected the client credentials.
    #[error("Token request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Transport failure while talking to the authority.
    #[error("Token request failed: {0}")]
    Network(String),

    /// The authority answered 2xx with an unusable body.
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported token type: {0}")]
    UnsupportedTokenType(String),

    /// The token cannot be carried in an HTTP header.
    #[error("Access token is not a valid header value")]
    InvalidToken,

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Failure of a Graph API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Graph answered with a non-success status.
    #[error("Graph API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Graph request failed: {0}")]
    Network(String),

    #[error("Failed to decode Graph response: {0}")]
    Decode(String),

    #[error("Invalid Graph URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Deserialize)]
struct GraphErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct AuthorityErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Message from a Graph `{"error": {"message": ...}}` body, else the raw body.
pub(crate) fn graph_error_message(body: &str) -> String {
    serde_json::from_str::<GraphErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| raw_message(body))
}

/// `error_description`, else `error`, else the raw body.
pub(crate) fn authority_error_message(body: &str) -> String {
    serde_json::from_str::<AuthorityErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error_description.or(parsed.error))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| raw_message(body))
}

fn raw_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.to_string()
    }
}
