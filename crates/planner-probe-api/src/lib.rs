//! # Planner Probe API
//!
//! HTTP front for the Planner probe.
//!
//! ```text
//! GET /        service description
//! GET /health  liveness with timestamp and version
//! GET /test    lazily connect to Graph, then run the groups → plans → tasks probe
//! ```
//!
//! Handlers receive an [`AppState`] through axum's `State` extractor. The
//! Graph client lives in that state and is initialized at most once.

pub mod error;
pub mod http;
pub mod server;
pub mod state;

#[cfg(test)]
mod testing;

pub use error::ServiceError;
pub use http::routes::create_router;
pub use server::ProbeServer;
pub use state::{AppState, VERSION};
