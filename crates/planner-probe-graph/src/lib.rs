//! # Planner Probe Graph
//!
//! Client-credential authentication against the Microsoft identity platform
//! and a narrow client for the Graph Planner resources.
//!
//! ```text
//! ClientCredentialProvider ──token──▶ GraphClient ──PlannerApi──▶ ProbeSequence
//!            ▲                                                        │
//!            └──────────────── GraphConnector (lazy) ◀────────────────┘
//! ```
//!
//! The probe walks groups, then the first group's plans, then the first
//! plan's tasks. Only the groups call is fatal.

pub mod client;
pub mod connector;
pub mod credential;
pub mod error;
pub mod planner;
pub mod probe;
pub mod token;

pub use client::{DEFAULT_GRAPH_BASE_URL, GraphClient};
pub use connector::{Connector, GraphConnector};
pub use credential::{ClientCredentialProvider, ClientCredentials, DEFAULT_AUTHORITY_HOST, DEFAULT_SCOPE};
pub use error::{ApiError, AuthError};
pub use planner::{Group, Plan, PlannerApi, Task};
pub use probe::{ProbeReport, ProbeSequence, ProbeStage, StageOutcome};
pub use token::AccessToken;
