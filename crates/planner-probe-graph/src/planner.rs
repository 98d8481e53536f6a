//! Narrow view of the Planner resources.
//!
//! Remote records are owned by Graph. Only `id` is read; every other field
//! is ignored during deserialization.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ApiError;

/// Microsoft 365 group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    pub id: String,
}

/// Planner plan owned by a group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Plan {
    pub id: String,
}

/// Planner task within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Task {
    pub id: String,
}

/// Graph collection envelope (`{"value": [...]}`).
///
/// `value` is required: a success body without it is a decode error, not an
/// empty collection.
#[derive(Debug, Deserialize)]
pub(crate) struct Collection<T> {
    pub value: Vec<T>,
}

/// The three list calls the probe depends on.
#[async_trait]
pub trait PlannerApi: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<Group>, ApiError>;

    async fn list_plans(&self, group_id: &str) -> Result<Vec<Plan>, ApiError>;

    async fn list_tasks(&self, plan_id: &str) -> Result<Vec<Task>, ApiError>;
}
