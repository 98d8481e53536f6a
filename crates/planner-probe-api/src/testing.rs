//! Test doubles for the Graph seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use planner_probe_graph::{ApiError, AuthError, Connector, Group, Plan, PlannerApi, Task};

fn forbidden() -> ApiError {
    ApiError::Status {
        status: 403,
        message: "Insufficient privileges to complete the operation.".to_string(),
    }
}

/// Planner backend with fixed record counts; `None` makes that call fail.
pub(crate) struct ScriptedPlanner {
    pub groups: Option<usize>,
    pub plans: Option<usize>,
    pub tasks: Option<usize>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl ScriptedPlanner {
    pub fn new(groups: Option<usize>, plans: Option<usize>, tasks: Option<usize>) -> Self {
        Self {
            groups,
            plans,
            tasks,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn answer<T>(&self, call: &'static str, count: Option<usize>, make: fn(String) -> T) -> Result<Vec<T>, ApiError> {
        self.calls.lock().unwrap().push(call);
        count
            .map(|n| (0..n).map(|i| make(format!("{}-{}", call, i))).collect())
            .ok_or_else(forbidden)
    }
}

#[async_trait]
impl PlannerApi for ScriptedPlanner {
    async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.answer("groups", self.groups, |id| Group { id })
    }

    async fn list_plans(&self, _group_id: &str) -> Result<Vec<Plan>, ApiError> {
        self.answer("plans", self.plans, |id| Plan { id })
    }

    async fn list_tasks(&self, _plan_id: &str) -> Result<Vec<Task>, ApiError> {
        self.answer("tasks", self.tasks, |id| Task { id })
    }
}

/// Hands out a fixed planner, or always fails when `planner` is `None`.
pub(crate) struct ScriptedConnector {
    pub planner: Option<Arc<ScriptedPlanner>>,
    pub attempts: AtomicUsize,
}

impl ScriptedConnector {
    pub fn ok(planner: Arc<ScriptedPlanner>) -> Arc<Self> {
        Arc::new(Self {
            planner: Some(planner),
            attempts: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            planner: None,
            attempts: AtomicUsize::new(0),
        })
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self) -> Result<Arc<dyn PlannerApi>, AuthError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match &self.planner {
            Some(planner) => Ok(planner.clone()),
            None => Err(AuthError::Rejected {
                status: 401,
                message: "AADSTS7000215: Invalid client secret provided.".to_string(),
            }),
        }
    }
}
