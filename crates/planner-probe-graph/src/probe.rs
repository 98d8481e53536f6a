//! Groups → plans → tasks probe.
//!
//! The sequence is linear. Each stage runs only when the previous one
//! returned at least one record, and always uses the first record's id.
//!
//! Failure semantics are asymmetric: a groups failure aborts the probe,
//! while plan and task failures are logged as warnings and the probe still
//! completes.

use std::fmt;

use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::planner::PlannerApi;

/// Stage of the probe state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStage {
    FetchGroups,
    FetchPlans,
    FetchTasks,
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FetchGroups => "groups",
            Self::FetchPlans => "plans",
            Self::FetchTasks => "tasks",
        };
        f.write_str(name)
    }
}

/// Result of a soft-fail stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// The previous stage returned nothing, so this one never ran.
    Skipped,
    Found(usize),
    Failed(String),
}

impl StageOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What the probe observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub groups: usize,
    pub plans: StageOutcome,
    pub tasks: StageOutcome,
}

impl ProbeReport {
    /// True when a plan or task call failed and was downgraded to a warning.
    pub fn has_warnings(&self) -> bool {
        self.plans.is_failed() || self.tasks.is_failed()
    }
}

pub struct ProbeSequence<'a> {
    api: &'a dyn PlannerApi,
}

impl<'a> ProbeSequence<'a> {
    pub fn new(api: &'a dyn PlannerApi) -> Self {
        Self { api }
    }

    pub async fn run(&self) -> Result<ProbeReport, ApiError> {
        info!("Testing Microsoft Planner API");

        info!(stage = %ProbeStage::FetchGroups, "Testing: Get groups");
        let groups = self.api.list_groups().await.map_err(|e| {
            error!("Planner API test failed: {}", e);
            e
        })?;
        info!("Found {} groups", groups.len());

        let mut report = ProbeReport {
            groups: groups.len(),
            plans: StageOutcome::Skipped,
            tasks: StageOutcome::Skipped,
        };

        let Some(group) = groups.first() else {
            return Ok(report);
        };

        info!(stage = %ProbeStage::FetchPlans, "Testing: Get plans from group {}", group.id);
        let plans = match self.api.list_plans(&group.id).await {
            Ok(plans) => plans,
            Err(e) => {
                warn!("Could not access plans: {}", e);
                report.plans = StageOutcome::Failed(e.to_string());
                return Ok(report);
            }
        };
        info!("Found {} plans in group", plans.len());
        report.plans = StageOutcome::Found(plans.len());

        let Some(plan) = plans.first() else {
            return Ok(report);
        };

        info!(stage = %ProbeStage::FetchTasks, "Testing: Get tasks from plan {}", plan.id);
        report.tasks = match self.api.list_tasks(&plan.id).await {
            Ok(tasks) => {
                info!("Found {} tasks in plan", tasks.len());
                StageOutcome::Found(tasks.len())
            }
            Err(e) => {
                warn!("Could not access tasks: {}", e);
                StageOutcome::Failed(e.to_string())
            }
        };

        Ok(report)
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
