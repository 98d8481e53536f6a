    use super::*;
    use crate::planner::{Group, Plan, Task};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    /// Scripted Planner backend that records every call.
    struct FakePlanner {
        groups: Result<Vec<&'static str>, u16>,
        plans: Result<Vec<&'static str>, u16>,
        tasks: Result<Vec<&'static str>, u16>,
        calls: Mutex<Vec<String>>,
    }

    impl FakePlanner {
        fn new(
            groups: Result<Vec<&'static str>, u16>,
            plans: Result<Vec<&'static str>, u16>,
            tasks: Result<Vec<&'static str>, u16>,
        ) -> Self {
            Self {
                groups,
                plans,
                tasks,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn scripted<T>(
        result: &Result<Vec<&'static str>, u16>,
        make: fn(String) -> T,
    ) -> Result<Vec<T>, ApiError> {
        match result {
            Ok(ids) => Ok(ids.iter().map(|id| make(id.to_string())).collect()),
            Err(status) => Err(ApiError::Status {
                status: *status,
                message: "Forbidden".to_string(),
            }),
        }
    }

    #[async_trait]
    impl PlannerApi for FakePlanner {
        async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
            self.record("groups".to_string());
            scripted(&self.groups, |id| Group { id })
        }

        async fn list_plans(&self, group_id: &str) -> Result<Vec<Plan>, ApiError> {
            self.record(format!("plans:{}", group_id));
            scripted(&self.plans, |id| Plan { id })
        }

        async fn list_tasks(&self, plan_id: &str) -> Result<Vec<Task>, ApiError> {
            self.record(format!("tasks:{}", plan_id));
            scripted(&self.tasks, |id| Task { id })
        }
    }

    #[tokio::test]
    async fn test_full_walk_uses_first_ids() {
        let fake = FakePlanner::new(
            Ok(vec!["g1", "g2"]),
            Ok(vec!["p1", "p2", "p3"]),
            Ok(vec!["t1"]),
        );
        let report = ProbeSequence::new(&fake).run().await.unwrap();

        assert_eq!(report.groups, 2);
        assert_eq!(report.plans, StageOutcome::Found(3));
        assert_eq!(report.tasks, StageOutcome::Found(1));
        assert!(!report.has_warnings());
        assert_eq!(fake.calls(), vec!["groups", "plans:g1", "tasks:p1"]);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_zero_groups_stops_early() {
        let fake = FakePlanner::new(Ok(vec![]), Ok(vec!["p1"]), Ok(vec!["t1"]));
        let report = ProbeSequence::new(&fake).run().await.unwrap();

        assert_eq!(report.groups, 0);
        assert_eq!(report.plans, StageOutcome::Skipped);
        assert_eq!(report.tasks, StageOutcome::Skipped);
        assert_eq!(fake.calls(), vec!["groups"]);
        assert!(logs_contain("Found 0 groups"));
        assert!(!logs_contain("Testing: Get plans"));
    }

    #[tokio::test]
    async fn test_zero_plans_skips_tasks() {
        let fake = FakePlanner::new(Ok(vec!["g1"]), Ok(vec![]), Ok(vec!["t1"]));
        let report = ProbeSequence::new(&fake).run().await.unwrap();

        assert_eq!(report.plans, StageOutcome::Found(0));
        assert_eq!(report.tasks, StageOutcome::Skipped);
        assert_eq!(fake.calls(), vec!["groups", "plans:g1"]);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_groups_failure_is_fatal() {
        let fake = FakePlanner::new(Err(401), Ok(vec!["p1"]), Ok(vec!["t1"]));
        let err = ProbeSequence::new(&fake).run().await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(fake.calls(), vec!["groups"]);
        assert!(logs_contain("Planner API test failed"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_plans_failure_is_soft() {
        let fake = FakePlanner::new(Ok(vec!["g1"]), Err(403), Ok(vec!["t1"]));
        let report = ProbeSequence::new(&fake).run().await.unwrap();

        assert!(report.plans.is_failed());
        assert_eq!(report.tasks, StageOutcome::Skipped);
        assert!(report.has_warnings());
        assert_eq!(fake.calls(), vec!["groups", "plans:g1"]);
        assert!(logs_contain("Could not access plans"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_tasks_failure_is_soft() {
        let fake = FakePlanner::new(Ok(vec!["g1"]), Ok(vec!["p1"]), Err(404));
        let report = ProbeSequence::new(&fake).run().await.unwrap();

        assert_eq!(report.plans, StageOutcome::Found(1));
        assert!(report.tasks.is_failed());
        assert!(report.has_warnings());
        assert!(logs_contain("Could not access tasks"));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(ProbeStage::FetchGroups.to_string(), "groups");
        assert_eq!(ProbeStage::FetchPlans.to_string(), "plans");
        assert_eq!(ProbeStage::FetchTasks.to_string(), "tasks");
    }
