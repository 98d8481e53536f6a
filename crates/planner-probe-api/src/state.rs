//! Application state.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::error;

use planner_probe_graph::{AuthError, Connector, PlannerApi};

/// Version reported by `/` and `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// State shared across handlers.
///
/// The Graph client slot is filled at most once. Concurrent first callers
/// wait on the same initialization; a failed attempt leaves the slot empty
/// so the next caller tries again.
pub struct AppState {
    version: String,
    connector: Arc<dyn Connector>,
    client: OnceCell<Arc<dyn PlannerApi>>,
}

impl AppState {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            version: VERSION.to_string(),
            connector,
            client: OnceCell::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    /// The Graph client, connecting first if needed.
    pub async fn planner_client(&self) -> Result<Arc<dyn PlannerApi>, AuthError> {
        self.client
            .get_or_try_init(|| async {
                self.connector.connect().await.map_err(|e| {
                    error!("Failed to initialize Microsoft Graph client: {}", e);
                    e
                })
            })
            .await
            .cloned()
    }

    /// Startup initialization. Failure is logged and swallowed.
    pub async fn warm_up(&self) -> bool {
        self.planner_client().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use planner_probe_graph::{ApiError, Group, Plan, Task};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EmptyPlanner;

    #[async_trait]
    impl PlannerApi for EmptyPlanner {
        async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
            Ok(vec![])
        }
        async fn list_plans(&self, _group_id: &str) -> Result<Vec<Plan>, ApiError> {
            Ok(vec![])
        }
        async fn list_tasks(&self, _plan_id: &str) -> Result<Vec<Task>, ApiError> {
            Ok(vec![])
        }
    }

    /// Fails the first `failures` attempts, then connects.
    struct FlakyConnector {
        failures: usize,
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl Connector for FlakyConnector {
        async fn connect(&self) -> Result<Arc<dyn PlannerApi>, AuthError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                Err(AuthError::Network("unreachable".to_string()))
            } else {
                Ok(Arc::new(EmptyPlanner))
            }
        }
    }

    fn flaky(failures: usize) -> Arc<FlakyConnector> {
        Arc::new(FlakyConnector {
            failures,
            attempts: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_default_version() {
        let state = AppState::new(flaky(0));
        assert_eq!(state.version(), VERSION);
        assert!(!state.is_initialized());

        let state = state.with_version("9.9.9");
        assert_eq!(state.version(), "9.9.9");
    }

    #[tokio::test]
    async fn test_client_initialized_once() {
        let connector = flaky(0);
        let state = AppState::new(connector.clone());

        assert!(state.warm_up().await);
        assert!(state.is_initialized());
        state.planner_client().await.unwrap();
        state.planner_client().await.unwrap();
        assert_eq!(connector.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_init_is_retried() {
        let connector = flaky(1);
        let state = AppState::new(connector.clone());

        assert!(!state.warm_up().await);
        assert!(!state.is_initialized());
        assert!(state.planner_client().await.is_ok());
        assert_eq!(connector.attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_calls_connect_once() {
        let connector = flaky(0);
        let state = Arc::new(AppState::new(connector.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                tokio::spawn(async move { state.planner_client().await.is_ok() })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(connector.attempts.load(Ordering::SeqCst), 1);
    }
}
