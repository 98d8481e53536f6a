//! Probe server.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use planner_probe_config::ServerConfig;

use crate::http::routes::create_router;
use crate::state::AppState;

pub struct ProbeServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl ProbeServer {
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    pub async fn bind(&self) -> Result<TcpListener, Box<dyn std::error::Error>> {
        let addr: SocketAddr = self.addr().parse()?;
        Ok(TcpListener::bind(addr).await?)
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(
        &self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let port = listener.local_addr()?.port();
        info!("Server running on http://localhost:{}", port);
        info!("Test endpoints:");
        info!("   - Health: http://localhost:{}/health", port);
        info!("   - Test: http://localhost:{}/test", port);

        let app = create_router(self.state.clone());
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await?;
        info!("Shutting down Microsoft Planner Integration Server");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available: run until the process is killed.
        std::future::pending::<()>().await;
    }
}
