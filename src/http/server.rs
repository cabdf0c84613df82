//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handler
//! - Wire up middleware (tracing, timeout, CORS)
//! - Bind server to listener
//! - Graceful shutdown on Ctrl+C

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::cors::{Policy, PolicyError};
use crate::http::middleware::cors_middleware;

/// Wrap any router with the CORS adapter.
pub fn with_cors<S>(router: Router<S>, policy: Arc<Policy>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(from_fn_with_state(policy, cors_middleware))
}

/// Demo server hosting the CORS adapter.
pub struct HttpServer {
    router: Router,
    policy: Arc<Policy>,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the configured hosts do not form a valid policy.
    pub fn new(config: ServerConfig) -> Result<Self, PolicyError> {
        let policy = Arc::new(config.cors.to_policy()?);

        tracing::info!(rules = policy.len(), allow_credentials = policy.allow_credentials(), "CORS policy loaded");
        for rule in policy.rules() {
            tracing::info!(rule = %rule, "Trusted origin");
        }

        let router = Self::build_router(&config, policy.clone());
        Ok(Self { router, policy, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, policy: Arc<Policy>) -> Router {
        let app = Router::new().route("/test", get(ok_handler));
        with_cors(app, policy)
            .layer(TimeoutLayer::new(Duration::from_secs(config.listener.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn policy(&self) -> &Arc<Policy> {
        &self.policy
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_with_shutdown(listener, shutdown_signal()).await
    }

    /// Run the server until `shutdown` completes.
    pub async fn run_with_shutdown<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn ok_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Ok")
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
