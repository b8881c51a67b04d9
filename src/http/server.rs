//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the login route
//! - Wire up middleware (tracing, request ID, timeout, CORS)
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::post, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{handlers, AuthState, FaultInjector, RandomFaults};
use crate::config::{AppConfig, ServerConfig};
use crate::lifecycle::shutdown::wait_for_trigger;

pub const LOGIN_ROUTE: &str = "/login";

/// HTTP server for the mock authentication endpoint.
pub struct AuthServer {
    router: Router,
    config: ServerConfig,
}

impl AuthServer {
    /// Create a server answering logins with the given fault injector.
    pub fn new(config: ServerConfig, faults: Arc<dyn FaultInjector>) -> Self {
        let router = Self::build_router(&config, AuthState::new(faults));
        Self { router, config }
    }

    /// Create a server with seedable random faults taken from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let faults = RandomFaults::from_config(&config.faults);
        tracing::info!(
            chance = faults.chance(),
            seeded = config.faults.seed.is_some(),
            "Random fault injection configured"
        );
        Self::new(config.server.clone(), Arc::new(faults))
    }

    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AuthState) -> Router {
        Router::new()
            .route(LOGIN_ROUTE, post(handlers::login))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.request_timeout_secs,
            "Auth server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                wait_for_trigger(shutdown).await;
                tracing::info!("Auth server draining");
            })
            .await?;

        tracing::info!("Auth server stopped");
        Ok(())
    }
}
