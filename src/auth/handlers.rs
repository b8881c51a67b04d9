use std::sync::Arc;

use axum::{extract::State, Json};

use crate::auth::authenticate::authenticate;
use crate::auth::faults::FaultInjector;
use crate::auth::types::{AuthError, Credentials};
use crate::observability::metrics;

/// Shared state of the authentication routes.
#[derive(Clone)]
pub struct AuthState {
    pub faults: Arc<dyn FaultInjector>,
}

impl AuthState {
    pub fn new(faults: Arc<dyn FaultInjector>) -> Self {
        Self { faults }
    }
}

/// `POST /login`. Answers `null` on success.
pub async fn login(
    State(state): State<AuthState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<()>, AuthError> {
    match authenticate(&credentials, state.faults.as_ref()) {
        Ok(()) => {
            metrics::record_login(200);
            tracing::debug!(email = %credentials.email, "Login accepted");
            Ok(Json(()))
        }
        Err(e) => {
            metrics::record_login(e.status().as_u16());
            tracing::info!(email = %credentials.email, status = %e.status(), error = %e, "Login rejected");
            Err(e)
        }
    }
}
