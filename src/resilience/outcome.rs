//! Outcome of a single request execution.

use axum::http::StatusCode;
use thiserror::Error;

/// A classified request failure: the status the upstream answered with and a
/// human readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {reason}")]
pub struct Failure {
    status: StatusCode,
    reason: String,
}

impl Failure {
    pub fn new(status: StatusCode, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    /// Failure carrying the canonical reason phrase of `status`.
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(status, status.canonical_reason().unwrap_or("Unknown Status"))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Either the success payload or the failure produced by one execution.
pub type Outcome<T> = Result<T, Failure>;
