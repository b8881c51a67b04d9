//! Login request and rejection types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Login request body. Missing fields are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Reasons a login is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Injected fault simulating an unreliable upstream.
    #[error("We don't know what happened")]
    RandomFault,

    #[error("This email is not valid")]
    InvalidEmail,

    #[error("This password is not valid")]
    InvalidPassword,

    #[error("An account was not found for this email and password")]
    FailedAuthentication,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::RandomFault => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::InvalidEmail | AuthError::InvalidPassword => StatusCode::BAD_REQUEST,
            AuthError::FailedAuthentication => StatusCode::UNAUTHORIZED,
        }
    }
}

/// JSON body of every rejected login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
