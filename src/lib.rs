//! Client-side HTTP retry on internal server errors.
//!
//! The [`resilience`] module holds the retry interceptor: a request whose
//! execution fails with `500 Internal Server Error` is resubmitted unchanged,
//! up to a fixed retry limit; every other failure reaches the caller on first
//! occurrence. Around it live a reqwest transport and login client
//! ([`client`]) and a mock authentication server with seedable fault
//! injection ([`auth`], [`http`]) used to exercise the retry path end to end.

pub mod auth;
pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use client::LoginClient;
pub use config::AppConfig;
pub use http::AuthServer;
pub use lifecycle::Shutdown;
pub use resilience::{Failure, Outcome, Retry, RetryLayer, RetryPolicy};
