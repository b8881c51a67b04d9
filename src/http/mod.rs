//! HTTP server for the mock authentication service.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout, CORS)
//!     → auth::handlers (POST /login)
//!     → JSON response
//! ```

pub mod server;

pub use server::{AuthServer, LOGIN_ROUTE};
