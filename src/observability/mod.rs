//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Retry interceptor, auth server:
//!     → logging.rs (structured log events)
//!     → metrics.rs (retry and login counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
