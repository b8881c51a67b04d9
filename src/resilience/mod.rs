//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Caller request:
//!     → layer.rs (tower stage wrapping the transport)
//!     → retries.rs (classify each outcome, resubmit on 500 while budget remains)
//!     → outcome.rs (final Outcome handed back to the caller)
//! ```
//!
//! # Design Decisions
//! - Only 500 Internal Server Error is retried
//! - The request is cloned per attempt, never modified
//! - Policy is fixed at construction; no state is shared between requests

pub mod layer;
pub mod outcome;
pub mod retries;

pub use layer::{Retry, RetryLayer};
pub use outcome::{Failure, Outcome};
pub use retries::{is_retryable, RetryPolicy};
