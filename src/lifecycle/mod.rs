//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     Auth server → stop accepting, drain in-flight requests
//!     Login client → abandon the logical request, no further retries
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
