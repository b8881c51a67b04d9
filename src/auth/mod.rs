//! Mock authentication service.
//!
//! # Data Flow
//! ```text
//! POST /login {email, password}
//!     → handlers.rs (extract JSON, record metrics)
//!     → faults.rs (maybe inject a 500)
//!     → authenticate.rs (email, password, credential checks)
//!     → 200 null | AuthError rendered as {"error": "..."}
//! ```
//!
//! # Design Decisions
//! - Fault injection is a trait object so tests can script it
//! - Random faults are seedable for reproducible runs

pub mod authenticate;
pub mod faults;
pub mod handlers;
pub mod types;

pub use authenticate::authenticate;
pub use faults::{FaultInjector, NoFaults, RandomFaults};
pub use handlers::AuthState;
pub use types::{AuthError, Credentials};
