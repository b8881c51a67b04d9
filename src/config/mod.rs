//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → command line flags override individual fields
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; the retry limit is fixed afterwards
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::AppConfig;
pub use schema::{ClientConfig, FaultConfig, ObservabilityConfig, RetryConfig, ServerConfig};
pub use validation::ValidationError;
