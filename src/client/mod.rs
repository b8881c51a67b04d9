//! HTTP client side of the login exchange.
//!
//! # Data Flow
//! ```text
//! LoginClient::login(credentials)
//!     → request.rs (immutable OutboundRequest)
//!     → resilience::Retry (retry on 500)
//!     → transport.rs (reqwest; non-2xx → Failure)
//! ```

pub mod login;
pub mod request;
pub mod transport;

pub use login::{ClientError, LoginClient};
pub use request::OutboundRequest;
pub use transport::{HttpTransport, Payload};
