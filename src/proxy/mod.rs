//! Proxy forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! raw target from routing
//!     → target.rs (percent-decode, `http` prefix check)
//!     → forwarder.rs (GET with fixed headers, follow redirects, buffer body)
//!     → headers.rs (drop Transfer-Encoding, Connection, upstream ACAO)
//!     → response to caller, or error.rs mapping on failure
//! ```

pub mod error;
pub mod forwarder;
pub mod headers;
pub mod target;

pub use error::ProxyError;
pub use forwarder::{Forwarder, UpstreamResponse};
pub use target::TargetUrl;
