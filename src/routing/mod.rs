//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query)
//!     → OPTIONS short-circuits before routing (http::cors)
//!     → router.rs: Route::Proxy | Route::QueryProxy | Route::Static
//!     → http::server dispatches to the forwarder or the static files
//! ```
//!
//! # Design Decisions
//! - Deterministic: same input always yields the same route
//! - Prefix matching only, no regex

pub mod router;

pub use router::{static_path, Route, Router, INDEX_PATH, PROXY_PREFIX};
