//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, method dispatch)
//!     → routing (proxy vs static)
//!     → proxy::Forwarder | static_files::StaticFiles
//!     → cors.rs (CORS headers on every response)
//!     → Send to client
//! ```

pub mod cors;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer, ServerError};
