//! Observability subsystem.
//!
//! Structured `tracing` events from every subsystem, formatted by
//! `tracing-subscriber`. Request/response spans come from `tower_http`'s
//! `TraceLayer` in `http::server`.

pub mod logging;
