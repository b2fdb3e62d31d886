//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect a query endpoint that would shadow the `/proxy/` prefix or the index
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::routing::{INDEX_PATH, PROXY_PREFIX};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("static_files.root '{0}' is not a directory")]
    MissingRoot(String),

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error(
        "proxy.query_endpoint '{0}' must start with '/', not overlap '/proxy/' \
         and not be '/' or '/index.html'"
    )]
    InvalidQueryEndpoint(String),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if !config.static_files.root.is_dir() {
        errors.push(ValidationError::MissingRoot(
            config.static_files.root.display().to_string(),
        ));
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if let Some(endpoint) = &config.proxy.query_endpoint {
        let shadows_index = endpoint == "/" || endpoint == INDEX_PATH;
        if !endpoint.starts_with('/') || endpoint.starts_with(PROXY_PREFIX) || shadows_index {
            errors.push(ValidationError::InvalidQueryEndpoint(endpoint.clone()));
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
