//! Proxy error taxonomy and its mapping onto responses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::error::Error as StdError;
use thiserror::Error;

/// Ways a proxied request can fail. Each one ends the request; none is retried.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Decoded target does not start with `http`. No upstream contact made.
    #[error("Invalid target URL")]
    InvalidTarget,

    /// Query endpoint called without a usable `url` parameter.
    #[error("Missing url parameter")]
    MissingTarget,

    /// Upstream answered with a 4xx/5xx status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// Resolution, connection, TLS, timeout or body read failure.
    #[error("{0}")]
    Transport(String),
}

impl ProxyError {
    /// Classify a client error: status errors keep their code, everything
    /// else is a transport failure.
    pub fn from_client(err: &reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Upstream {
                status,
                message: err.to_string(),
            },
            None => Self::Transport(error_chain(err)),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidTarget | Self::MissingTarget => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => *status,
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Render an error and its sources as `outer: inner: root`.
///
/// reqwest wraps the interesting part (e.g. "Connection refused") several
/// sources deep.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}
