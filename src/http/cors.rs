//! Cross-origin headers and preflight handling.
//!
//! Every response leaves the server through [`finalize`], which sets both
//! CORS headers once. Branches never add them themselves.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";

/// Wrap a router so every response carries the CORS headers exactly once.
///
/// The layers override: a value relayed from upstream is replaced, never
/// duplicated.
pub fn finalize<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
}

/// Answer to an `OPTIONS` request on any path.
pub fn preflight_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
