//! Responses the handler produces itself.

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

/// 501 for methods other than GET, HEAD and OPTIONS.
pub fn unsupported_method(method: &Method) -> Response {
    tracing::warn!(method = %method, "Unsupported method");
    (
        StatusCode::NOT_IMPLEMENTED,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Unsupported method",
    )
        .into_response()
}
