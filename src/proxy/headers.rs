//! Outbound request headers and upstream response header filtering.

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Desktop browser identity sent to every upstream.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

pub const ACCEPT_LANGUAGE: &str = "sv-SE,sv;q=0.9,en-US;q=0.8,en;q=0.7";

/// Upstream response headers that are never relayed to the caller.
pub const EXCLUDED_RESPONSE_HEADERS: &[&str] = &[
    "transfer-encoding",
    "connection",
    "access-control-allow-origin",
];

/// The complete, fixed header set of an outbound request.
pub fn outbound_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers
}

pub fn is_excluded(name: &HeaderName) -> bool {
    EXCLUDED_RESPONSE_HEADERS
        .iter()
        .any(|h| name.as_str().eq_ignore_ascii_case(h))
}

/// Copy upstream headers minus the excluded ones, keeping repeated values.
pub fn relayable_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut relayed = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if !is_excluded(name) {
            relayed.append(name.clone(), value.clone());
        }
    }
    relayed
}
