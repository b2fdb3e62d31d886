//! Route classification.
//!
//! # Responsibilities
//! - Decide between the proxy branch and the static branch
//! - Extract the raw target from `/proxy/<target>`
//! - Extract the `url` parameter for the optional query endpoint
//! - Rewrite `/` to the index document for static serving
//!
//! # Design Decisions
//! - Pure functions over `&str`: no request types, trivially testable
//! - The proxy prefix is matched against path *and* query, so a target's own
//!   query string rides along inside the raw target
//! - Static classification looks at the path only

/// Literal prefix introducing a proxied target.
pub const PROXY_PREFIX: &str = "/proxy/";

/// Document served for `/`.
pub const INDEX_PATH: &str = "/index.html";

/// Outcome of routing a request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Forward to the raw, still percent-encoded target.
    Proxy { raw_target: String },

    /// Forward to the target taken from the `url` query parameter. `None`
    /// when the parameter is absent or empty.
    QueryProxy { target: Option<String> },

    /// Serve from the static root.
    Static,
}

/// Compiled routing table. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct Router {
    query_endpoint: Option<String>,
}

impl Router {
    /// Create a router; `query_endpoint` enables the `?url=` entry point.
    pub fn new(query_endpoint: Option<String>) -> Self {
        Self { query_endpoint }
    }

    /// Classify a request by its path and optional query string.
    pub fn route(&self, path: &str, query: Option<&str>) -> Route {
        if let Some(raw) = proxy_target(path, query) {
            return Route::Proxy { raw_target: raw };
        }

        if self.query_endpoint.as_deref() == Some(path) {
            return Route::QueryProxy {
                target: query.and_then(url_parameter),
            };
        }

        Route::Static
    }
}

/// Raw target of a `/proxy/...` request, including any query string.
fn proxy_target(path: &str, query: Option<&str>) -> Option<String> {
    let rest = path.strip_prefix(PROXY_PREFIX)?;
    Some(match query {
        Some(q) => format!("{rest}?{q}"),
        None => rest.to_string(),
    })
}

/// Form-decoded value of the first non-empty `url` parameter.
fn url_parameter(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "url" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Path handed to the static file collaborator.
pub fn static_path(path: &str) -> &str {
    if path == "/" {
        INDEX_PATH
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_prefix() {
        let router = Router::default();

        assert_eq!(
            router.route("/proxy/http%3A%2F%2Fexample.com%2Fa.json", None),
            Route::Proxy {
                raw_target: "http%3A%2F%2Fexample.com%2Fa.json".into()
            }
        );

        // Empty target is still the proxy branch; validation rejects it later.
        assert_eq!(
            router.route("/proxy/", None),
            Route::Proxy {
                raw_target: String::new()
            }
        );
    }

    #[test]
    fn test_proxy_keeps_query() {
        let router = Router::default();
        assert_eq!(
            router.route("/proxy/http://example.com/search", Some("q=1&page=2")),
            Route::Proxy {
                raw_target: "http://example.com/search?q=1&page=2".into()
            }
        );
    }

    #[test]
    fn test_non_proxy_paths_are_static() {
        let router = Router::default();
        for path in ["/", "/proxy", "/proxyfoo/x", "/app.js", "/a/proxy/b", "/PROXY/x"] {
            assert_eq!(router.route(path, None), Route::Static, "path {path}");
        }
    }

    #[test]
    fn test_static_path_rewrite() {
        assert_eq!(static_path("/"), "/index.html");
        assert_eq!(static_path("/index.html"), "/index.html");
        assert_eq!(static_path("/css/site.css"), "/css/site.css");
        assert_eq!(static_path("/dir/"), "/dir/");
    }

    #[test]
    fn test_query_endpoint_disabled_by_default() {
        let router = Router::default();
        assert_eq!(
            router.route("/api/proxy", Some("url=http://example.com")),
            Route::Static
        );
    }

    #[test]
    fn test_query_endpoint() {
        let router = Router::new(Some("/api/proxy".into()));

        assert_eq!(
            router.route("/api/proxy", Some("url=http%3A%2F%2Fexample.com%2F%3Fa%3D1")),
            Route::QueryProxy {
                target: Some("http://example.com/?a=1".into())
            }
        );
        assert_eq!(
            router.route("/api/proxy", Some("other=1")),
            Route::QueryProxy { target: None }
        );
        assert_eq!(
            router.route("/api/proxy", Some("url=")),
            Route::QueryProxy { target: None }
        );
        assert_eq!(
            router.route("/api/proxy", Some("url=&url=http%3A%2F%2Fb.example")),
            Route::QueryProxy {
                target: Some("http://b.example".into())
            }
        );
        assert_eq!(router.route("/api/proxy", None), Route::QueryProxy { target: None });
        assert_eq!(router.route("/api/proxy/x", Some("url=http://a")), Route::Static);
    }
}
