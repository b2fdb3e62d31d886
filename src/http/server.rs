//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (tracing, CORS finalization)
//! - Dispatch by method: preflight, proxy/static routing, static-only HEAD
//! - Run until the shutdown signal fires

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::http::{cors, response};
use crate::proxy::{Forwarder, ProxyError, TargetUrl};
use crate::routing::{self, Route, Router as ProxyRouter};
use crate::static_files::{DirectoryFiles, StaticFiles};

/// Error type for server construction.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub forwarder: Forwarder,
    pub static_files: Arc<dyn StaticFiles>,
}

/// HTTP server for static files and the CORS proxy.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server serving `config.static_files.root` from disk.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let files = Arc::new(DirectoryFiles::new(&config.static_files.root));
        Self::with_static_files(config, files)
    }

    /// Create a server with a custom static file collaborator.
    pub fn with_static_files(
        config: ServerConfig,
        static_files: Arc<dyn StaticFiles>,
    ) -> Result<Self, ServerError> {
        let state = AppState {
            router: Arc::new(ProxyRouter::new(config.proxy.query_endpoint.clone())),
            forwarder: Forwarder::new(&config.upstream)?,
            static_files,
        };

        Ok(Self {
            router: Self::build_router(state),
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let app = Router::new().fallback(handle_request).with_state(state);
        cors::finalize(app).layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for driving requests in-process.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve connections from `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            root = %self.config.static_files.root.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler for every method and path.
async fn handle_request(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    match method {
        Method::OPTIONS => cors::preflight_response(),
        Method::GET => dispatch(&state, request).await,
        Method::HEAD => handle_static(&state, request).await,
        _ => response::unsupported_method(&method),
    }
}

/// Route a GET to the proxy or static branch.
async fn dispatch(state: &AppState, request: Request<Body>) -> Response {
    let uri = request.uri();
    match state.router.route(uri.path(), uri.query()) {
        Route::Proxy { raw_target } => handle_proxy(state, TargetUrl::decode(&raw_target)).await,
        Route::QueryProxy {
            target: Some(target),
        } => handle_proxy(state, TargetUrl::from_decoded(target)).await,
        Route::QueryProxy { target: None } => ProxyError::MissingTarget.into_response(),
        Route::Static => handle_static(state, request).await,
    }
}

async fn handle_proxy(state: &AppState, target: Result<TargetUrl, ProxyError>) -> Response {
    match target {
        Ok(target) => state.forwarder.forward(&target).await,
        Err(err) => {
            tracing::warn!(error = %err, "Rejected proxy target");
            err.into_response()
        }
    }
}

async fn handle_static(state: &AppState, mut request: Request<Body>) -> Response {
    let path = request.uri().path();
    let rewritten = routing::static_path(path);
    if rewritten != path {
        let target = match request.uri().query() {
            Some(query) => format!("{rewritten}?{query}"),
            None => rewritten.to_string(),
        };
        if let Ok(uri) = target.parse::<Uri>() {
            *request.uri_mut() = uri;
        }
    }
    state.static_files.serve(request).await
}
