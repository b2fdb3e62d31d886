//! Outbound fetch and relay.
//!
//! # Responsibilities
//! - Issue a GET to the decoded target with the fixed header set
//! - Follow redirects and buffer the whole upstream body
//! - Split failures into upstream status errors and transport errors
//! - Turn a successful upstream response into the caller's response
//!
//! # Design Decisions
//! - One shared `reqwest::Client`, built once at startup, read-only afterwards
//! - No retries, no streaming: the body is fully read before anything is sent
//! - The upstream response is owned by `fetch` and dropped on every path,
//!   which releases the connection

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::proxy::error::{error_chain, ProxyError};
use crate::proxy::headers::{outbound_headers, relayable_headers};
use crate::proxy::target::TargetUrl;

/// Fully buffered upstream answer.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = relayable_headers(&self.headers);
        response
    }
}

/// Performs proxied fetches on behalf of callers.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    /// Build the forwarder and its HTTP client.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .default_headers(outbound_headers())
            .redirect(Policy::limited(config.max_redirects));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch the target and buffer the full response.
    pub async fn fetch(&self, target: &TargetUrl) -> Result<UpstreamResponse, ProxyError> {
        tracing::info!(target_url = %target, "Proxying request");

        let response = self
            .client
            .get(target.as_str())
            .send()
            .await
            .map_err(|e| ProxyError::from_client(&e))?
            .error_for_status()
            .map_err(|e| ProxyError::from_client(&e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProxyError::Transport(error_chain(&e)))?;

        tracing::debug!(
            target_url = %target,
            status = %status,
            bytes = body.len(),
            "Upstream response buffered"
        );

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }

    /// Fetch and convert the outcome into the caller's response.
    pub async fn forward(&self, target: &TargetUrl) -> Response {
        match self.fetch(target).await {
            Ok(upstream) => upstream.into_response(),
            Err(err) => {
                tracing::warn!(
                    target_url = %target,
                    status = %err.status_code(),
                    error = %err,
                    "Proxy request failed"
                );
                err.into_response()
            }
        }
    }
}
