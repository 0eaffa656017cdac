//! In-process transport
//!
//! Calls an axum [`Router`] directly through `tower::ServiceExt::oneshot`,
//! with zero network overhead. The router is expected to serve the API root,
//! so `/products/active` reaches the route of the same name.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use tower::ServiceExt;

use super::{Transport, TransportRequest, TransportResponse};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct OneshotTransport {
    router: Router,
}

impl OneshotTransport {
    /// `router` must already have its state applied
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Transport for OneshotTransport {
    async fn send(&self, request: TransportRequest) -> ClientResult<TransportResponse> {
        let mut builder = Request::builder()
            .method(request.method)
            .uri(request.path.as_str());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(request.headers);
        }
        let body = request.body.map(Body::from).unwrap_or_else(Body::empty);
        let http_request = builder
            .body(body)
            .map_err(|e| ClientError::Validation(format!("invalid request: {}", e)))?;

        let response = self
            .router
            .clone()
            .oneshot(http_request)
            .await
            .map_err(|e| ClientError::Network(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Network(format!("Failed to read body: {}", e)))?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
