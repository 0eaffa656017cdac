//! HTTP layer
//!
//! [`HttpClient`] is the single path every fetcher goes through. Before a
//! request leaves it captures a [`RequestTicket`] from the session store and
//! attaches the bearer token; after the response arrives it maps the status
//! to a [`ClientError`] and reports 401/403 back to the store together with
//! the ticket's epoch. The wire itself is behind [`Transport`].

mod network;
mod oneshot;

pub use network::NetworkTransport;
pub use oneshot::OneshotTransport;

use std::sync::Arc;

use async_trait::async_trait;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::session::{RequestTicket, SessionStore};
use crate::{ClientError, ClientResult};

/// Request as handed to a transport; `path` is relative to the API root
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Sends one request and returns the raw response
///
/// Only transport failures are errors here; every status code is a response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> ClientResult<TransportResponse>;
}

/// Token-aware JSON client over a [`Transport`]
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    invalidate_on_forbidden: bool,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("transport", &"<dyn Transport>")
            .field("invalidate_on_forbidden", &self.invalidate_on_forbidden)
            .finish()
    }
}

impl HttpClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
        invalidate_on_forbidden: bool,
    ) -> Self {
        Self {
            transport,
            session,
            invalidate_on_forbidden,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let body = self.execute(Method::GET, path, None).await?;
        decode(&body)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = self.execute(Method::POST, path, Some(encode(body)?)).await?;
        decode(&body)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = self.execute(Method::PUT, path, Some(encode(body)?)).await?;
        decode(&body)
    }

    /// PATCH without a body; the response body is ignored
    pub async fn patch_empty(&self, path: &str) -> ClientResult<()> {
        self.execute(Method::PATCH, path, None).await.map(drop)
    }

    /// DELETE; the response body is ignored
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.execute(Method::DELETE, path, None).await.map(drop)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Vec<u8>> {
        let ticket = self.session.ticket();
        let request = build_request(method, path, body, &ticket)?;
        let method = request.method.clone();

        tracing::debug!(method = %method, path = %path, epoch = ticket.epoch, "request");
        let response = self.transport.send(request).await?;

        if response.status.is_success() {
            return Ok(response.body);
        }

        let err = ClientError::from_status(response.status, &response.body);
        tracing::debug!(method = %method, path = %path, status = %response.status, error = %err, "request failed");
        self.on_failure(&err, &ticket);
        Err(err)
    }

    /// Response middleware: hand authorization failures to the session store
    fn on_failure(&self, err: &ClientError, ticket: &RequestTicket) {
        let counts = match err {
            ClientError::Unauthorized(_) => true,
            ClientError::Forbidden(_) => self.invalidate_on_forbidden,
            _ => false,
        };
        if counts {
            self.session.invalidate(ticket.epoch);
        }
    }
}

/// Request middleware: JSON headers plus the bearer token when one is available
fn build_request(
    method: Method,
    path: &str,
    body: Option<Vec<u8>>,
    ticket: &RequestTicket,
) -> ClientResult<TransportRequest> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = &ticket.token {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ClientError::Validation(format!("token is not a valid header: {}", e)))?;
        headers.insert(AUTHORIZATION, value);
    }

    Ok(TransportRequest {
        method,
        path: path.to_string(),
        headers,
        body,
    })
}

fn encode<B: Serialize>(body: &B) -> ClientResult<Vec<u8>> {
    serde_json::to_vec(body)
        .map_err(|e| ClientError::Validation(format!("failed to encode body: {}", e)))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}
