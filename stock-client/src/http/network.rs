//! Network transport (reqwest)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{Transport, TransportRequest, TransportResponse};
use crate::{ClientConfig, ClientError, ClientResult};

/// Sends requests to `<base_url><path>` over HTTP(S)
#[derive(Debug, Clone)]
pub struct NetworkTransport {
    client: Client,
    base_url: String,
}

impl NetworkTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.api_root().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for NetworkTransport {
    async fn send(&self, request: TransportRequest) -> ClientResult<TransportResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .client
            .request(request.method, &url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(network_error)?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn network_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Network(format!("request timed out: {}", err))
    } else {
        ClientError::Network(err.to_string())
    }
}
