//! Transport seam between the gateway and the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::request::{PreparedRequest, RawResponse};
use crate::config::Config;
use crate::error::{ApiError, Result};

/// Sends a fully prepared request.
///
/// Implementations report connectivity failures as [`ApiError::Network`] and
/// return every HTTP response, whatever its status, as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client honouring the configured timeouts and cookie policy.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(config.with_credentials)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("bitebox/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(network_error)?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn network_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Network(format!("request timed out: {err}"))
    } else if err.is_connect() {
        ApiError::Network(format!("could not connect: {err}"))
    } else {
        ApiError::Network(err.to_string())
    }
}
