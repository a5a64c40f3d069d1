//! Authenticated request gateway.
//!
//! Every backend call goes through [`Gateway::send`]. Outbound, the current
//! bearer token is read from session storage (fresh, per request) and set as
//! the `Authorization` header. Inbound, a 401 or 403 clears the session and
//! forces a full navigation to the login route before the failure is handed
//! back to the caller, who still decides what to tell the user.

pub mod navigator;
pub mod request;
pub mod scripted;
pub mod transport;

use std::sync::Arc;

use http::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use http::StatusCode;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::session::SessionStore;

pub use navigator::{CliNavigator, MemoryNavigator, Navigator, same_route};
pub use request::{ApiRequest, PreparedRequest, RawResponse, normalize_path};
pub use scripted::ScriptedTransport;
pub use transport::{HttpTransport, Transport};

/// Statuses that invalidate the session, on any endpoint.
pub const SESSION_REJECTED: [StatusCode; 2] = [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN];

#[derive(Clone)]
pub struct Gateway {
    base_url: Url,
    api_prefix: String,
    login_route: String,
    transport: Arc<dyn Transport>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl Gateway {
    pub fn new(
        config: &Config,
        transport: Arc<dyn Transport>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url()?,
            api_prefix: config.api_prefix.clone(),
            login_route: config.login_route.clone(),
            transport,
            session,
            navigator,
        })
    }

    /// Gateway over the real HTTP transport.
    pub fn from_config(
        config: &Config,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Self::new(config, transport, session, navigator)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a request and return the successful response.
    ///
    /// Non-success statuses come back as errors. 401/403 additionally clear
    /// the session and redirect to login first.
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let prepared = self.prepare(&request)?;
        tracing::debug!(
            method = %prepared.method,
            url = %prepared.url,
            authenticated = prepared.headers.contains_key(AUTHORIZATION),
            "sending request"
        );

        let response = self.transport.execute(prepared).await.inspect_err(|e| {
            tracing::debug!(method = %request.method, path = %request.path, "transport failed: {e}");
        })?;
        self.intercept(&request, response)
    }

    /// Send and decode a JSON response body.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.json()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(ApiRequest::get(path)).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(ApiRequest::put(path).json(body)?).await
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(ApiRequest::patch(path).json(body)?).await
    }

    /// Send a request whose response body is not needed.
    pub async fn execute(&self, request: ApiRequest) -> Result<()> {
        self.send(request).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(ApiRequest::delete(path)).await
    }

    /// Outbound interceptor: resolve the URL and attach the bearer token.
    ///
    /// A storage read failure aborts the request rather than sending it
    /// without credentials.
    fn prepare(&self, request: &ApiRequest) -> Result<PreparedRequest> {
        let url = request::build_url(&self.base_url, &self.api_prefix, request)?;

        let mut headers = HeaderMap::new();
        if let Some(token) = self.session.token()? {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| {
                    ApiError::Storage("stored token is not a valid header value".to_string())
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(PreparedRequest {
            method: request.method.clone(),
            url,
            headers,
            body: request.body.clone(),
        })
    }

    /// Inbound interceptor.
    fn intercept(&self, request: &ApiRequest, response: RawResponse) -> Result<RawResponse> {
        let status = response.status;
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text();
        if SESSION_REJECTED.contains(&status) {
            tracing::warn!(
                %status,
                method = %request.method,
                path = %request.path,
                "session rejected by backend"
            );
            self.reset_session();
            return Err(if status == StatusCode::UNAUTHORIZED {
                ApiError::Unauthorized(body)
            } else {
                ApiError::Forbidden(body)
            });
        }

        Err(ApiError::Status { status, body })
    }

    /// Clear the credential pair and leave for the login route. Idempotent.
    fn reset_session(&self) {
        if let Err(e) = self.session.invalidate() {
            tracing::warn!("failed to clear session after rejection: {e}");
        }
        let location = self.navigator.current_location();
        if !same_route(&location, &self.login_route) {
            self.navigator.navigate_full(&self.login_route);
        }
    }
}
