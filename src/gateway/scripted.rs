//! In-memory transport that answers from a table of canned responses.

use std::collections::HashMap;

use async_trait::async_trait;
use http::{Method, StatusCode};
use parking_lot::Mutex;

use super::request::{PreparedRequest, RawResponse};
use super::transport::Transport;
use crate::error::Result;

/// Replies keyed by method and URL path. Unmatched requests get a 404.
///
/// Every request is recorded, headers included, so callers can inspect what
/// was actually sent.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), RawResponse>>,
    sent: Mutex<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and a JSON `body`.
    pub fn on(&self, method: Method, path: &str, status: StatusCode, body: &str) -> &Self {
        self.routes.lock().insert(
            (method, path.to_string()),
            RawResponse::new(status, body.as_bytes().to_vec()),
        );
        self
    }

    pub fn on_get(&self, path: &str, body: &str) -> &Self {
        self.on(Method::GET, path, StatusCode::OK, body)
    }

    pub fn sent(&self) -> Vec<PreparedRequest> {
        self.sent.lock().clone()
    }

    pub fn last(&self) -> Option<PreparedRequest> {
        self.sent.lock().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        let key = (request.method.clone(), request.url.path().to_string());
        self.sent.lock().push(request);
        Ok(self
            .routes
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| RawResponse::new(StatusCode::NOT_FOUND, b"not found".to_vec())))
    }
}
