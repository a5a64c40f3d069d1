//! Request envelope, prepared request and raw response types.

use http::{HeaderMap, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiError, Result};

/// An outgoing request as written by calling code.
///
/// Carries no credentials; the gateway injects those at send time.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// A request ready for the transport: absolute URL and final headers.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

/// Status and body as received from the transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Normalize an endpoint path against the configured prefix.
///
/// Callers may or may not include a leading `/api` segment; it is stripped and
/// the configured `prefix` is applied instead, so both spellings resolve to the
/// same URL.
pub fn normalize_path(path: &str, prefix: &str) -> String {
    let trimmed = path.trim();
    let mut path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    if path == "/api" {
        path = "/".to_string();
    } else if let Some(rest) = path.strip_prefix("/api/") {
        path = format!("/{rest}");
    }

    let prefix = prefix.trim().trim_end_matches('/');
    if prefix.is_empty() {
        return path;
    }
    let prefix = if prefix.starts_with('/') {
        prefix.to_string()
    } else {
        format!("/{prefix}")
    };
    if path == "/" {
        prefix
    } else {
        format!("{prefix}{path}")
    }
}

/// Join base address, normalized path and query parameters.
pub fn build_url(base: &Url, prefix: &str, request: &ApiRequest) -> Result<Url> {
    let path = normalize_path(&request.path, prefix);
    let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
    let mut url = Url::parse(&joined)
        .map_err(|e| ApiError::Config(format!("invalid request URL '{joined}': {e}")))?;
    if !request.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &request.query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_strips_api_segment() {
        assert_eq!(normalize_path("/api/foods", ""), "/foods");
        assert_eq!(normalize_path("/foods", ""), "/foods");
        assert_eq!(normalize_path("foods", ""), "/foods");
        assert_eq!(normalize_path("/api", ""), "/");
        // Only a whole leading segment is stripped
        assert_eq!(normalize_path("/apiary", ""), "/apiary");
    }

    #[test]
    fn test_normalize_path_applies_prefix() {
        assert_eq!(normalize_path("/api/foods", "/api"), "/api/foods");
        assert_eq!(normalize_path("/foods", "api/"), "/api/foods");
        assert_eq!(normalize_path("/orders/my-orders", "/v2"), "/v2/orders/my-orders");
    }

    #[test]
    fn test_build_url_with_query() {
        let base = Url::parse("http://localhost:8080").unwrap();
        let request = ApiRequest::get("/api/foods")
            .query("page", 0)
            .query("search", "bún bò")
            .query_opt::<u64>("categoryId", None);

        let url = build_url(&base, "", &request).unwrap();
        assert_eq!(url.path(), "/foods");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "0".to_string()),
                ("search".to_string(), "bún bò".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let base = Url::parse("https://example.com/shop/").unwrap();
        let url = build_url(&base, "", &ApiRequest::get("/categories")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/shop/categories");
    }

    #[test]
    fn test_raw_response_json_error_is_decode() {
        let response = RawResponse::new(StatusCode::OK, "nope");
        let err = response.json::<Vec<u32>>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
