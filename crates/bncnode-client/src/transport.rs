//! Transports that carry queries to the node
//!
//! The client only needs `request(path, method) -> (status, body)`. It never
//! retries, pools or caches; whatever the transport returns is final.

use async_trait::async_trait;
use bncnode_errors::{Error, Result};
use reqwest::{Client as HttpClient, Method};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// Status code and body exactly as received
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 response wrapping `result` in a JSON-RPC envelope
    pub fn result(result: Value) -> Self {
        let envelope = serde_json::json!({
            "jsonrpc": "2.0",
            "id": "",
            "result": result,
        });
        Self::new(200, envelope.to_string())
    }

    /// 200 response carrying a JSON-RPC error
    pub fn rpc_error(code: i64, message: &str) -> Self {
        let envelope = serde_json::json!({
            "jsonrpc": "2.0",
            "id": "",
            "result": null,
            "error": { "code": code, "message": message },
        });
        Self::new(200, envelope.to_string())
    }
}

/// Request executor the client calls into
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `path` (query string included) to the node
    async fn request(&self, path: &str, method: &Method) -> Result<RawResponse>;
}

/// reqwest-backed transport against a node base URL
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: String,
    http_client: HttpClient,
}

impl HttpTransport {
    /// Create a transport for `base_url`, e.g. `http://localhost:27147`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::TransportUnavailable(format!("invalid node url {base_url}:: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(Error::TransportUnavailable(format!(
                "node url cannot be a base:: {base_url}"
            )));
        }

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::TransportUnavailable(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, path: &str, method: &Method) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .request(method.clone(), &url)
            .send()
            .await
            .map_err(|e| Error::TransportUnavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::TransportUnavailable(e.to_string()))?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

/// In-memory transport serving canned responses keyed by path
#[derive(Debug, Default)]
pub struct MemoryTransport {
    responses: HashMap<String, RawResponse>,
    requests: Mutex<Vec<String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `response` for `path`
    pub fn with_response(mut self, path: impl Into<String>, response: RawResponse) -> Self {
        self.responses.insert(path.into(), response);
        self
    }

    /// Serve a successful envelope around `result` for `path`
    pub fn with_result(self, path: impl Into<String>, result: Value) -> Self {
        self.with_response(path, RawResponse::result(result))
    }

    /// Paths requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn request(&self, path: &str, _method: &Method) -> Result<RawResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_string());

        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| Error::TransportUnavailable(format!("no route for {path}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_rejects_bad_url() {
        let err = HttpTransport::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(err.is_transport());
        assert!(HttpTransport::new("mailto:node@example.com", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_http_transport_trims_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:27147/", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:27147");
    }

    #[tokio::test]
    async fn test_memory_transport_records_requests() {
        let transport = MemoryTransport::new().with_result("/status", serde_json::json!({}));

        let response = transport.request("/status", &Method::GET).await.unwrap();
        assert_eq!(response.status, 200);

        let err = transport.request("/missing", &Method::GET).await.unwrap_err();
        assert!(matches!(err, Error::TransportUnavailable(_)));

        assert_eq!(transport.requests(), vec!["/status", "/missing"]);
    }

    #[tokio::test]
    async fn test_unreachable_node() {
        // port 9 (discard) is closed on test hosts
        let transport = HttpTransport::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = transport.request("/status", &Method::GET).await.unwrap_err();
        assert!(matches!(err, Error::TransportUnavailable(_)));
    }
}
