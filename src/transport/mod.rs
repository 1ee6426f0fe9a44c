//! JSON-RPC Transport
//!
//! This module issues exactly one JSON-RPC 2.0 call per invocation.
//!
//! # Wire Format
//! - Request: `{"id": <int>, "jsonrpc": "2.0", "method": <string>, "params": <object>}`
//! - Success: `{"result": ...}`
//! - Failure: `{"error": ...}`
//!
//! # Failure Mapping
//! - Non-2xx HTTP status: `Transport` error, body is not parsed
//! - Body that is not a JSON-RPC response: `Validation` error
//! - Body carrying `error`: `Rpc` error with the payload kept verbatim
//!
//! There are no retries and no timeout configuration beyond the HTTP
//! client's defaults. Callers needing resilience wrap this layer.

use std::future::Future;

use base64::Engine;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// JSON-RPC protocol version tag
pub const JSONRPC_VERSION: &str = "2.0";

// ============================================================================
// JSON-RPC 2.0 Structures
// ============================================================================

/// JSON-RPC 2.0 Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub id: u32,
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

impl JsonRpcRequest {
    /// Create a request with a random correlation id in `1..=1000`
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            id: rand::rng().random_range(1..=1000),
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC 2.0 Response
///
/// Only `result` and `error` are interpreted; `id` and `jsonrpc` are accepted
/// but not checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// `Some` whenever the key is present, including `"error": null`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// Deserialize a field that was present in the input, keeping JSON null
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcResponse {
    /// Convert into the call outcome: `Rpc` error if `error` is present
    /// (even as null), otherwise the `result` (JSON null if absent)
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(error) => Err(ClientError::rpc(error)),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// Decode a response body into the call outcome
pub fn decode_response(body: &[u8]) -> Result<Value> {
    let response: JsonRpcResponse = serde_json::from_slice(body).map_err(|e| {
        ClientError::validation(format!("Response body is not a JSON-RPC response: {e}"))
    })?;
    response.into_result()
}

// ============================================================================
// Transport Trait
// ============================================================================

/// A single-call JSON-RPC transport
///
/// Implementations hold only their configuration; no state is carried
/// between calls.
pub trait Transport: Send + Sync {
    /// Invoke `method` with `params` and return the `result` payload
    fn call(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>> + Send;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// JSON-RPC over HTTP POST with basic authentication
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    auth_header: HeaderMap,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").field("endpoint", &self.endpoint.as_str()).finish()
    }
}

impl HttpTransport {
    /// Create a transport for the endpoint and credentials in `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let auth_header = build_auth_headers(&config.username, &config.password)?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, endpoint, auth_header })
    }

    /// Endpoint every request is posted to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let request = JsonRpcRequest::new(method, params);
        debug!(method, id = request.id, "sending rpc request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.auth_header.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::http_status(
                status.as_u16(),
                format!("{method} returned {status}"),
            ));
        }

        let body = response.bytes().await?;
        trace!(method, id = request.id, bytes = body.len(), "received rpc response");
        decode_response(&body)
    }
}

fn build_auth_headers(username: &str, password: &str) -> Result<HeaderMap> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| ClientError::config_error(format!("Invalid credentials: {e}")))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope() {
        let req = JsonRpcRequest::new("records.list", json!({"table_oid": 7}));
        assert!((1..=1000).contains(&req.id));

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "records.list");
        assert_eq!(value["params"], json!({"table_oid": 7}));
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_decode_result() {
        let body = br#"{"jsonrpc": "2.0", "id": 1, "result": {"count": 0, "results": []}}"#;
        assert_eq!(decode_response(body).unwrap(), json!({"count": 0, "results": []}));
    }

    #[test]
    fn test_decode_missing_result_is_null() {
        assert_eq!(decode_response(br#"{"jsonrpc": "2.0", "id": 1}"#).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_error_is_verbatim() {
        let body = br#"{"jsonrpc": "2.0", "id": 1, "error": {"code": -32601, "message": "nope"}}"#;
        let err = decode_response(body).unwrap_err();
        assert_eq!(err.rpc_payload(), Some(&json!({"code": -32601, "message": "nope"})));
    }

    #[test]
    fn test_decode_error_wins_over_result() {
        let body = br#"{"result": 1, "error": "boom"}"#;
        let err = decode_response(body).unwrap_err();
        assert_eq!(err.rpc_payload(), Some(&json!("boom")));
    }

    #[test]
    fn test_decode_error_null_is_rpc_fault() {
        let body = br#"{"jsonrpc": "2.0", "id": 1, "error": null, "result": 5}"#;
        let err = decode_response(body).unwrap_err();
        assert!(matches!(err, ClientError::Rpc(Value::Null)));
        assert_eq!(err.rpc_payload(), Some(&Value::Null));
    }

    #[test]
    fn test_decode_garbage_is_validation_error() {
        let err = decode_response(b"<html>502</html>").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAULT");
    }

    #[test]
    fn test_basic_auth_header() {
        let headers = build_auth_headers("alice", "secret").unwrap();
        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value.to_str().unwrap(), "Basic YWxpY2U6c2VjcmV0");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_http_transport_endpoint() {
        let config = ClientConfig::new("https://mathesar.example.com/", "u", "p");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.endpoint().as_str(), "https://mathesar.example.com/api/rpc/v0/");
        assert!(!format!("{transport:?}").contains("Basic"));
    }
}
