//! HTTP Transport Tests
//!
//! Runs the real `HttpTransport` against a one-shot HTTP server on a local
//! port and checks:
//! - Request envelope, endpoint path and basic auth header
//! - `result` and `error` handling
//! - Non-2xx statuses and undecodable bodies

use mathesar_client::{ClientConfig, HttpTransport, Transport};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Request as seen by the fixture server
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Value,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serve one request with `status` and `body`, returning the base URL
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let captured = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        captured
    });

    (base_url, handle)
}

async fn read_request(stream: &mut TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed connection before sending a full request");
        buf.extend_from_slice(&chunk[..n]);

        let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8(buf[..head_end].to_vec()).unwrap();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
            .collect();
        let length: usize = headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
            .map(|(_, v)| v.parse().unwrap())
            .unwrap_or(0);

        let body_start = head_end + 4;
        if buf.len() >= body_start + length {
            let body = serde_json::from_slice(&buf[body_start..body_start + length]).unwrap();
            return Captured { request_line, headers, body };
        }
    }
}

fn transport(base_url: &str) -> HttpTransport {
    HttpTransport::new(&ClientConfig::new(base_url, "admin", "secret")).unwrap()
}

// ============================================================================
// Request Shape
// ============================================================================

#[tokio::test]
async fn test_request_envelope_and_auth() {
    let (base_url, server) = serve_once("200 OK", r#"{"jsonrpc":"2.0","id":1,"result":[]}"#).await;

    let result = transport(&base_url)
        .call("tables.list", json!({"schema_oid": 2200, "database_id": 1}))
        .await
        .unwrap();
    let captured = server.await.unwrap();

    assert_eq!(result, json!([]));
    assert_eq!(captured.request_line, "POST /api/rpc/v0/ HTTP/1.1");
    assert_eq!(captured.header("authorization"), Some("Basic YWRtaW46c2VjcmV0"));
    assert_eq!(captured.body["jsonrpc"], "2.0");
    assert_eq!(captured.body["method"], "tables.list");
    assert_eq!(captured.body["params"], json!({"schema_oid": 2200, "database_id": 1}));

    let id = captured.body["id"].as_u64().unwrap();
    assert!((1..=1000).contains(&id), "id {id} out of range");
}

#[tokio::test]
async fn test_missing_result_is_null() {
    let (base_url, server) = serve_once("200 OK", r#"{"jsonrpc":"2.0","id":7}"#).await;

    let result = transport(&base_url).call("analytics.disable", json!({})).await.unwrap();
    server.await.unwrap();

    assert_eq!(result, Value::Null);
}

// ============================================================================
// Faults
// ============================================================================

#[tokio::test]
async fn test_error_payload_is_rpc_fault() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"jsonrpc":"2.0","id":3,"error":{"code":-32602,"message":"Invalid params"}}"#,
    )
    .await;

    let err = transport(&base_url).call("records.list", json!({})).await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err.error_code(), "RPC_FAULT");
    assert_eq!(err.rpc_payload(), Some(&json!({"code": -32602, "message": "Invalid params"})));
}

#[tokio::test]
async fn test_non_success_status_is_transport_fault() {
    let (base_url, server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;

    let err = transport(&base_url).call("schemas.list", json!({})).await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err.error_code(), "TRANSPORT_FAULT");
    assert!(err.message().contains("500"));
}

#[tokio::test]
async fn test_undecodable_body_is_validation_fault() {
    let (base_url, server) = serve_once("200 OK", "<html>login</html>").await;

    let err = transport(&base_url).call("schemas.list", json!({})).await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err.error_code(), "VALIDATION_FAULT");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_fault() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let err = transport(&base_url).call("schemas.list", json!({})).await.unwrap_err();

    assert_eq!(err.error_code(), "TRANSPORT_FAULT");
}

#[test]
fn test_credentials_not_in_debug_output() {
    let config = ClientConfig::new("http://localhost:8000/", "admin", "hunter2");

    assert!(!format!("{config:?}").contains("hunter2"));
    assert!(!format!("{:?}", transport("http://localhost:8000/")).contains("secret"));
}
