//! JSON Output Envelope Types
//!
//! Structured JSON output for the `mathesar` binary. Every command prints
//! exactly one envelope to stdout.
//!
//! # Output Contract
//! - Success: `{"ok": true, "command": "...", "data": {...}, "meta": {...}}`
//! - Error: `{"ok": false, "command": "...", "error": {"code": "...", "message": "..."}}`

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Success envelope for command results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    /// Always true for success envelopes
    pub ok: bool,

    /// Command that was executed (schemas, tables, records, ...)
    pub command: String,

    pub data: T,

    pub meta: Metadata,
}

impl<T> SuccessEnvelope<T> {
    pub fn new(command: impl Into<String>, data: T, meta: Metadata) -> Self {
        Self { ok: true, command: command.into(), data, meta }
    }
}

/// Error envelope for command failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Always false for error envelopes
    pub ok: bool,

    /// Command that was attempted
    pub command: String,

    pub error: ErrorInfo,
}

impl ErrorEnvelope {
    pub fn new(command: impl Into<String>, error: ErrorInfo) -> Self {
        Self { ok: false, command: command.into(), error }
    }

    /// Create error envelope from a `ClientError`
    pub fn from_error(command: impl Into<String>, err: &ClientError) -> Self {
        Self::new(command, ErrorInfo::new(err.error_code(), err.message()))
    }
}

/// Error information structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable error code (e.g., "RPC_FAULT", "UNKNOWN_COLUMN")
    pub code: String,

    /// Human-readable error message, never includes credentials
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }
}

/// Execution metadata included in all success responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Wall-clock time of the command in milliseconds
    pub execution_ms: u64,

    /// Number of rows returned (record and listing commands only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_returned: Option<usize>,
}

impl Metadata {
    pub const fn new(execution_ms: u64) -> Self {
        Self { execution_ms, rows_returned: None }
    }

    pub const fn with_rows(execution_ms: u64, rows_returned: usize) -> Self {
        Self { execution_ms, rows_returned: Some(rows_returned) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_serialization() {
        let envelope = SuccessEnvelope::new("records", json!({"count": 1}), Metadata::with_rows(42, 10));

        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains(r#""ok":true"#));
        assert!(json.contains(r#""command":"records""#));
        assert!(json.contains(r#""execution_ms":42"#));
        assert!(json.contains(r#""rows_returned":10"#));
    }

    #[test]
    fn test_error_envelope_serialization() {
        let envelope = ErrorEnvelope::new("schemas", ErrorInfo::new("TRANSPORT_FAULT", "connection refused"));

        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains(r#""ok":false"#));
        assert!(json.contains(r#""command":"schemas""#));
        assert!(json.contains(r#""code":"TRANSPORT_FAULT""#));
        assert!(json.contains(r#""message":"connection refused""#));
    }

    #[test]
    fn test_error_envelope_from_client_error() {
        let err = ClientError::unknown_column("nickname");
        let envelope = ErrorEnvelope::from_error("records", &err);

        assert!(!envelope.ok);
        assert_eq!(envelope.command, "records");
        assert_eq!(envelope.error.code, "UNKNOWN_COLUMN");
        assert!(envelope.error.message.contains("nickname"));
    }

    #[test]
    fn test_error_envelope_keeps_rpc_payload_text() {
        let err = ClientError::rpc(json!({"code": -32601, "message": "Method not found"}));
        let envelope = ErrorEnvelope::from_error("call", &err);

        assert_eq!(envelope.error.code, "RPC_FAULT");
        assert!(envelope.error.message.contains("Method not found"));
    }

    #[test]
    fn test_metadata_without_rows() {
        let json = serde_json::to_string(&Metadata::new(100)).unwrap();

        assert!(json.contains(r#""execution_ms":100"#));
        assert!(!json.contains("rows_returned"));
    }

    #[test]
    fn test_metadata_with_rows() {
        let json = serde_json::to_string(&Metadata::with_rows(100, 50)).unwrap();

        assert!(json.contains(r#""execution_ms":100"#));
        assert!(json.contains(r#""rows_returned":50"#));
    }
}
