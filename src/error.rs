//! Error Handling Infrastructure
//!
//! This module defines the error type shared by every layer of the client.
//! All errors are structured and map to stable error codes for JSON output.
//!
//! # Error Categories
//! - `Transport`: network or HTTP-level failure (never retried)
//! - `Rpc`: the server answered with a JSON-RPC `error` object
//! - `Validation`: a response did not match the expected schema
//! - `UnknownColumn`: a column name is absent from the table's column cache
//! - `NotFound`: a name-based lookup (schema, table, record) found nothing
//! - `Config`: connection settings could not be resolved
//! - `InvalidInput`: a request could not be built from the caller's input

use serde_json::Value;
use thiserror::Error;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or HTTP-level failure
    #[error("Transport error{}: {detail}", http_suffix(.status))]
    Transport { status: Option<u16>, detail: String },

    /// Application-level error reported by the server, payload kept verbatim
    #[error("RPC error: {0}")]
    Rpc(Value),

    /// Response did not match the expected shape
    #[error("Invalid response: {0}")]
    Validation(String),

    /// Column name not present in the current column cache
    #[error("Unknown column name: {0}")]
    UnknownColumn(String),

    /// Lookup by name or id found no match
    #[error("{kind} '{name}' not found")]
    NotFound { kind: String, name: String },

    /// Configuration error (missing setting, unreadable profile file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request could not be built from the given input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Convert error to error code string for JSON output
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "TRANSPORT_FAULT",
            Self::Rpc(_) => "RPC_FAULT",
            Self::Validation(_) => "VALIDATION_FAULT",
            Self::UnknownColumn(_) => "UNKNOWN_COLUMN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// Human-readable message, safe for JSON output (never contains credentials)
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Server-supplied error payload, if this is an RPC fault
    #[must_use]
    pub const fn rpc_payload(&self) -> Option<&Value> {
        match self {
            Self::Rpc(payload) => Some(payload),
            _ => None,
        }
    }

    /// Create a transport error without an HTTP status
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport { status: None, detail: detail.into() }
    }

    /// Create a transport error for a non-success HTTP status
    pub fn http_status(status: u16, detail: impl Into<String>) -> Self {
        Self::Transport { status: Some(status), detail: detail.into() }
    }

    /// Create an RPC error from the server's `error` payload
    pub const fn rpc(payload: Value) -> Self {
        Self::Rpc(payload)
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unknown column error
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn(name.into())
    }

    /// Create a not found error
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound { kind: kind.into(), name: name.into() }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL so credentials embedded in a base URL never surface
        let err = err.without_url();
        match err.status() {
            Some(status) => Self::http_status(status.as_u16(), err.to_string()),
            None => Self::transport(err.to_string()),
        }
    }
}

fn http_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClientError::transport("test").error_code(), "TRANSPORT_FAULT");
        assert_eq!(ClientError::http_status(502, "test").error_code(), "TRANSPORT_FAULT");
        assert_eq!(ClientError::rpc(json!({"code": -1})).error_code(), "RPC_FAULT");
        assert_eq!(ClientError::validation("test").error_code(), "VALIDATION_FAULT");
        assert_eq!(ClientError::unknown_column("test").error_code(), "UNKNOWN_COLUMN");
        assert_eq!(ClientError::not_found("Table", "test").error_code(), "NOT_FOUND");
        assert_eq!(ClientError::config_error("test").error_code(), "CONFIG_ERROR");
        assert_eq!(ClientError::invalid_input("test").error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_error_messages() {
        let err = ClientError::http_status(503, "service unavailable");
        assert!(err.message().contains("HTTP 503"));
        assert!(err.message().contains("service unavailable"));

        let err = ClientError::transport("connection refused");
        assert_eq!(err.message(), "Transport error: connection refused");

        let err = ClientError::not_found("Schema", "public");
        assert_eq!(err.message(), "Schema 'public' not found");

        let err = ClientError::unknown_column("bogus");
        assert!(err.message().contains("bogus"));
    }

    #[test]
    fn test_rpc_payload_is_kept_verbatim() {
        let payload = json!({"code": -28006, "message": "relation does not exist", "data": null});
        let err = ClientError::rpc(payload.clone());
        assert_eq!(err.rpc_payload(), Some(&payload));
        assert!(ClientError::validation("x").rpc_payload().is_none());
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(ClientError::transport("t"), ClientError::Transport { status: None, .. }));
        assert!(matches!(
            ClientError::http_status(404, "t"),
            ClientError::Transport { status: Some(404), .. }
        ));
        assert!(matches!(ClientError::validation("t"), ClientError::Validation(_)));
        assert!(matches!(ClientError::unknown_column("t"), ClientError::UnknownColumn(_)));
        assert!(matches!(ClientError::not_found("Table", "t"), ClientError::NotFound { .. }));
        assert!(matches!(ClientError::config_error("t"), ClientError::Config(_)));
        assert!(matches!(ClientError::invalid_input("t"), ClientError::InvalidInput(_)));
    }
}
