//! Raw Call Layer
//!
//! One async method per remote procedure. Every method builds a params
//! object, delegates to the [`Transport`], and decodes the `result` into the
//! matching model type.
//!
//! # Conventions
//! - Optional arguments are omitted from the params object when `None`
//!   (never sent as `null`)
//! - A result that does not decode is a `Validation` fault naming the method
//! - Procedures whose result carries nothing useful return `()`
//! - No caching, no retries, no cross-call state
//!
//! Methods are grouped by procedure namespace in the submodules; they all
//! extend [`RawClient`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::transport::{HttpTransport, Transport};

mod analytics;
mod collaborators;
mod columns;
mod constraints;
mod data_modeling;
mod databases;
mod explorations;
mod forms;
mod records;
mod roles;
mod schemas;
mod tables;
mod users;

/// Low-level client: one method per remote procedure
#[derive(Debug)]
pub struct RawClient<T = HttpTransport> {
    transport: T,
}

impl RawClient<HttpTransport> {
    /// Build an HTTP-backed client from resolved settings
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    /// Build an HTTP-backed client from `MATHESAR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::connect(&ClientConfig::from_env()?)
    }
}

impl<T: Transport> RawClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Call any procedure and return its `result` undecoded
    ///
    /// Escape hatch for procedures without a typed wrapper.
    pub async fn call_value(&self, method: &str, params: Value) -> Result<Value> {
        self.transport.call(method, params).await
    }

    /// Call a procedure and decode its result
    pub(crate) async fn call<R: DeserializeOwned>(&self, method: &str, params: Params) -> Result<R> {
        let params = params.finish()?;
        let result = self.transport.call(method, params).await?;
        decode(method, result)
    }

    /// Call a procedure whose result is not used
    pub(crate) async fn call_unit(&self, method: &str, params: Params) -> Result<()> {
        let params = params.finish()?;
        let result = self.transport.call(method, params).await?;
        trace!(method, ignored = %result, "discarding result");
        Ok(())
    }
}

fn decode<R: DeserializeOwned>(method: &str, result: Value) -> Result<R> {
    serde_json::from_value(result)
        .map_err(|e| ClientError::validation(format!("Unexpected result for {method}: {e}")))
}

/// Params object under construction
///
/// Serialization failures are held until [`Params::finish`] so call sites
/// can chain setters.
#[derive(Debug, Default)]
pub(crate) struct Params {
    map: Map<String, Value>,
    error: Option<serde_json::Error>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a required argument
    pub fn set(mut self, key: &str, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.map.insert(key.to_string(), value);
            }
            Err(e) => self.fail(e),
        }
        self
    }

    /// Set an optional argument; `None` leaves it out entirely
    pub fn opt<V: Serialize>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Copy every field of a serialized struct into the params object
    pub fn merge(mut self, fields: impl Serialize) -> Self {
        match serde_json::to_value(fields) {
            Ok(Value::Object(fields)) => self.map.extend(fields),
            Ok(other) => self.fail(serde::ser::Error::custom(format!(
                "expected an object of arguments, got {other}"
            ))),
            Err(e) => self.fail(e),
        }
        self
    }

    fn fail(&mut self, error: serde_json::Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn finish(self) -> Result<Value> {
        match self.error {
            Some(e) => Err(ClientError::invalid_input(format!("Could not serialize params: {e}"))),
            None => Ok(Value::Object(self.map)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_omit_none() {
        let params = Params::new()
            .set("database_id", 1)
            .opt("limit", None::<i64>)
            .opt("offset", Some(20))
            .finish()
            .unwrap();
        assert_eq!(params, json!({"database_id": 1, "offset": 20}));
    }

    #[test]
    fn test_params_merge_struct() {
        #[derive(Serialize)]
        struct Extra {
            limit: i64,
            #[serde(skip_serializing_if = "Option::is_none")]
            search: Option<String>,
        }

        let params = Params::new()
            .set("table_oid", 18087)
            .merge(Extra { limit: 5, search: None })
            .finish()
            .unwrap();
        assert_eq!(params, json!({"table_oid": 18087, "limit": 5}));
    }

    #[test]
    fn test_params_merge_rejects_non_object() {
        let err = Params::new().merge(vec![1, 2]).finish().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_params_map_key_error_is_deferred() {
        use std::collections::HashMap;

        // Non-string map keys cannot become JSON object keys
        let mut bad: HashMap<(i32, i32), i32> = HashMap::new();
        bad.insert((1, 2), 3);
        let err = Params::new().set("bad", bad).set("ok", 1).finish().unwrap_err();
        assert!(err.message().contains("Could not serialize params"));
    }

    #[test]
    fn test_decode_mismatch_names_method() {
        let err = decode::<Vec<i64>>("columns.add", json!({"not": "a list"})).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAULT");
        assert!(err.message().contains("columns.add"));
    }
}
