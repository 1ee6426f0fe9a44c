//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use mathesar_client::{Client, ClientError, Result, Transport};
use serde_json::{json, Value};

#[derive(Debug)]
enum Canned {
    Result(Value),
    Error(Value),
}

/// In-memory transport that answers from canned responses and records every call
#[derive(Default, Debug)]
pub struct RecordingTransport {
    responses: Mutex<HashMap<String, Canned>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` with `result` from now on
    pub fn respond(self, method: &str, result: Value) -> Self {
        self.responses.lock().unwrap().insert(method.to_string(), Canned::Result(result));
        self
    }

    /// Answer `method` with a JSON-RPC error payload from now on
    pub fn fail(self, method: &str, error: Value) -> Self {
        self.responses.lock().unwrap().insert(method.to_string(), Canned::Error(error));
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Params of every call to `method`
    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params)
            .collect()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls_to(method).len()
    }
}

impl Transport for RecordingTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        self.calls.lock().unwrap().push((method.to_string(), params));
        match self.responses.lock().unwrap().get(method) {
            Some(Canned::Result(result)) => Ok(result.clone()),
            Some(Canned::Error(error)) => Err(ClientError::rpc(error.clone())),
            None => Err(ClientError::rpc(json!({"code": -32601, "message": format!("Method not found: {method}")}))),
        }
    }
}

pub fn client(transport: RecordingTransport) -> Client<RecordingTransport> {
    Client::new(mathesar_client::RawClient::new(transport))
}

pub fn column(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "text",
        "nullable": id != 1,
        "primary_key": id == 1,
        "has_dependents": false,
        "current_role_priv": ["SELECT", "INSERT", "UPDATE"]
    })
}

/// Columns of a `books` table: id, title, author (a foreign key)
pub fn books_columns() -> Value {
    json!([column(1, "id"), column(2, "title"), column(3, "author")])
}

pub fn schema(oid: i64, name: &str) -> Value {
    json!({
        "oid": oid,
        "name": name,
        "description": null,
        "owner_oid": 10,
        "current_role_priv": ["USAGE", "CREATE"],
        "current_role_owns": true,
        "table_count": 2
    })
}

pub fn table(oid: i64, name: &str, schema_oid: i64) -> Value {
    json!({
        "oid": oid,
        "name": name,
        "schema": schema_oid,
        "description": null,
        "owner_oid": 10,
        "current_role_priv": ["SELECT", "INSERT"],
        "current_role_owns": true
    })
}
