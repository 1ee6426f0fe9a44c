//! Exploration (saved query) models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Definition of an exploration, as accepted by `explorations.add` and `explorations.run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationDef {
    pub database_id: i64,
    pub name: String,
    pub base_table_oid: i64,
    pub schema_oid: i64,
    pub initial_columns: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformations: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_options: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_names: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A saved exploration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationInfo {
    pub id: i64,
    #[serde(flatten)]
    pub def: ExplorationDef,
}

/// Result of running an exploration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationResult {
    pub query: Map<String, Value>,
    pub records: Map<String, Value>,
    pub output_columns: Vec<Value>,
    pub column_metadata: Map<String, Value>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}
