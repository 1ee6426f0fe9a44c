//! Constraint models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Constraint definition for `constraints.add`, tagged by the wire `type` code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConstraintDef {
    #[serde(rename = "p")]
    PrimaryKey {
        columns: Vec<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deferrable: Option<bool>,
    },
    #[serde(rename = "u")]
    Unique {
        columns: Vec<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deferrable: Option<bool>,
    },
    #[serde(rename = "f")]
    ForeignKey {
        columns: Vec<i64>,
        fkey_relation_id: i64,
        fkey_columns: Vec<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deferrable: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fkey_update_action: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fkey_delete_action: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fkey_match_type: Option<String>,
    },
}

/// Foreign key options beyond the column lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKeyOptions {
    pub name: Option<String>,
    pub deferrable: Option<bool>,
    pub update_action: Option<String>,
    pub delete_action: Option<String>,
    pub match_type: Option<String>,
}

/// Constraint as returned by `constraints.list`
///
/// Fields the client does not model are kept in `extra` rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintInfo {
    pub oid: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referent_table_oid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referent_columns: Option<Vec<i64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
