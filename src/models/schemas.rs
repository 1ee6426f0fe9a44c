//! Schema and schema privilege models

use serde::{Deserialize, Serialize};

/// Privileges a role can hold on a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaPrivilege {
    Usage,
    Create,
}

/// Schema as returned by `schemas.list` and `schemas.get`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub oid: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_oid: i64,
    pub current_role_priv: Vec<SchemaPrivilege>,
    pub current_role_owns: bool,
    pub table_count: i64,
}

/// Changes for `schemas.patch`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Direct privileges of one role on a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPrivileges {
    pub role_oid: i64,
    pub direct: Vec<SchemaPrivilege>,
}
