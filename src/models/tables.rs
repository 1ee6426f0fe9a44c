//! Table, table metadata and table privilege models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::columns::{CreatableColumnInfo, CreatablePkColumnInfo, SettableColumnInfo};
use super::constraints::ConstraintDef;

/// Privileges a role can hold on a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TablePrivilege {
    Select,
    Insert,
    Update,
    Delete,
    Truncate,
    References,
    Trigger,
}

/// Table as returned by `tables.list` and `tables.get`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub oid: i64,
    pub name: String,
    /// OID of the containing schema
    pub schema: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_oid: i64,
    pub current_role_priv: Vec<TablePrivilege>,
    pub current_role_owns: bool,
}

/// Response of `tables.add` and `tables.import`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedTableInfo {
    pub oid: i64,
    pub name: String,
    #[serde(default)]
    pub renamed_columns: Option<Map<String, Value>>,
}

/// Optional arguments of `tables.add`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTable {
    pub table_name: Option<String>,
    pub pkey_column_info: Option<CreatablePkColumnInfo>,
    pub column_data_list: Option<Vec<CreatableColumnInfo>>,
    pub constraint_data_list: Option<Vec<ConstraintDef>>,
    pub owner_oid: Option<i64>,
    pub comment: Option<String>,
}

/// Changes for `tables.patch`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettableTableInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<SettableColumnInfo>>,
}

/// One path to a joinable table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinableTableRecord {
    pub base: i64,
    pub target: i64,
    pub join_path: Vec<Value>,
    pub fkey_path: Vec<Value>,
    pub depth: i64,
    pub multiple_results: bool,
}

/// Response of `tables.list_joinable`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinableTableInfo {
    pub joinable_tables: Vec<JoinableTableRecord>,
    pub target_table_info: Value,
}

/// Part of a record summary template: literal text or a column path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryTemplatePart {
    Text(String),
    ColumnPath(Vec<i64>),
}

/// Client-side metadata stored for a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetaDataBlob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_order: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_summary_template: Option<std::collections::BTreeMap<String, SummaryTemplatePart>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mathesar_added_pkey_attnum: Option<i64>,
}

/// Stored table metadata as returned by `tables.metadata.list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetaDataRecord {
    pub id: i64,
    pub database_id: i64,
    pub table_oid: i64,
    #[serde(flatten)]
    pub blob: TableMetaDataBlob,
}

/// Direct privileges of one role on a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePrivileges {
    pub role_oid: i64,
    pub direct: Vec<TablePrivilege>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_info_deserialization() {
        let table: TableInfo = serde_json::from_value(json!({
            "oid": 18087,
            "name": "users",
            "schema": 2200,
            "description": null,
            "owner_oid": 10,
            "current_role_priv": ["SELECT", "INSERT", "TRIGGER"],
            "current_role_owns": true
        }))
        .unwrap();
        assert_eq!(table.oid, 18087);
        assert_eq!(table.current_role_priv.len(), 3);
    }

    #[test]
    fn test_summary_template_parts() {
        let blob: TableMetaDataBlob = serde_json::from_value(json!({
            "record_summary_template": {"0": "Book: ", "1": [2, 5]}
        }))
        .unwrap();
        let template = blob.record_summary_template.unwrap();
        assert_eq!(template["0"], SummaryTemplatePart::Text("Book: ".to_string()));
        assert_eq!(template["1"], SummaryTemplatePart::ColumnPath(vec![2, 5]));
    }

    #[test]
    fn test_settable_table_info_omits_unset() {
        let patch = SettableTableInfo { name: Some("people".to_string()), ..Default::default() };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"name": "people"}));
    }
}
