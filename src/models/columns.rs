//! Column models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Privileges the current role can hold on a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnPrivilege {
    Select,
    Insert,
    Update,
    References,
}

/// Type parameters of a column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

/// Default value of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefault {
    pub value: String,
    pub is_dynamic: bool,
}

/// Column descriptor returned by `columns.list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Attribute number, stable and unique within the table
    pub id: i64,
    /// Column name, unique within the table at a point in time
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub type_options: Option<TypeOptions>,
    pub nullable: bool,
    pub primary_key: bool,
    #[serde(default)]
    pub default: Option<ColumnDefault>,
    pub has_dependents: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub current_role_priv: Vec<ColumnPrivilege>,
    /// Display metadata, present in `columns.list_with_metadata` responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Primary key column kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PkeyType {
    #[serde(rename = "IDENTITY")]
    Identity,
    #[serde(rename = "UUIDv4")]
    UuidV4,
}

impl std::str::FromStr for PkeyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDENTITY" => Ok(Self::Identity),
            "UUIDv4" => Ok(Self::UuidV4),
            other => Err(format!("invalid primary key type '{other}'")),
        }
    }
}

/// Primary key column definition for new tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatablePkColumnInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub pkey_type: Option<PkeyType>,
}

/// Column definition for `columns.add` and `tables.add`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatableColumnInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ColumnDefault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreatableColumnInfo {
    /// A named column of the given type
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self { name: Some(name.into()), data_type: Some(data_type.into()), ..Default::default() }
    }
}

/// Changes to an existing column; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnChanges {
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_options: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ColumnDefault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ColumnChanges {
    /// Rename only
    pub fn rename(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Default::default() }
    }
}

/// Column patch for `columns.patch`, addressed by attnum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettableColumnInfo {
    pub id: i64,
    #[serde(flatten)]
    pub changes: ColumnChanges,
}

/// Boolean input widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolInput {
    Dropdown,
    Checkbox,
}

/// Currency symbol placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurrencyLocation {
    AfterMinus,
    EndWithSpace,
}

/// Display metadata for one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetaDataBlob {
    pub attnum: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_input: Option<BoolInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_true: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_false: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_min_frac_digits: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_max_frac_digits: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_grouping: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mon_currency_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mon_currency_location: Option<CurrencyLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_backend: Option<i64>,
}

/// Stored display metadata for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetaDataRecord {
    pub database_id: i64,
    pub table_oid: i64,
    #[serde(flatten)]
    pub blob: ColumnMetaDataBlob,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn column_json() -> Value {
        json!({
            "id": 2,
            "name": "email",
            "type": "text",
            "type_options": null,
            "nullable": true,
            "primary_key": false,
            "default": null,
            "has_dependents": false,
            "description": null,
            "current_role_priv": ["SELECT", "UPDATE"]
        })
    }

    #[test]
    fn test_column_info_deserialization() {
        let column: ColumnInfo = serde_json::from_value(column_json()).unwrap();
        assert_eq!(column.id, 2);
        assert_eq!(column.name, "email");
        assert_eq!(column.data_type, "text");
        assert_eq!(column.current_role_priv, vec![ColumnPrivilege::Select, ColumnPrivilege::Update]);
    }

    #[test]
    fn test_unknown_privilege_is_rejected() {
        let mut value = column_json();
        value["current_role_priv"] = json!(["DELETE"]);
        assert!(serde_json::from_value::<ColumnInfo>(value).is_err());
    }

    #[test]
    fn test_settable_column_flattens_changes() {
        let patch = SettableColumnInfo { id: 3, changes: ColumnChanges::rename("mail") };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"id": 3, "name": "mail"}));
    }

    #[test]
    fn test_creatable_column_omits_unset() {
        let column = CreatableColumnInfo::new("age", "integer");
        assert_eq!(serde_json::to_value(&column).unwrap(), json!({"name": "age", "type": "integer"}));
    }

    #[test]
    fn test_pkey_type_wire_names() {
        let pk = CreatablePkColumnInfo { name: None, pkey_type: Some(PkeyType::UuidV4) };
        assert_eq!(serde_json::to_value(&pk).unwrap(), json!({"type": "UUIDv4"}));
        assert_eq!("IDENTITY".parse::<PkeyType>().unwrap(), PkeyType::Identity);
    }

    #[test]
    fn test_column_metadata_record_flattens_blob() {
        let record: ColumnMetaDataRecord = serde_json::from_value(json!({
            "database_id": 1,
            "table_oid": 99,
            "attnum": 4,
            "bool_input": "checkbox",
            "mon_currency_location": "after-minus"
        }))
        .unwrap();
        assert_eq!(record.blob.attnum, 4);
        assert_eq!(record.blob.bool_input, Some(BoolInput::Checkbox));
        assert_eq!(record.blob.mon_currency_location, Some(CurrencyLocation::AfterMinus));
    }
}
