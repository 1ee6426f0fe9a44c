//! Form models
//!
//! Forms are public or role-bound data entry pages built on top of a base
//! table. Fields nest: a foreign key field may carry child fields describing
//! the record it creates in the related table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What a form field writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    ScalarColumn,
    ForeignKey,
}

/// How a foreign key field lets the submitter pick the linked record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FkInteractionRule {
    MustPick,
    CanPickOrCreate,
    MustCreate,
}

/// A field of a saved form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub id: i64,
    pub key: String,
    pub form_id: i64,
    pub index: i64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    pub kind: FieldKind,
    #[serde(default)]
    pub column_attnum: Option<i64>,
    #[serde(default)]
    pub related_table_oid: Option<i64>,
    pub fk_interaction_rule: FkInteractionRule,
    #[serde(default)]
    pub parent_field_id: Option<i64>,
    #[serde(default)]
    pub styling: Option<Map<String, Value>>,
    pub is_required: bool,
    #[serde(default)]
    pub child_fields: Option<Vec<FieldInfo>>,
}

/// A saved form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInfo {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub token: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: i64,
    pub database_id: i64,
    pub schema_oid: i64,
    pub base_table_oid: i64,
    #[serde(default)]
    pub associated_role_id: Option<i64>,
    pub header_title: Map<String, Value>,
    #[serde(default)]
    pub header_subtitle: Option<Map<String, Value>>,
    pub publish_public: bool,
    #[serde(default)]
    pub submit_message: Option<Map<String, Value>>,
    #[serde(default)]
    pub submit_redirect_url: Option<String>,
    #[serde(default)]
    pub submit_button_label: Option<String>,
    pub fields: Vec<FieldInfo>,
}

/// Field definition used when adding or replacing a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOrReplaceFieldDef {
    pub key: String,
    pub index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_attnum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_table_oid: Option<i64>,
    pub fk_interaction_rule: FkInteractionRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_fields: Option<Vec<AddOrReplaceFieldDef>>,
}

/// Definition for `forms.add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFormDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: i64,
    pub database_id: i64,
    pub schema_oid: i64,
    pub base_table_oid: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_role_id: Option<i64>,
    pub header_title: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_subtitle: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_message: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_redirect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_button_label: Option<String>,
    pub fields: Vec<AddOrReplaceFieldDef>,
}

/// Definition for `forms.patch`: a full form definition plus the form id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettableFormDef {
    pub id: i64,
    #[serde(flatten)]
    pub def: AddFormDef,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_field_info() {
        let field: FieldInfo = serde_json::from_value(json!({
            "id": 1,
            "key": "author",
            "form_id": 3,
            "index": 0,
            "kind": "foreign_key",
            "related_table_oid": 18090,
            "fk_interaction_rule": "can_pick_or_create",
            "is_required": true,
            "child_fields": [{
                "id": 2,
                "key": "author_name",
                "form_id": 3,
                "index": 0,
                "kind": "scalar_column",
                "column_attnum": 2,
                "fk_interaction_rule": "must_pick",
                "parent_field_id": 1,
                "is_required": false
            }]
        }))
        .unwrap();
        assert_eq!(field.kind, FieldKind::ForeignKey);
        assert_eq!(field.fk_interaction_rule, FkInteractionRule::CanPickOrCreate);
        let children = field.child_fields.unwrap();
        assert_eq!(children[0].parent_field_id, Some(1));
        assert_eq!(children[0].kind, FieldKind::ScalarColumn);
    }

    #[test]
    fn test_settable_form_def_flattens() {
        let def = SettableFormDef {
            id: 9,
            def: AddFormDef {
                name: "Signup".to_string(),
                description: None,
                version: 2,
                database_id: 1,
                schema_oid: 2200,
                base_table_oid: 18087,
                associated_role_id: None,
                header_title: Map::new(),
                header_subtitle: None,
                submit_message: None,
                submit_redirect_url: None,
                submit_button_label: None,
                fields: vec![],
            },
        };
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["id"], json!(9));
        assert_eq!(value["name"], json!("Signup"));
        assert!(value.get("description").is_none());
    }
}
