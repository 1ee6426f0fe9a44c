//! Analytics, collaborator and data modeling models

use serde::{Deserialize, Serialize};

/// Whether usage analytics are being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsState {
    pub enabled: bool,
}

/// Usage report as shown by `analytics.view_report`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    #[serde(default)]
    pub installation_id: Option<String>,
    pub mathesar_version: String,
    pub user_count: i64,
    pub active_user_count: i64,
    pub configured_role_count: i64,
    pub connected_database_count: i64,
    pub connected_database_schema_count: i64,
    pub connected_database_table_count: i64,
    pub connected_database_record_count: i64,
    pub exploration_count: i64,
    pub form_count: i64,
    pub public_form_count: i64,
}

/// A user granted access to a database through a configured role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorInfo {
    pub id: i64,
    pub user_id: i64,
    pub database_id: i64,
    pub configured_role_id: i64,
}

/// Foreign key column of a new mapping table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingColumn {
    pub column_name: String,
    pub referent_table_oid: i64,
}

/// Result of `data_modeling.split_table`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitTableInfo {
    pub extracted_table_oid: i64,
    pub new_fkey_attnum: i64,
}
