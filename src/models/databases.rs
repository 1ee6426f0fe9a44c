//! Database, configured database and setup models

use serde::{Deserialize, Serialize};

use super::roles::ConfiguredRoleInfo;

/// Privileges a role can hold on a database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DatabasePrivilege {
    Connect,
    Create,
    Temporary,
}

/// Database as returned by `databases.get`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub oid: i64,
    pub name: String,
    pub owner_oid: i64,
    pub current_role_priv: Vec<DatabasePrivilege>,
    pub current_role_owns: bool,
}

/// Direct privileges of one role on a database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DBPrivileges {
    pub role_oid: i64,
    pub direct: Vec<DatabasePrivilege>,
}

/// A database the server has been configured to connect to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredDatabaseInfo {
    pub id: i64,
    pub name: String,
    pub server_id: i64,
    pub last_confirmed_sql_version: String,
    pub needs_upgrade_attention: bool,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Changes for `databases.configured.patch`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredDatabasePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

/// A database server the server has been configured to connect to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredServerInfo {
    pub id: i64,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

/// Result of `databases.setup.create_new` and `databases.setup.connect_existing`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConnectionResult {
    pub server: ConfiguredServerInfo,
    pub database: ConfiguredDatabaseInfo,
    pub configured_role: ConfiguredRoleInfo,
}

/// Options for `databases.configured.disconnect`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOptions {
    pub schemas_to_remove: Option<Vec<String>>,
    pub strict: bool,
    pub role_name: Option<String>,
    pub password: Option<String>,
    pub disconnect_db_server: bool,
}

impl Default for DisconnectOptions {
    fn default() -> Self {
        Self {
            schemas_to_remove: None,
            strict: true,
            role_name: None,
            password: None,
            disconnect_db_server: false,
        }
    }
}

/// Connection details for `databases.setup.connect_existing`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingDatabase {
    pub host: String,
    pub port: Option<u16>,
    pub database: String,
    pub role: String,
    pub password: String,
    pub sample_data: Option<Vec<String>>,
    pub nickname: Option<String>,
}
