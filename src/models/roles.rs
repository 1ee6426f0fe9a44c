//! Role and configured role models

use serde::{Deserialize, Serialize};

/// Member of a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMember {
    pub oid: i64,
    pub admin: bool,
}

/// Database role as returned by `roles.list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    pub oid: i64,
    pub name: String,
    #[serde(rename = "super")]
    pub is_super: bool,
    pub inherits: bool,
    pub create_role: bool,
    pub create_db: bool,
    pub login: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Option<Vec<RoleMember>>,
}

/// Response of `roles.get_current_role`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentRole {
    pub current_role: RoleInfo,
    #[serde(default)]
    pub parent_roles: Vec<RoleInfo>,
}

/// Role credentials stored on the server for a database server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredRoleInfo {
    pub id: i64,
    pub name: String,
    pub server_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_info_super_field() {
        let role: RoleInfo = serde_json::from_value(json!({
            "oid": 10,
            "name": "mathesar",
            "super": true,
            "inherits": true,
            "create_role": true,
            "create_db": true,
            "login": true,
            "members": [{"oid": 16384, "admin": false}]
        }))
        .unwrap();
        assert!(role.is_super);
        assert_eq!(role.members.unwrap()[0].oid, 16384);
        assert!(role.description.is_none());
    }
}
