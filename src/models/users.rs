//! User models

use serde::{Deserialize, Serialize};

/// Application user as returned by `users.list` and `users.get`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub is_superuser: bool,
    pub email: String,
    pub full_name: String,
    pub display_language: String,
}

/// New user definition for `users.add`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDef {
    pub username: String,
    /// WARNING: Sensitive data, do not log
    pub password: String,
    pub is_superuser: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_language: Option<String>,
}

impl std::fmt::Debug for UserDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDef")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("is_superuser", &self.is_superuser)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("display_language", &self.display_language)
            .finish()
    }
}

/// Profile fields for `users.patch_self` and `users.patch_other`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub display_language: String,
}
