//! `users.*` procedures

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{UserDef, UserInfo, UserProfile};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn users_list(&self) -> Result<Vec<UserInfo>> {
        self.call("users.list", Params::new()).await
    }

    pub async fn users_get(&self, user_id: i64) -> Result<UserInfo> {
        let params = Params::new().set("user_id", user_id);
        self.call("users.get", params).await
    }

    pub async fn users_add(&self, user_def: &UserDef) -> Result<UserInfo> {
        let params = Params::new().set("user_def", user_def);
        self.call("users.add", params).await
    }

    pub async fn users_delete(&self, user_id: i64) -> Result<()> {
        let params = Params::new().set("user_id", user_id);
        self.call_unit("users.delete", params).await
    }

    /// Update the profile of the authenticated user
    pub async fn users_patch_self(&self, profile: &UserProfile) -> Result<UserInfo> {
        let params = Params::new().merge(profile);
        self.call("users.patch_self", params).await
    }

    /// Update another user's profile (superuser only)
    pub async fn users_patch_other(
        &self,
        user_id: i64,
        is_superuser: bool,
        profile: &UserProfile,
    ) -> Result<UserInfo> {
        let params = Params::new()
            .set("user_id", user_id)
            .set("is_superuser", is_superuser)
            .merge(profile);
        self.call("users.patch_other", params).await
    }

    pub async fn users_password_replace_own(&self, old_password: &str, new_password: &str) -> Result<()> {
        let params = Params::new()
            .set("old_password", old_password)
            .set("new_password", new_password);
        self.call_unit("users.password.replace_own", params).await
    }

    /// Reset another user's password (superuser only)
    pub async fn users_password_revoke(&self, user_id: i64, new_password: &str) -> Result<()> {
        let params = Params::new().set("user_id", user_id).set("new_password", new_password);
        self.call_unit("users.password.revoke", params).await
    }
}
