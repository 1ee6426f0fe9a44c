//! `roles.*` and `roles.configured.*` procedures

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{ConfiguredRoleInfo, CurrentRole, RoleInfo};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn roles_list(&self, database_id: i64) -> Result<Vec<RoleInfo>> {
        let params = Params::new().set("database_id", database_id);
        self.call("roles.list", params).await
    }

    pub async fn roles_add(
        &self,
        rolename: &str,
        database_id: i64,
        password: Option<&str>,
        login: Option<bool>,
    ) -> Result<RoleInfo> {
        let params = Params::new()
            .set("rolename", rolename)
            .set("database_id", database_id)
            .opt("password", password)
            .opt("login", login);
        self.call("roles.add", params).await
    }

    pub async fn roles_delete(&self, role_oid: i64, database_id: i64) -> Result<()> {
        let params = Params::new().set("role_oid", role_oid).set("database_id", database_id);
        self.call_unit("roles.delete", params).await
    }

    /// The role this connection acts as, with the roles it inherits from
    pub async fn roles_get_current_role(&self, database_id: i64) -> Result<CurrentRole> {
        let params = Params::new().set("database_id", database_id);
        self.call("roles.get_current_role", params).await
    }

    /// Replace the members of `parent_role_oid`
    pub async fn roles_set_members(
        &self,
        parent_role_oid: i64,
        members: &[i64],
        database_id: i64,
    ) -> Result<RoleInfo> {
        let params = Params::new()
            .set("parent_role_oid", parent_role_oid)
            .set("members", members)
            .set("database_id", database_id);
        self.call("roles.set_members", params).await
    }

    pub async fn roles_configured_list(&self, server_id: i64) -> Result<Vec<ConfiguredRoleInfo>> {
        let params = Params::new().set("server_id", server_id);
        self.call("roles.configured.list", params).await
    }

    pub async fn roles_configured_add(
        &self,
        server_id: i64,
        name: &str,
        password: &str,
    ) -> Result<ConfiguredRoleInfo> {
        let params = Params::new()
            .set("server_id", server_id)
            .set("name", name)
            .set("password", password);
        self.call("roles.configured.add", params).await
    }

    pub async fn roles_configured_delete(&self, configured_role_id: i64) -> Result<()> {
        let params = Params::new().set("configured_role_id", configured_role_id);
        self.call_unit("roles.configured.delete", params).await
    }

    pub async fn roles_configured_set_password(&self, configured_role_id: i64, password: &str) -> Result<()> {
        let params = Params::new()
            .set("configured_role_id", configured_role_id)
            .set("password", password);
        self.call_unit("roles.configured.set_password", params).await
    }
}
