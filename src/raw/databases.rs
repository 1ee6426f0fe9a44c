//! `databases.*` procedures, including configured databases and setup

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{
    ConfiguredDatabaseInfo, ConfiguredDatabasePatch, DBPrivileges, DatabaseConnectionResult,
    DatabaseInfo, DisconnectOptions, ExistingDatabase,
};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn databases_get(&self, database_id: i64) -> Result<DatabaseInfo> {
        let params = Params::new().set("database_id", database_id);
        self.call("databases.get", params).await
    }

    /// Drop a database on the server that `database_id` connects to
    pub async fn databases_delete(&self, database_oid: i64, database_id: i64) -> Result<()> {
        let params = Params::new().set("database_oid", database_oid).set("database_id", database_id);
        self.call_unit("databases.delete", params).await
    }

    /// Install or upgrade the server's SQL functions on a database
    pub async fn databases_upgrade_sql(
        &self,
        database_id: i64,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<()> {
        let params = Params::new()
            .set("database_id", database_id)
            .opt("username", username)
            .opt("password", password);
        self.call_unit("databases.upgrade_sql", params).await
    }

    pub async fn databases_privileges_list_direct(&self, database_id: i64) -> Result<Vec<DBPrivileges>> {
        let params = Params::new().set("database_id", database_id);
        self.call("databases.privileges.list_direct", params).await
    }

    pub async fn databases_privileges_replace_for_roles(
        &self,
        privileges: &[DBPrivileges],
        database_id: i64,
    ) -> Result<Vec<DBPrivileges>> {
        let params = Params::new().set("privileges", privileges).set("database_id", database_id);
        self.call("databases.privileges.replace_for_roles", params).await
    }

    pub async fn databases_privileges_transfer_ownership(
        &self,
        new_owner_oid: i64,
        database_id: i64,
    ) -> Result<DatabaseInfo> {
        let params = Params::new().set("new_owner_oid", new_owner_oid).set("database_id", database_id);
        self.call("databases.privileges.transfer_ownership", params).await
    }

    pub async fn databases_configured_list(
        &self,
        server_id: Option<i64>,
    ) -> Result<Vec<ConfiguredDatabaseInfo>> {
        let params = Params::new().opt("server_id", server_id);
        self.call("databases.configured.list", params).await
    }

    pub async fn databases_configured_patch(
        &self,
        database_id: i64,
        patch: &ConfiguredDatabasePatch,
    ) -> Result<ConfiguredDatabaseInfo> {
        let params = Params::new().set("database_id", database_id).set("patch", patch);
        self.call("databases.configured.patch", params).await
    }

    /// Forget a configured database, optionally removing installed schemas
    pub async fn databases_configured_disconnect(
        &self,
        database_id: i64,
        options: &DisconnectOptions,
    ) -> Result<()> {
        let params = Params::new()
            .set("database_id", database_id)
            .opt("schemas_to_remove", options.schemas_to_remove.as_deref())
            .set("strict", options.strict)
            .opt("role_name", options.role_name.as_deref())
            .opt("password", options.password.as_deref())
            .set("disconnect_db_server", options.disconnect_db_server);
        self.call_unit("databases.configured.disconnect", params).await
    }

    /// Create a new database on the internal server and configure it
    pub async fn databases_setup_create_new(
        &self,
        database: &str,
        sample_data: Option<&[String]>,
        nickname: Option<&str>,
    ) -> Result<DatabaseConnectionResult> {
        let params = Params::new()
            .set("database", database)
            .opt("sample_data", sample_data)
            .opt("nickname", nickname);
        self.call("databases.setup.create_new", params).await
    }

    /// Configure an existing database on any reachable server
    pub async fn databases_setup_connect_existing(
        &self,
        existing: &ExistingDatabase,
    ) -> Result<DatabaseConnectionResult> {
        let params = Params::new()
            .set("host", &existing.host)
            .opt("port", existing.port)
            .set("database", &existing.database)
            .set("role", &existing.role)
            .set("password", &existing.password)
            .opt("sample_data", existing.sample_data.as_deref())
            .opt("nickname", existing.nickname.as_deref());
        self.call("databases.setup.connect_existing", params).await
    }
}
