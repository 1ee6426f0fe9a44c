//! `schemas.*` procedures

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{SchemaInfo, SchemaPatch, SchemaPrivileges};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn schemas_list(&self, database_id: i64) -> Result<Vec<SchemaInfo>> {
        let params = Params::new().set("database_id", database_id);
        self.call("schemas.list", params).await
    }

    pub async fn schemas_get(&self, schema_oid: i64, database_id: i64) -> Result<SchemaInfo> {
        let params = Params::new().set("schema_oid", schema_oid).set("database_id", database_id);
        self.call("schemas.get", params).await
    }

    pub async fn schemas_add(
        &self,
        name: &str,
        database_id: i64,
        owner_oid: Option<i64>,
        description: Option<&str>,
    ) -> Result<SchemaInfo> {
        let params = Params::new()
            .set("name", name)
            .set("database_id", database_id)
            .opt("owner_oid", owner_oid)
            .opt("description", description);
        self.call("schemas.add", params).await
    }

    pub async fn schemas_delete(&self, schema_oids: &[i64], database_id: i64) -> Result<()> {
        let params = Params::new().set("schema_oids", schema_oids).set("database_id", database_id);
        self.call_unit("schemas.delete", params).await
    }

    pub async fn schemas_patch(
        &self,
        schema_oid: i64,
        database_id: i64,
        patch: &SchemaPatch,
    ) -> Result<SchemaInfo> {
        let params = Params::new()
            .set("schema_oid", schema_oid)
            .set("database_id", database_id)
            .set("patch", patch);
        self.call("schemas.patch", params).await
    }

    pub async fn schemas_privileges_list_direct(
        &self,
        schema_oid: i64,
        database_id: i64,
    ) -> Result<Vec<SchemaPrivileges>> {
        let params = Params::new().set("schema_oid", schema_oid).set("database_id", database_id);
        self.call("schemas.privileges.list_direct", params).await
    }

    pub async fn schemas_privileges_replace_for_roles(
        &self,
        privileges: &[SchemaPrivileges],
        schema_oid: i64,
        database_id: i64,
    ) -> Result<Vec<SchemaPrivileges>> {
        let params = Params::new()
            .set("privileges", privileges)
            .set("schema_oid", schema_oid)
            .set("database_id", database_id);
        self.call("schemas.privileges.replace_for_roles", params).await
    }

    pub async fn schemas_privileges_transfer_ownership(
        &self,
        schema_oid: i64,
        new_owner_oid: i64,
        database_id: i64,
    ) -> Result<SchemaInfo> {
        let params = Params::new()
            .set("schema_oid", schema_oid)
            .set("new_owner_oid", new_owner_oid)
            .set("database_id", database_id);
        self.call("schemas.privileges.transfer_ownership", params).await
    }
}
