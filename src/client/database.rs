//! Database-scoped operations

use std::sync::Arc;

use tracing::debug;

use super::{Schema, Table};
use crate::error::{ClientError, Result};
use crate::models::{
    CollaboratorInfo, CurrentRole, DBPrivileges, DatabaseInfo, ExplorationDef, ExplorationInfo,
    ExplorationResult, RoleInfo, SchemaInfo, SchemaPatch, SchemaPrivileges,
};
use crate::raw::RawClient;
use crate::transport::{HttpTransport, Transport};

/// One configured database
#[derive(Debug)]
pub struct Database<T = HttpTransport> {
    raw: Arc<RawClient<T>>,
    database_id: i64,
}

impl<T> Clone for Database<T> {
    fn clone(&self) -> Self {
        Self { raw: Arc::clone(&self.raw), database_id: self.database_id }
    }
}

impl<T: Transport> Database<T> {
    pub(crate) const fn new(raw: Arc<RawClient<T>>, database_id: i64) -> Self {
        Self { raw, database_id }
    }

    pub const fn id(&self) -> i64 {
        self.database_id
    }

    /// Scope calls to a schema by OID
    pub fn schema(&self, schema_oid: i64) -> Schema<T> {
        Schema::new(Arc::clone(&self.raw), self.database_id, schema_oid)
    }

    /// Scope calls to a table by OID, skipping the schema
    pub fn table(&self, table_oid: i64) -> Table<T> {
        Table::new(Arc::clone(&self.raw), self.database_id, table_oid)
    }

    /// Find a schema by name
    ///
    /// Lists schemas on every call.
    ///
    /// # Errors
    /// `NotFound` if no schema has this name.
    pub async fn schema_by_name(&self, name: &str) -> Result<Schema<T>> {
        let schemas = self.list_schemas().await?;
        let found = schemas
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ClientError::not_found("Schema", name))?;
        debug!(schema = name, oid = found.oid, "resolved schema by name");
        Ok(self.schema(found.oid))
    }

    // Schemas

    pub async fn list_schemas(&self) -> Result<Vec<SchemaInfo>> {
        self.raw.schemas_list(self.database_id).await
    }

    pub async fn add_schema(
        &self,
        name: &str,
        owner_oid: Option<i64>,
        description: Option<&str>,
    ) -> Result<SchemaInfo> {
        self.raw.schemas_add(name, self.database_id, owner_oid, description).await
    }

    pub async fn get_schema(&self, schema_oid: i64) -> Result<SchemaInfo> {
        self.raw.schemas_get(schema_oid, self.database_id).await
    }

    pub async fn delete_schemas(&self, schema_oids: &[i64]) -> Result<()> {
        self.raw.schemas_delete(schema_oids, self.database_id).await
    }

    pub async fn patch_schema(&self, schema_oid: i64, patch: &SchemaPatch) -> Result<SchemaInfo> {
        self.raw.schemas_patch(schema_oid, self.database_id, patch).await
    }

    pub async fn schema_privileges_list(&self, schema_oid: i64) -> Result<Vec<SchemaPrivileges>> {
        self.raw.schemas_privileges_list_direct(schema_oid, self.database_id).await
    }

    pub async fn schema_privileges_replace_for_roles(
        &self,
        schema_oid: i64,
        privileges: &[SchemaPrivileges],
    ) -> Result<Vec<SchemaPrivileges>> {
        self.raw.schemas_privileges_replace_for_roles(privileges, schema_oid, self.database_id).await
    }

    pub async fn schema_transfer_ownership(&self, schema_oid: i64, new_owner_oid: i64) -> Result<SchemaInfo> {
        self.raw
            .schemas_privileges_transfer_ownership(schema_oid, new_owner_oid, self.database_id)
            .await
    }

    // Database

    pub async fn info(&self) -> Result<DatabaseInfo> {
        self.raw.databases_get(self.database_id).await
    }

    /// Drop the database with `database_oid` on this database's server
    pub async fn delete(&self, database_oid: i64) -> Result<()> {
        self.raw.databases_delete(database_oid, self.database_id).await
    }

    pub async fn upgrade_sql(&self, username: Option<&str>, password: Option<&str>) -> Result<()> {
        self.raw.databases_upgrade_sql(self.database_id, username, password).await
    }

    pub async fn list_privileges(&self) -> Result<Vec<DBPrivileges>> {
        self.raw.databases_privileges_list_direct(self.database_id).await
    }

    pub async fn replace_privileges_for_roles(&self, privileges: &[DBPrivileges]) -> Result<Vec<DBPrivileges>> {
        self.raw.databases_privileges_replace_for_roles(privileges, self.database_id).await
    }

    pub async fn transfer_ownership(&self, new_owner_oid: i64) -> Result<DatabaseInfo> {
        self.raw.databases_privileges_transfer_ownership(new_owner_oid, self.database_id).await
    }

    // Explorations

    pub async fn explorations_list(&self, schema_oid: Option<i64>) -> Result<Vec<ExplorationInfo>> {
        self.raw.explorations_list(self.database_id, schema_oid).await
    }

    pub async fn exploration(&self, exploration_id: i64) -> Result<ExplorationInfo> {
        self.raw.explorations_get(exploration_id).await
    }

    pub async fn explorations_add(&self, exploration_def: &ExplorationDef) -> Result<ExplorationInfo> {
        self.raw.explorations_add(exploration_def).await
    }

    pub async fn explorations_delete(&self, exploration_id: i64) -> Result<()> {
        self.raw.explorations_delete(exploration_id).await
    }

    pub async fn explorations_replace(&self, new_exploration: &ExplorationInfo) -> Result<ExplorationInfo> {
        self.raw.explorations_replace(new_exploration).await
    }

    pub async fn explorations_run(
        &self,
        exploration_def: &ExplorationDef,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<ExplorationResult> {
        self.raw.explorations_run(exploration_def, limit, offset).await
    }

    pub async fn explorations_run_saved(
        &self,
        exploration_id: i64,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<ExplorationResult> {
        self.raw.explorations_run_saved(exploration_id, limit, offset).await
    }

    // Collaborators

    pub async fn collaborators_list(&self) -> Result<Vec<CollaboratorInfo>> {
        self.raw.collaborators_list(self.database_id).await
    }

    pub async fn collaborators_add(&self, user_id: i64, configured_role_id: i64) -> Result<CollaboratorInfo> {
        self.raw.collaborators_add(self.database_id, user_id, configured_role_id).await
    }

    pub async fn collaborators_delete(&self, collaborator_id: i64) -> Result<()> {
        self.raw.collaborators_delete(collaborator_id).await
    }

    pub async fn collaborators_set_role(
        &self,
        collaborator_id: i64,
        configured_role_id: i64,
    ) -> Result<CollaboratorInfo> {
        self.raw.collaborators_set_role(collaborator_id, configured_role_id).await
    }

    // Roles

    pub async fn roles_list(&self) -> Result<Vec<RoleInfo>> {
        self.raw.roles_list(self.database_id).await
    }

    pub async fn roles_add(&self, rolename: &str, password: Option<&str>, login: Option<bool>) -> Result<RoleInfo> {
        self.raw.roles_add(rolename, self.database_id, password, login).await
    }

    pub async fn roles_delete(&self, role_oid: i64) -> Result<()> {
        self.raw.roles_delete(role_oid, self.database_id).await
    }

    pub async fn roles_get_current_role(&self) -> Result<CurrentRole> {
        self.raw.roles_get_current_role(self.database_id).await
    }

    pub async fn roles_set_members(&self, parent_role_oid: i64, members: &[i64]) -> Result<RoleInfo> {
        self.raw.roles_set_members(parent_role_oid, members, self.database_id).await
    }
}
