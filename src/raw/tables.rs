//! `tables.*` procedures

use serde_json::{Map, Value};

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{
    AddedTableInfo, JoinableTableInfo, NewTable, SettableColumnInfo, SettableTableInfo, TableInfo,
    TableMetaDataBlob, TableMetaDataRecord, TablePrivileges,
};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn tables_list(&self, schema_oid: i64, database_id: i64) -> Result<Vec<TableInfo>> {
        let params = Params::new().set("schema_oid", schema_oid).set("database_id", database_id);
        self.call("tables.list", params).await
    }

    /// Tables with their stored metadata; shape is server-defined
    pub async fn tables_list_with_metadata(
        &self,
        schema_oid: i64,
        database_id: i64,
    ) -> Result<Vec<Map<String, Value>>> {
        let params = Params::new().set("schema_oid", schema_oid).set("database_id", database_id);
        self.call("tables.list_with_metadata", params).await
    }

    pub async fn tables_get(&self, table_oid: i64, database_id: i64) -> Result<TableInfo> {
        let params = Params::new().set("table_oid", table_oid).set("database_id", database_id);
        self.call("tables.get", params).await
    }

    pub async fn tables_get_with_metadata(
        &self,
        table_oid: i64,
        database_id: i64,
    ) -> Result<Map<String, Value>> {
        let params = Params::new().set("table_oid", table_oid).set("database_id", database_id);
        self.call("tables.get_with_metadata", params).await
    }

    pub async fn tables_add(
        &self,
        schema_oid: i64,
        database_id: i64,
        table: &NewTable,
    ) -> Result<AddedTableInfo> {
        let params = Params::new()
            .set("schema_oid", schema_oid)
            .set("database_id", database_id)
            .opt("table_name", table.table_name.as_deref())
            .opt("pkey_column_info", table.pkey_column_info.as_ref())
            .opt("column_data_list", table.column_data_list.as_deref())
            .opt("constraint_data_list", table.constraint_data_list.as_deref())
            .opt("owner_oid", table.owner_oid)
            .opt("comment", table.comment.as_deref());
        self.call("tables.add", params).await
    }

    /// Drop a table, returning its fully qualified name
    pub async fn tables_delete(&self, table_oid: i64, database_id: i64, cascade: bool) -> Result<String> {
        let params = Params::new()
            .set("table_oid", table_oid)
            .set("database_id", database_id)
            .set("cascade", cascade);
        self.call("tables.delete", params).await
    }

    /// Alter a table, returning its (possibly new) name
    pub async fn tables_patch(
        &self,
        table_oid: i64,
        table_data_dict: &SettableTableInfo,
        database_id: i64,
    ) -> Result<String> {
        let params = Params::new()
            .set("table_oid", table_oid)
            .set("table_data_dict", table_data_dict)
            .set("database_id", database_id);
        self.call("tables.patch", params).await
    }

    /// Create a table from an uploaded data file
    pub async fn tables_import(
        &self,
        data_file_id: i64,
        schema_oid: i64,
        database_id: i64,
        table_name: Option<&str>,
        comment: Option<&str>,
    ) -> Result<AddedTableInfo> {
        let params = Params::new()
            .set("data_file_id", data_file_id)
            .set("schema_oid", schema_oid)
            .set("database_id", database_id)
            .opt("table_name", table_name)
            .opt("comment", comment);
        self.call("tables.import", params).await
    }

    /// Preview rows of an imported table as they would look after casting columns
    pub async fn tables_get_import_preview(
        &self,
        table_oid: i64,
        columns: &[SettableColumnInfo],
        database_id: i64,
        limit: i64,
    ) -> Result<Vec<Map<String, Value>>> {
        let params = Params::new()
            .set("table_oid", table_oid)
            .set("columns", columns)
            .set("database_id", database_id)
            .set("limit", limit);
        self.call("tables.get_import_preview", params).await
    }

    pub async fn tables_list_joinable(
        &self,
        table_oid: i64,
        database_id: i64,
        max_depth: i64,
    ) -> Result<JoinableTableInfo> {
        let params = Params::new()
            .set("table_oid", table_oid)
            .set("database_id", database_id)
            .set("max_depth", max_depth);
        self.call("tables.list_joinable", params).await
    }

    pub async fn tables_metadata_list(&self, database_id: i64) -> Result<Vec<TableMetaDataRecord>> {
        let params = Params::new().set("database_id", database_id);
        self.call("tables.metadata.list", params).await
    }

    pub async fn tables_metadata_set(
        &self,
        table_oid: i64,
        metadata: &TableMetaDataBlob,
        database_id: i64,
    ) -> Result<()> {
        let params = Params::new()
            .set("table_oid", table_oid)
            .set("metadata", metadata)
            .set("database_id", database_id);
        self.call_unit("tables.metadata.set", params).await
    }

    pub async fn tables_privileges_list_direct(
        &self,
        table_oid: i64,
        database_id: i64,
    ) -> Result<Vec<TablePrivileges>> {
        let params = Params::new().set("table_oid", table_oid).set("database_id", database_id);
        self.call("tables.privileges.list_direct", params).await
    }

    /// Replace the direct privileges of the listed roles
    pub async fn tables_privileges_replace_for_roles(
        &self,
        privileges: &[TablePrivileges],
        table_oid: i64,
        database_id: i64,
    ) -> Result<Vec<TablePrivileges>> {
        let params = Params::new()
            .set("privileges", privileges)
            .set("table_oid", table_oid)
            .set("database_id", database_id);
        self.call("tables.privileges.replace_for_roles", params).await
    }

    pub async fn tables_privileges_transfer_ownership(
        &self,
        table_oid: i64,
        new_owner_oid: i64,
        database_id: i64,
    ) -> Result<TableInfo> {
        let params = Params::new()
            .set("table_oid", table_oid)
            .set("new_owner_oid", new_owner_oid)
            .set("database_id", database_id);
        self.call("tables.privileges.transfer_ownership", params).await
    }
}
