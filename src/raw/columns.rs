//! `columns.*` procedures

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{
    ColumnInfo, ColumnMetaDataBlob, ColumnMetaDataRecord, CreatableColumnInfo, PkeyType,
    SettableColumnInfo,
};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn columns_list(&self, table_oid: i64, database_id: i64) -> Result<Vec<ColumnInfo>> {
        let params = Params::new().set("table_oid", table_oid).set("database_id", database_id);
        self.call("columns.list", params).await
    }

    /// Columns with their stored display metadata attached
    pub async fn columns_list_with_metadata(
        &self,
        table_oid: i64,
        database_id: i64,
    ) -> Result<Vec<ColumnInfo>> {
        let params = Params::new().set("table_oid", table_oid).set("database_id", database_id);
        self.call("columns.list_with_metadata", params).await
    }

    /// Add columns, returning their new attnums
    pub async fn columns_add(
        &self,
        column_data_list: &[CreatableColumnInfo],
        table_oid: i64,
        database_id: i64,
    ) -> Result<Vec<i64>> {
        let params = Params::new()
            .set("column_data_list", column_data_list)
            .set("table_oid", table_oid)
            .set("database_id", database_id);
        self.call("columns.add", params).await
    }

    /// Alter columns, returning the number altered
    pub async fn columns_patch(
        &self,
        column_data_list: &[SettableColumnInfo],
        table_oid: i64,
        database_id: i64,
    ) -> Result<i64> {
        let params = Params::new()
            .set("column_data_list", column_data_list)
            .set("table_oid", table_oid)
            .set("database_id", database_id);
        self.call("columns.patch", params).await
    }

    /// Drop columns, returning the number dropped
    pub async fn columns_delete(
        &self,
        column_attnums: &[i64],
        table_oid: i64,
        database_id: i64,
    ) -> Result<i64> {
        let params = Params::new()
            .set("column_attnums", column_attnums)
            .set("table_oid", table_oid)
            .set("database_id", database_id);
        self.call("columns.delete", params).await
    }

    pub async fn columns_add_primary_key_column(
        &self,
        pkey_type: PkeyType,
        table_oid: i64,
        database_id: i64,
        drop_existing_pkey_column: bool,
        name: &str,
    ) -> Result<()> {
        let params = Params::new()
            .set("pkey_type", pkey_type)
            .set("table_oid", table_oid)
            .set("database_id", database_id)
            .set("drop_existing_pkey_column", drop_existing_pkey_column)
            .set("name", name);
        self.call_unit("columns.add_primary_key_column", params).await
    }

    /// Reset the file-backend mash of a file column
    pub async fn columns_reset_mash(
        &self,
        column_attnum: i64,
        table_oid: i64,
        database_id: i64,
    ) -> Result<()> {
        let params = Params::new()
            .set("column_attnum", column_attnum)
            .set("table_oid", table_oid)
            .set("database_id", database_id);
        self.call_unit("columns.reset_mash", params).await
    }

    pub async fn columns_metadata_list(
        &self,
        table_oid: i64,
        database_id: i64,
    ) -> Result<Vec<ColumnMetaDataRecord>> {
        let params = Params::new().set("table_oid", table_oid).set("database_id", database_id);
        self.call("columns.metadata.list", params).await
    }

    pub async fn columns_metadata_set(
        &self,
        column_meta_data_list: &[ColumnMetaDataBlob],
        table_oid: i64,
        database_id: i64,
    ) -> Result<()> {
        let params = Params::new()
            .set("column_meta_data_list", column_meta_data_list)
            .set("table_oid", table_oid)
            .set("database_id", database_id);
        self.call_unit("columns.metadata.set", params).await
    }
}
