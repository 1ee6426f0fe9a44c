//! Schema-scoped operations

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use super::Table;
use crate::error::{ClientError, Result};
use crate::models::{
    AddFormDef, AddedTableInfo, FormInfo, MappingColumn, NewTable, RecordSummaryList,
    SettableFormDef, TableInfo,
};
use crate::raw::RawClient;
use crate::transport::{HttpTransport, Transport};

/// One schema of a configured database
#[derive(Debug)]
pub struct Schema<T = HttpTransport> {
    raw: Arc<RawClient<T>>,
    database_id: i64,
    schema_oid: i64,
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Self { raw: Arc::clone(&self.raw), database_id: self.database_id, schema_oid: self.schema_oid }
    }
}

impl<T: Transport> Schema<T> {
    pub(crate) const fn new(raw: Arc<RawClient<T>>, database_id: i64, schema_oid: i64) -> Self {
        Self { raw, database_id, schema_oid }
    }

    pub const fn oid(&self) -> i64 {
        self.schema_oid
    }

    pub const fn database_id(&self) -> i64 {
        self.database_id
    }

    /// Scope calls to a table by OID
    pub fn table(&self, table_oid: i64) -> Table<T> {
        Table::new(Arc::clone(&self.raw), self.database_id, table_oid)
    }

    /// Find a table by name
    ///
    /// Lists tables on every call.
    ///
    /// # Errors
    /// `NotFound` if no table in this schema has this name.
    pub async fn table_by_name(&self, name: &str) -> Result<Table<T>> {
        let tables = self.list_tables().await?;
        let found = tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ClientError::not_found("Table", name))?;
        debug!(table = name, oid = found.oid, "resolved table by name");
        Ok(self.table(found.oid))
    }

    // Tables

    pub async fn list_tables(&self) -> Result<Vec<TableInfo>> {
        self.raw.tables_list(self.schema_oid, self.database_id).await
    }

    pub async fn list_tables_with_metadata(&self) -> Result<Vec<Map<String, Value>>> {
        self.raw.tables_list_with_metadata(self.schema_oid, self.database_id).await
    }

    pub async fn add_table(&self, table: &NewTable) -> Result<AddedTableInfo> {
        self.raw.tables_add(self.schema_oid, self.database_id, table).await
    }

    pub async fn import_table(
        &self,
        data_file_id: i64,
        table_name: Option<&str>,
        comment: Option<&str>,
    ) -> Result<AddedTableInfo> {
        self.raw
            .tables_import(data_file_id, self.schema_oid, self.database_id, table_name, comment)
            .await
    }

    // Data modeling

    pub async fn add_mapping_table(&self, table_name: &str, mapping_columns: &[MappingColumn]) -> Result<()> {
        self.raw
            .data_modeling_add_mapping_table(table_name, mapping_columns, self.schema_oid, self.database_id)
            .await
    }

    // Forms

    pub async fn forms_list(&self) -> Result<Vec<FormInfo>> {
        self.raw.forms_list(self.database_id, self.schema_oid).await
    }

    pub async fn forms_add(&self, form_def: &AddFormDef) -> Result<FormInfo> {
        self.raw.forms_add(form_def).await
    }

    pub async fn forms_delete(&self, form_id: i64) -> Result<()> {
        self.raw.forms_delete(form_id).await
    }

    pub async fn forms_regenerate_token(&self, form_id: i64) -> Result<String> {
        self.raw.forms_regenerate_token(form_id).await
    }

    pub async fn forms_patch(&self, update_form_def: &SettableFormDef) -> Result<FormInfo> {
        self.raw.forms_patch(update_form_def).await
    }

    pub async fn forms_set_publish_public(&self, form_id: i64, publish_public: bool) -> Result<bool> {
        self.raw.forms_set_publish_public(form_id, publish_public).await
    }

    pub async fn form_get(&self, form_token: &str) -> Result<FormInfo> {
        self.raw.forms_get(form_token).await
    }

    pub async fn form_submit(&self, form_token: &str, values: &Map<String, Value>) -> Result<()> {
        self.raw.forms_submit(form_token, values).await
    }

    pub async fn forms_list_related_records(
        &self,
        form_token: &str,
        field_key: &str,
        limit: Option<i64>,
        offset: Option<i64>,
        search: Option<&str>,
    ) -> Result<RecordSummaryList> {
        self.raw
            .forms_list_related_records(form_token, field_key, limit, offset, search)
            .await
    }
}
