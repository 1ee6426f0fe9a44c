//! Table-scoped operations with column name resolution
//!
//! A `Table` owns a [`ColumnCache`]. Methods that may need to populate it
//! take `&mut self`. Every name is resolved before the first network call
//! of the operation, so an unknown name never leaves a half-sent request.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::{
    ColumnChanges, ColumnInfo, ColumnMetaDataBlob, ColumnMetaDataRecord, ConstraintDef,
    ConstraintInfo, CreatableColumnInfo, Filter, ForeignKeyOptions, Grouping, JoinableTableInfo,
    OrderBy, PkeyType, RecordListOptions, RecordSummaryList, SearchParam, SettableColumnInfo,
    SettableTableInfo, SortDirection, SplitTableInfo, TableInfo, TableMetaDataBlob,
    TableMetaDataRecord, TablePrivileges,
};
use crate::raw::RawClient;
use crate::resolve::{ColumnCache, ColumnMap, ColumnRef, EnrichedRecord, RecordsPage};
use crate::transport::{HttpTransport, Transport};

/// Query for [`Table::records_list`], with columns given by name or attnum
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub order_by: Vec<(ColumnRef, SortDirection)>,
    pub group_by: Vec<ColumnRef>,
    pub group_preproc: Option<Vec<String>>,
    /// Filter tree; its column leaves are attnums
    pub filter: Option<Filter>,
    pub return_record_summaries: bool,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self {
            limit: None,
            offset: None,
            order_by: Vec::new(),
            group_by: Vec::new(),
            group_preproc: None,
            filter: None,
            return_record_summaries: true,
        }
    }
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Append a sort key
    #[must_use]
    pub fn order_by(mut self, column: impl Into<ColumnRef>, direction: SortDirection) -> Self {
        self.order_by.push((column.into(), direction));
        self
    }

    /// Append a grouping column
    #[must_use]
    pub fn group_by(mut self, column: impl Into<ColumnRef>) -> Self {
        self.group_by.push(column.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Do not ask the server for linked record summaries
    #[must_use]
    pub const fn without_summaries(mut self) -> Self {
        self.return_record_summaries = false;
        self
    }

    /// Translate into wire options using a column snapshot
    fn resolve(&self, columns: &ColumnMap) -> Result<RecordListOptions> {
        let order = if self.order_by.is_empty() {
            None
        } else {
            let order = self
                .order_by
                .iter()
                .map(|(column, direction)| {
                    columns.resolve(column).map(|attnum| OrderBy { attnum, direction: *direction })
                })
                .collect::<Result<Vec<_>>>()?;
            Some(order)
        };

        let grouping = if self.group_by.is_empty() {
            None
        } else {
            Some(Grouping {
                columns: columns.resolve_all(&self.group_by)?,
                preproc: self.group_preproc.clone(),
            })
        };

        Ok(RecordListOptions {
            limit: self.limit,
            offset: self.offset,
            order,
            filter: self.filter.clone(),
            grouping,
            return_record_summaries: self.return_record_summaries,
        })
    }
}

/// One table, with a lazily loaded column snapshot
#[derive(Debug)]
pub struct Table<T = HttpTransport> {
    raw: Arc<RawClient<T>>,
    database_id: i64,
    table_oid: i64,
    cache: ColumnCache,
}

impl<T> Clone for Table<T> {
    /// The clone starts from the same snapshot but refreshes independently
    fn clone(&self) -> Self {
        Self {
            raw: Arc::clone(&self.raw),
            database_id: self.database_id,
            table_oid: self.table_oid,
            cache: self.cache.clone(),
        }
    }
}

impl<T: Transport> Table<T> {
    pub(crate) fn new(raw: Arc<RawClient<T>>, database_id: i64, table_oid: i64) -> Self {
        Self { raw, database_id, table_oid, cache: ColumnCache::new() }
    }

    pub const fn oid(&self) -> i64 {
        self.table_oid
    }

    pub const fn database_id(&self) -> i64 {
        self.database_id
    }

    // Columns and name resolution

    /// Column snapshot, fetched on first use and when `use_cache` is false
    pub async fn column_map(&mut self, use_cache: bool) -> Result<Arc<ColumnMap>> {
        let raw = &self.raw;
        let (table_oid, database_id) = (self.table_oid, self.database_id);
        self.cache.load(use_cache, || raw.columns_list(table_oid, database_id)).await
    }

    /// Columns of this table
    ///
    /// With `use_cache` the cached list is returned without a network call
    /// once loaded. Otherwise the list is fetched and replaces the cache.
    pub async fn columns(&mut self, use_cache: bool) -> Result<Vec<ColumnInfo>> {
        Ok(self.column_map(use_cache).await?.columns().to_vec())
    }

    /// Fetch columns again, e.g. after a rename
    pub async fn refresh_columns(&mut self) -> Result<Arc<ColumnMap>> {
        self.column_map(false).await
    }

    pub async fn name_to_attnum(&mut self, name: &str) -> Result<i64> {
        self.column_map(true).await?.name_to_attnum(name)
    }

    /// Name of an attnum, or its decimal string if not a known column
    pub async fn attnum_to_name(&mut self, attnum: i64) -> Result<String> {
        Ok(self.column_map(true).await?.attnum_to_name(attnum).into_owned())
    }

    pub async fn resolve_columns(&mut self, columns: &[ColumnRef]) -> Result<Vec<i64>> {
        if columns.iter().all(|c| matches!(c, ColumnRef::Attnum(_))) {
            return Ok(columns.iter().filter_map(attnum_of).collect());
        }
        self.column_map(true).await?.resolve_all(columns)
    }

    // Records

    /// List records keyed by column name, with linked records summarized
    pub async fn records_list(&mut self, query: &RecordQuery) -> Result<RecordsPage> {
        let columns = self.column_map(true).await?;
        let options = query.resolve(&columns)?;
        let list = self.raw.records_list(self.database_id, self.table_oid, &options).await?;
        Ok(columns.enrich(list))
    }

    /// Full-text search; each condition pairs a column with a literal
    pub async fn records_search(
        &mut self,
        search: &[(ColumnRef, Value)],
        limit: i64,
        offset: i64,
        return_record_summaries: bool,
    ) -> Result<RecordsPage> {
        let columns = self.column_map(true).await?;
        let search_params = search
            .iter()
            .map(|(column, literal)| {
                columns.resolve(column).map(|attnum| SearchParam { attnum, literal: literal.clone() })
            })
            .collect::<Result<Vec<_>>>()?;
        let list = self
            .raw
            .records_search(
                self.database_id,
                self.table_oid,
                Some(&search_params),
                limit,
                offset,
                return_record_summaries,
            )
            .await?;
        Ok(columns.enrich(list))
    }

    /// One record by primary key
    ///
    /// # Errors
    /// `NotFound` if the server returns no row.
    pub async fn record_get(
        &mut self,
        record_id: &Value,
        return_record_summaries: bool,
    ) -> Result<EnrichedRecord> {
        let list = self
            .raw
            .records_get(self.database_id, self.table_oid, record_id, return_record_summaries, None)
            .await?;
        let page = self.column_map(true).await?.enrich(list);
        page.results
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::not_found("Record", record_id.to_string()))
    }

    /// Insert a record given by column name
    pub async fn record_add(
        &mut self,
        record: &Map<String, Value>,
        return_record_summaries: bool,
    ) -> Result<EnrichedRecord> {
        let columns = self.column_map(true).await?;
        let record_def = columns.encode_record(record)?;
        let added = self
            .raw
            .records_add(self.database_id, self.table_oid, &record_def, return_record_summaries)
            .await?;
        first_record("records.add", columns.enrich(added.into()))
    }

    /// Update a record with values given by column name
    pub async fn record_patch(
        &mut self,
        record_id: &Value,
        record: &Map<String, Value>,
        return_record_summaries: bool,
    ) -> Result<EnrichedRecord> {
        let columns = self.column_map(true).await?;
        let record_def = columns.encode_record(record)?;
        let patched = self
            .raw
            .records_patch(
                self.database_id,
                self.table_oid,
                record_id,
                &record_def,
                return_record_summaries,
            )
            .await?;
        first_record("records.patch", columns.enrich(patched.into()))
    }

    pub async fn records_delete(&self, record_ids: &[Value]) -> Result<Vec<Value>> {
        self.raw.records_delete(self.database_id, self.table_oid, record_ids).await
    }

    /// Record summaries, as shown in record pickers
    pub async fn record_summaries(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
        search: Option<&str>,
    ) -> Result<RecordSummaryList> {
        self.raw
            .records_list_summaries(self.database_id, self.table_oid, limit, offset, search)
            .await
    }

    // Column management

    /// Add columns; the column cache is left as is
    pub async fn columns_add(&self, columns: &[CreatableColumnInfo]) -> Result<Vec<i64>> {
        self.raw.columns_add(columns, self.table_oid, self.database_id).await
    }

    /// Alter columns, each addressed by name or attnum
    pub async fn columns_patch(&mut self, patches: &[(ColumnRef, ColumnChanges)]) -> Result<i64> {
        let columns = self.column_map(true).await?;
        let column_data_list = patches
            .iter()
            .map(|(column, changes)| {
                columns.resolve(column).map(|id| SettableColumnInfo { id, changes: changes.clone() })
            })
            .collect::<Result<Vec<_>>>()?;
        self.raw.columns_patch(&column_data_list, self.table_oid, self.database_id).await
    }

    pub async fn columns_delete(&mut self, columns: &[ColumnRef]) -> Result<i64> {
        let attnums = self.resolve_columns(columns).await?;
        self.raw.columns_delete(&attnums, self.table_oid, self.database_id).await
    }

    pub async fn add_primary_key_column(
        &self,
        pkey_type: PkeyType,
        drop_existing_pkey_column: bool,
        name: &str,
    ) -> Result<()> {
        self.raw
            .columns_add_primary_key_column(
                pkey_type,
                self.table_oid,
                self.database_id,
                drop_existing_pkey_column,
                name,
            )
            .await
    }

    pub async fn reset_file_mash(&mut self, column: &ColumnRef) -> Result<()> {
        let attnum = self.resolve_columns(std::slice::from_ref(column)).await?[0];
        self.raw.columns_reset_mash(attnum, self.table_oid, self.database_id).await
    }

    pub async fn list_columns_with_metadata(&self) -> Result<Vec<ColumnInfo>> {
        self.raw.columns_list_with_metadata(self.table_oid, self.database_id).await
    }

    pub async fn column_metadata_list(&self) -> Result<Vec<ColumnMetaDataRecord>> {
        self.raw.columns_metadata_list(self.table_oid, self.database_id).await
    }

    pub async fn column_metadata_set(&self, metadata: &[ColumnMetaDataBlob]) -> Result<()> {
        self.raw.columns_metadata_set(metadata, self.table_oid, self.database_id).await
    }

    // Constraints

    pub async fn constraints_list(&self) -> Result<Vec<ConstraintInfo>> {
        self.raw.constraints_list(self.table_oid, self.database_id).await
    }

    pub async fn add_primary_key_constraint(
        &mut self,
        columns: &[ColumnRef],
        name: Option<&str>,
        deferrable: Option<bool>,
    ) -> Result<Vec<i64>> {
        let columns = self.resolve_columns(columns).await?;
        let constraint = ConstraintDef::PrimaryKey {
            columns,
            name: name.map(str::to_string),
            deferrable,
        };
        self.add_constraint(constraint).await
    }

    pub async fn add_unique_constraint(
        &mut self,
        columns: &[ColumnRef],
        name: Option<&str>,
        deferrable: Option<bool>,
    ) -> Result<Vec<i64>> {
        let columns = self.resolve_columns(columns).await?;
        let constraint = ConstraintDef::Unique { columns, name: name.map(str::to_string), deferrable };
        self.add_constraint(constraint).await
    }

    /// Add a foreign key to `fkey_relation_id`
    ///
    /// `fkey_columns` are attnums of the referenced table; this table's
    /// snapshot cannot resolve names there.
    pub async fn add_foreign_key_constraint(
        &mut self,
        columns: &[ColumnRef],
        fkey_relation_id: i64,
        fkey_columns: &[i64],
        options: &ForeignKeyOptions,
    ) -> Result<Vec<i64>> {
        let columns = self.resolve_columns(columns).await?;
        let constraint = ConstraintDef::ForeignKey {
            columns,
            fkey_relation_id,
            fkey_columns: fkey_columns.to_vec(),
            name: options.name.clone(),
            deferrable: options.deferrable,
            fkey_update_action: options.update_action.clone(),
            fkey_delete_action: options.delete_action.clone(),
            fkey_match_type: options.match_type.clone(),
        };
        self.add_constraint(constraint).await
    }

    async fn add_constraint(&self, constraint: ConstraintDef) -> Result<Vec<i64>> {
        self.raw
            .constraints_add(self.table_oid, std::slice::from_ref(&constraint), self.database_id)
            .await
    }

    pub async fn constraints_delete(&self, constraint_oid: i64) -> Result<String> {
        self.raw.constraints_delete(self.table_oid, constraint_oid, self.database_id).await
    }

    // Data modeling

    /// Add a column to this table referencing `referent_table_oid`
    pub async fn add_foreign_key_column(&self, column_name: &str, referent_table_oid: i64) -> Result<()> {
        self.raw
            .data_modeling_add_foreign_key_column(
                column_name,
                self.table_oid,
                referent_table_oid,
                self.database_id,
            )
            .await
    }

    /// Suggested type per column attnum
    pub async fn suggest_types(&self) -> Result<HashMap<String, String>> {
        self.raw.data_modeling_suggest_types(self.table_oid, self.database_id).await
    }

    pub async fn split_table(
        &mut self,
        columns: &[ColumnRef],
        extracted_table_name: &str,
        relationship_fk_column_name: Option<&str>,
    ) -> Result<SplitTableInfo> {
        let attnums = self.resolve_columns(columns).await?;
        self.raw
            .data_modeling_split_table(
                self.table_oid,
                &attnums,
                extracted_table_name,
                self.database_id,
                relationship_fk_column_name,
            )
            .await
    }

    pub async fn move_columns(&mut self, target_table_oid: i64, columns: &[ColumnRef]) -> Result<()> {
        let attnums = self.resolve_columns(columns).await?;
        debug!(from = self.table_oid, to = target_table_oid, count = attnums.len(), "moving columns");
        self.raw
            .data_modeling_move_columns(self.table_oid, target_table_oid, &attnums, self.database_id)
            .await
    }

    // Table management

    pub async fn get(&self) -> Result<TableInfo> {
        self.raw.tables_get(self.table_oid, self.database_id).await
    }

    /// Table info with stored metadata attached
    pub async fn info(&self) -> Result<Map<String, Value>> {
        self.raw.tables_get_with_metadata(self.table_oid, self.database_id).await
    }

    pub async fn get_import_preview(
        &self,
        columns: &[SettableColumnInfo],
        limit: i64,
    ) -> Result<Vec<Map<String, Value>>> {
        self.raw
            .tables_get_import_preview(self.table_oid, columns, self.database_id, limit)
            .await
    }

    pub async fn list_joinable(&self, max_depth: i64) -> Result<JoinableTableInfo> {
        self.raw.tables_list_joinable(self.table_oid, self.database_id, max_depth).await
    }

    pub async fn patch(&self, table_data: &SettableTableInfo) -> Result<String> {
        self.raw.tables_patch(self.table_oid, table_data, self.database_id).await
    }

    pub async fn delete(&self, cascade: bool) -> Result<String> {
        self.raw.tables_delete(self.table_oid, self.database_id, cascade).await
    }

    /// Metadata of every table in the database
    pub async fn list_metadata(&self) -> Result<Vec<TableMetaDataRecord>> {
        self.raw.tables_metadata_list(self.database_id).await
    }

    pub async fn set_metadata(&self, metadata: &TableMetaDataBlob) -> Result<()> {
        self.raw.tables_metadata_set(self.table_oid, metadata, self.database_id).await
    }

    pub async fn list_privileges(&self) -> Result<Vec<TablePrivileges>> {
        self.raw.tables_privileges_list_direct(self.table_oid, self.database_id).await
    }

    pub async fn replace_privileges_for_roles(
        &self,
        privileges: &[TablePrivileges],
    ) -> Result<Vec<TablePrivileges>> {
        self.raw
            .tables_privileges_replace_for_roles(privileges, self.table_oid, self.database_id)
            .await
    }

    pub async fn transfer_ownership(&self, new_owner_oid: i64) -> Result<TableInfo> {
        self.raw
            .tables_privileges_transfer_ownership(self.table_oid, new_owner_oid, self.database_id)
            .await
    }
}

const fn attnum_of(column: &ColumnRef) -> Option<i64> {
    match column {
        ColumnRef::Attnum(attnum) => Some(*attnum),
        ColumnRef::Name(_) => None,
    }
}

fn first_record(method: &str, page: RecordsPage) -> Result<EnrichedRecord> {
    page.results
        .into_iter()
        .next()
        .ok_or_else(|| ClientError::validation(format!("{method} returned no record")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> ColumnMap {
        let columns = [(1, "id"), (3, "title"), (4, "published")]
            .into_iter()
            .map(|(id, name)| {
                serde_json::from_value(json!({
                    "id": id,
                    "name": name,
                    "type": "text",
                    "nullable": true,
                    "primary_key": false,
                    "has_dependents": false,
                    "current_role_priv": []
                }))
                .unwrap()
            })
            .collect();
        ColumnMap::new(columns)
    }

    #[test]
    fn test_query_resolves_names() {
        let query = RecordQuery::new()
            .limit(10)
            .order_by("published", SortDirection::Desc)
            .order_by(1, SortDirection::Asc)
            .group_by("title");
        let options = query.resolve(&snapshot()).unwrap();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "limit": 10,
                "order": [
                    {"attnum": 4, "direction": "desc"},
                    {"attnum": 1, "direction": "asc"}
                ],
                "grouping": {"columns": [3]},
                "return_record_summaries": true
            })
        );
    }

    #[test]
    fn test_query_unknown_order_column() {
        let query = RecordQuery::new().order_by("missing", SortDirection::Asc);
        let err = query.resolve(&snapshot()).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_COLUMN");
    }

    #[test]
    fn test_query_attnums_pass_through() {
        let query = RecordQuery::new().order_by(4, SortDirection::Asc).without_summaries();
        let options = query.resolve(&ColumnMap::default()).unwrap();
        assert_eq!(options.order.unwrap()[0].attnum, 4);
        assert!(!options.return_record_summaries);
    }

    #[test]
    fn test_first_record_empty_page() {
        let err = first_record("records.add", RecordsPage { count: 1, results: vec![] }).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAULT");
    }
}
