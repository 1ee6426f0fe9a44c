//! `records.*` procedures

use serde_json::{Map, Value};

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{RecordAdded, RecordList, RecordListOptions, RecordSummaryList, SearchParam};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    /// List records of a table
    pub async fn records_list(
        &self,
        database_id: i64,
        table_oid: i64,
        options: &RecordListOptions,
    ) -> Result<RecordList> {
        let params = Params::new()
            .set("database_id", database_id)
            .set("table_oid", table_oid)
            .merge(options);
        self.call("records.list", params).await
    }

    /// Fetch one record by primary key; the result holds zero or one rows
    pub async fn records_get(
        &self,
        database_id: i64,
        table_oid: i64,
        record_id: &Value,
        return_record_summaries: bool,
        table_record_summary_templates: Option<&Map<String, Value>>,
    ) -> Result<RecordList> {
        let params = Params::new()
            .set("database_id", database_id)
            .set("table_oid", table_oid)
            .set("record_id", record_id)
            .set("return_record_summaries", return_record_summaries)
            .opt("table_record_summary_templates", table_record_summary_templates);
        self.call("records.get", params).await
    }

    /// Insert a record given as attnum-keyed values
    pub async fn records_add(
        &self,
        database_id: i64,
        table_oid: i64,
        record_def: &Map<String, Value>,
        return_record_summaries: bool,
    ) -> Result<RecordAdded> {
        let params = Params::new()
            .set("database_id", database_id)
            .set("table_oid", table_oid)
            .set("record_def", record_def)
            .set("return_record_summaries", return_record_summaries);
        self.call("records.add", params).await
    }

    /// Update a record with attnum-keyed values
    pub async fn records_patch(
        &self,
        database_id: i64,
        table_oid: i64,
        record_id: &Value,
        record_def: &Map<String, Value>,
        return_record_summaries: bool,
    ) -> Result<RecordAdded> {
        let params = Params::new()
            .set("database_id", database_id)
            .set("table_oid", table_oid)
            .set("record_id", record_id)
            .set("record_def", record_def)
            .set("return_record_summaries", return_record_summaries);
        self.call("records.patch", params).await
    }

    /// Delete records by primary key, returning the ids the server reports
    pub async fn records_delete(
        &self,
        database_id: i64,
        table_oid: i64,
        record_ids: &[Value],
    ) -> Result<Vec<Value>> {
        let params = Params::new()
            .set("database_id", database_id)
            .set("table_oid", table_oid)
            .set("record_ids", record_ids);
        // Some servers answer with null when nothing was deleted
        let deleted: Option<Vec<Value>> = self.call("records.delete", params).await?;
        Ok(deleted.unwrap_or_default())
    }

    pub async fn records_search(
        &self,
        database_id: i64,
        table_oid: i64,
        search_params: Option<&[SearchParam]>,
        limit: i64,
        offset: i64,
        return_record_summaries: bool,
    ) -> Result<RecordList> {
        let params = Params::new()
            .set("database_id", database_id)
            .set("table_oid", table_oid)
            .set("limit", limit)
            .set("offset", offset)
            .set("return_record_summaries", return_record_summaries)
            .opt("search_params", search_params);
        self.call("records.search", params).await
    }

    /// Summaries of records, for pickers
    pub async fn records_list_summaries(
        &self,
        database_id: i64,
        table_oid: i64,
        limit: Option<i64>,
        offset: Option<i64>,
        search: Option<&str>,
    ) -> Result<RecordSummaryList> {
        let params = Params::new()
            .set("database_id", database_id)
            .set("table_oid", table_oid)
            .opt("limit", limit)
            .opt("offset", offset)
            .opt("search", search);
        self.call("records.list_summaries", params).await
    }
}
