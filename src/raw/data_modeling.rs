//! `data_modeling.*` procedures

use std::collections::HashMap;

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{MappingColumn, SplitTableInfo};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    /// Add a column to `referrer_table_oid` that references `referent_table_oid`
    pub async fn data_modeling_add_foreign_key_column(
        &self,
        column_name: &str,
        referrer_table_oid: i64,
        referent_table_oid: i64,
        database_id: i64,
    ) -> Result<()> {
        let params = Params::new()
            .set("column_name", column_name)
            .set("referrer_table_oid", referrer_table_oid)
            .set("referent_table_oid", referent_table_oid)
            .set("database_id", database_id);
        self.call_unit("data_modeling.add_foreign_key_column", params).await
    }

    /// Create a many-to-many mapping table
    pub async fn data_modeling_add_mapping_table(
        &self,
        table_name: &str,
        mapping_columns: &[MappingColumn],
        schema_oid: i64,
        database_id: i64,
    ) -> Result<()> {
        let params = Params::new()
            .set("table_name", table_name)
            .set("mapping_columns", mapping_columns)
            .set("schema_oid", schema_oid)
            .set("database_id", database_id);
        self.call_unit("data_modeling.add_mapping_table", params).await
    }

    /// Suggested type per column attnum (as string)
    pub async fn data_modeling_suggest_types(
        &self,
        table_oid: i64,
        database_id: i64,
    ) -> Result<HashMap<String, String>> {
        let params = Params::new().set("table_oid", table_oid).set("database_id", database_id);
        self.call("data_modeling.suggest_types", params).await
    }

    /// Move columns into a new table linked back by a foreign key
    pub async fn data_modeling_split_table(
        &self,
        table_oid: i64,
        column_attnums: &[i64],
        extracted_table_name: &str,
        database_id: i64,
        relationship_fk_column_name: Option<&str>,
    ) -> Result<SplitTableInfo> {
        let params = Params::new()
            .set("table_oid", table_oid)
            .set("column_attnums", column_attnums)
            .set("extracted_table_name", extracted_table_name)
            .set("database_id", database_id)
            .opt("relationship_fk_column_name", relationship_fk_column_name);
        self.call("data_modeling.split_table", params).await
    }

    pub async fn data_modeling_move_columns(
        &self,
        source_table_oid: i64,
        target_table_oid: i64,
        move_column_attnums: &[i64],
        database_id: i64,
    ) -> Result<()> {
        let params = Params::new()
            .set("source_table_oid", source_table_oid)
            .set("target_table_oid", target_table_oid)
            .set("move_column_attnums", move_column_attnums)
            .set("database_id", database_id);
        self.call_unit("data_modeling.move_columns", params).await
    }
}
