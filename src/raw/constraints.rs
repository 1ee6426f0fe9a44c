//! `constraints.*` procedures

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{ConstraintDef, ConstraintInfo};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn constraints_list(&self, table_oid: i64, database_id: i64) -> Result<Vec<ConstraintInfo>> {
        let params = Params::new().set("table_oid", table_oid).set("database_id", database_id);
        self.call("constraints.list", params).await
    }

    /// Add constraints, returning their OIDs
    pub async fn constraints_add(
        &self,
        table_oid: i64,
        constraint_def_list: &[ConstraintDef],
        database_id: i64,
    ) -> Result<Vec<i64>> {
        let params = Params::new()
            .set("table_oid", table_oid)
            .set("constraint_def_list", constraint_def_list)
            .set("database_id", database_id);
        self.call("constraints.add", params).await
    }

    /// Drop a constraint, returning its name
    pub async fn constraints_delete(
        &self,
        table_oid: i64,
        constraint_oid: i64,
        database_id: i64,
    ) -> Result<String> {
        let params = Params::new()
            .set("table_oid", table_oid)
            .set("constraint_oid", constraint_oid)
            .set("database_id", database_id);
        self.call("constraints.delete", params).await
    }
}
