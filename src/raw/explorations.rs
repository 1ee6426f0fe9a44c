//! `explorations.*` procedures

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{ExplorationDef, ExplorationInfo, ExplorationResult};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn explorations_list(
        &self,
        database_id: i64,
        schema_oid: Option<i64>,
    ) -> Result<Vec<ExplorationInfo>> {
        let params = Params::new().set("database_id", database_id).opt("schema_oid", schema_oid);
        self.call("explorations.list", params).await
    }

    pub async fn explorations_get(&self, exploration_id: i64) -> Result<ExplorationInfo> {
        let params = Params::new().set("exploration_id", exploration_id);
        self.call("explorations.get", params).await
    }

    pub async fn explorations_add(&self, exploration_def: &ExplorationDef) -> Result<ExplorationInfo> {
        let params = Params::new().set("exploration_def", exploration_def);
        self.call("explorations.add", params).await
    }

    pub async fn explorations_delete(&self, exploration_id: i64) -> Result<()> {
        let params = Params::new().set("exploration_id", exploration_id);
        self.call_unit("explorations.delete", params).await
    }

    /// Overwrite a saved exploration (matched by `id`)
    pub async fn explorations_replace(&self, new_exploration: &ExplorationInfo) -> Result<ExplorationInfo> {
        let params = Params::new().set("new_exploration", new_exploration);
        self.call("explorations.replace", params).await
    }

    /// Run an unsaved exploration definition
    pub async fn explorations_run(
        &self,
        exploration_def: &ExplorationDef,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<ExplorationResult> {
        let params = Params::new()
            .set("exploration_def", exploration_def)
            .opt("limit", limit)
            .opt("offset", offset);
        self.call("explorations.run", params).await
    }

    pub async fn explorations_run_saved(
        &self,
        exploration_id: i64,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<ExplorationResult> {
        let params = Params::new()
            .set("exploration_id", exploration_id)
            .opt("limit", limit)
            .opt("offset", offset);
        self.call("explorations.run_saved", params).await
    }
}
