//! `collaborators.*` procedures

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::CollaboratorInfo;
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn collaborators_list(&self, database_id: i64) -> Result<Vec<CollaboratorInfo>> {
        let params = Params::new().set("database_id", database_id);
        self.call("collaborators.list", params).await
    }

    pub async fn collaborators_add(
        &self,
        database_id: i64,
        user_id: i64,
        configured_role_id: i64,
    ) -> Result<CollaboratorInfo> {
        let params = Params::new()
            .set("database_id", database_id)
            .set("user_id", user_id)
            .set("configured_role_id", configured_role_id);
        self.call("collaborators.add", params).await
    }

    pub async fn collaborators_delete(&self, collaborator_id: i64) -> Result<()> {
        let params = Params::new().set("collaborator_id", collaborator_id);
        self.call_unit("collaborators.delete", params).await
    }

    pub async fn collaborators_set_role(
        &self,
        collaborator_id: i64,
        configured_role_id: i64,
    ) -> Result<CollaboratorInfo> {
        let params = Params::new()
            .set("collaborator_id", collaborator_id)
            .set("configured_role_id", configured_role_id);
        self.call("collaborators.set_role", params).await
    }
}
