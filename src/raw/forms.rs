//! `forms.*` procedures

use serde_json::{Map, Value};

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{AddFormDef, FormInfo, RecordSummaryList, SettableFormDef};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn forms_list(&self, database_id: i64, schema_oid: i64) -> Result<Vec<FormInfo>> {
        let params = Params::new().set("database_id", database_id).set("schema_oid", schema_oid);
        self.call("forms.list", params).await
    }

    /// Fetch a form by its public token
    pub async fn forms_get(&self, form_token: &str) -> Result<FormInfo> {
        let params = Params::new().set("form_token", form_token);
        self.call("forms.get", params).await
    }

    pub async fn forms_add(&self, form_def: &AddFormDef) -> Result<FormInfo> {
        let params = Params::new().set("form_def", form_def);
        self.call("forms.add", params).await
    }

    pub async fn forms_delete(&self, form_id: i64) -> Result<()> {
        let params = Params::new().set("form_id", form_id);
        self.call_unit("forms.delete", params).await
    }

    pub async fn forms_patch(&self, update_form_def: &SettableFormDef) -> Result<FormInfo> {
        let params = Params::new().set("update_form_def", update_form_def);
        self.call("forms.patch", params).await
    }

    /// Issue a new public token, invalidating the old one
    pub async fn forms_regenerate_token(&self, form_id: i64) -> Result<String> {
        let params = Params::new().set("form_id", form_id);
        self.call("forms.regenerate_token", params).await
    }

    pub async fn forms_set_publish_public(&self, form_id: i64, publish_public: bool) -> Result<bool> {
        let params = Params::new().set("form_id", form_id).set("publish_public", publish_public);
        self.call("forms.set_publish_public", params).await
    }

    /// Submit values keyed by field key
    pub async fn forms_submit(&self, form_token: &str, values: &Map<String, Value>) -> Result<()> {
        let params = Params::new().set("form_token", form_token).set("values", values);
        self.call_unit("forms.submit", params).await
    }

    /// Records a foreign key field of a form may link to
    pub async fn forms_list_related_records(
        &self,
        form_token: &str,
        field_key: &str,
        limit: Option<i64>,
        offset: Option<i64>,
        search: Option<&str>,
    ) -> Result<RecordSummaryList> {
        let params = Params::new()
            .set("form_token", form_token)
            .set("field_key", field_key)
            .opt("limit", limit)
            .opt("offset", offset)
            .opt("search", search);
        self.call("forms.list_related_records", params).await
    }
}
