//! Hierarchical Navigation Facade
//!
//! `Client` → [`Database`] → [`Schema`] → [`Table`]. Each level holds the
//! identifiers that scope its calls plus a shared handle on the
//! [`RawClient`]. Only [`Table`] has state of its own: the column snapshot
//! used to translate column names.
//!
//! Name lookups (`schema_by_name`, `table_by_name`) list and scan on every
//! call; they are not cached.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{
    AnalyticsReport, AnalyticsState, ConfiguredDatabaseInfo, ConfiguredDatabasePatch,
    ConfiguredRoleInfo, DatabaseConnectionResult, DisconnectOptions, ExistingDatabase, UserDef,
    UserInfo, UserProfile,
};
use crate::raw::RawClient;
use crate::transport::{HttpTransport, Transport};

mod database;
mod schema;
mod table;

pub use database::Database;
pub use schema::Schema;
pub use table::{RecordQuery, Table};

/// Entry point of the high-level API
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    raw: Arc<RawClient<T>>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self { raw: Arc::clone(&self.raw) }
    }
}

impl Client<HttpTransport> {
    /// Connect over HTTP with resolved settings
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(RawClient::connect(config)?))
    }

    /// Connect over HTTP with settings from `MATHESAR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(RawClient::from_env()?))
    }
}

impl<T: Transport> Client<T> {
    pub fn new(raw: RawClient<T>) -> Self {
        Self { raw: Arc::new(raw) }
    }

    /// Share an existing raw client
    pub const fn from_raw(raw: Arc<RawClient<T>>) -> Self {
        Self { raw }
    }

    /// The raw call layer, for procedures the facade does not wrap
    pub fn raw(&self) -> &RawClient<T> {
        &self.raw
    }

    /// Scope calls to one configured database
    pub fn database(&self, database_id: i64) -> Database<T> {
        Database::new(Arc::clone(&self.raw), database_id)
    }

    // Analytics

    pub async fn analytics_get_state(&self) -> Result<AnalyticsState> {
        self.raw.analytics_get_state().await
    }

    pub async fn analytics_initialize(&self) -> Result<()> {
        self.raw.analytics_initialize().await
    }

    pub async fn analytics_disable(&self) -> Result<()> {
        self.raw.analytics_disable().await
    }

    pub async fn analytics_view_report(&self) -> Result<AnalyticsReport> {
        self.raw.analytics_view_report().await
    }

    pub async fn analytics_upload_feedback(&self, message: &str) -> Result<()> {
        self.raw.analytics_upload_feedback(message).await
    }

    // Setup

    pub async fn setup_create_new(
        &self,
        database: &str,
        sample_data: Option<&[String]>,
        nickname: Option<&str>,
    ) -> Result<DatabaseConnectionResult> {
        self.raw.databases_setup_create_new(database, sample_data, nickname).await
    }

    pub async fn setup_connect_existing(&self, existing: &ExistingDatabase) -> Result<DatabaseConnectionResult> {
        self.raw.databases_setup_connect_existing(existing).await
    }

    // Configured databases

    pub async fn configured_databases_list(&self, server_id: Option<i64>) -> Result<Vec<ConfiguredDatabaseInfo>> {
        self.raw.databases_configured_list(server_id).await
    }

    pub async fn configured_databases_patch(
        &self,
        database_id: i64,
        patch: &ConfiguredDatabasePatch,
    ) -> Result<ConfiguredDatabaseInfo> {
        self.raw.databases_configured_patch(database_id, patch).await
    }

    pub async fn configured_databases_disconnect(
        &self,
        database_id: i64,
        options: &DisconnectOptions,
    ) -> Result<()> {
        self.raw.databases_configured_disconnect(database_id, options).await
    }

    // Configured roles

    pub async fn configured_roles_list(&self, server_id: i64) -> Result<Vec<ConfiguredRoleInfo>> {
        self.raw.roles_configured_list(server_id).await
    }

    pub async fn configured_roles_add(
        &self,
        server_id: i64,
        name: &str,
        password: &str,
    ) -> Result<ConfiguredRoleInfo> {
        self.raw.roles_configured_add(server_id, name, password).await
    }

    pub async fn configured_roles_delete(&self, configured_role_id: i64) -> Result<()> {
        self.raw.roles_configured_delete(configured_role_id).await
    }

    pub async fn configured_roles_set_password(&self, configured_role_id: i64, password: &str) -> Result<()> {
        self.raw.roles_configured_set_password(configured_role_id, password).await
    }

    // Users

    pub async fn users_list(&self) -> Result<Vec<UserInfo>> {
        self.raw.users_list().await
    }

    pub async fn users_get(&self, user_id: i64) -> Result<UserInfo> {
        self.raw.users_get(user_id).await
    }

    pub async fn users_add(&self, user_def: &UserDef) -> Result<UserInfo> {
        self.raw.users_add(user_def).await
    }

    pub async fn users_delete(&self, user_id: i64) -> Result<()> {
        self.raw.users_delete(user_id).await
    }

    pub async fn users_patch_self(&self, profile: &UserProfile) -> Result<UserInfo> {
        self.raw.users_patch_self(profile).await
    }

    pub async fn users_patch_other(
        &self,
        user_id: i64,
        is_superuser: bool,
        profile: &UserProfile,
    ) -> Result<UserInfo> {
        self.raw.users_patch_other(user_id, is_superuser, profile).await
    }

    pub async fn users_replace_own_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        self.raw.users_password_replace_own(old_password, new_password).await
    }

    pub async fn users_revoke_password(&self, user_id: i64, new_password: &str) -> Result<()> {
        self.raw.users_password_revoke(user_id, new_password).await
    }
}
