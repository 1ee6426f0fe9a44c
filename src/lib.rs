//! mathesar-client - Typed JSON-RPC Client for Mathesar
//!
//! A client for the Mathesar JSON-RPC API that lets callers address columns
//! by name instead of attribute number and reads foreign-key values back with
//! their human-readable summaries attached.
//!
//! # Layers
//! - [`raw`] - one method per remote procedure, wire-level identifiers only
//! - [`resolve`] - column name ↔ attnum translation and record enrichment
//! - [`client`] - `Client` → `Database` → `Schema` → `Table` navigation
//!
//! # Module Organization
//! - [`error`] - Error types and handling
//! - [`config`] - Connection settings and stored profiles
//! - [`transport`] - JSON-RPC envelope and the HTTP transport
//! - [`models`] - Request and response shapes of the remote procedures
//! - [`output`] - JSON output envelope types used by the CLI
//!
//! # Example
//! ```no_run
//! use mathesar_client::{Client, RecordQuery, SortDirection};
//!
//! # async fn run() -> mathesar_client::Result<()> {
//! let client = Client::from_env()?;
//! let mut table = client.database(1).schema_by_name("public").await?
//!     .table_by_name("users").await?;
//! let page = table
//!     .records_list(&RecordQuery::new().limit(20).order_by("name", SortDirection::Asc))
//!     .await?;
//! println!("{} users", page.count);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod raw;
pub mod resolve;
pub mod transport;

// Re-export commonly used types for convenience
pub use client::{Client, Database, RecordQuery, Schema, Table};
pub use config::{
    list_profiles, resolve_with_profile, save_profile, ClientConfig, ConfigLocation,
    ConfigOverrides, ProfileRegistry, StoredProfile,
};
pub use error::{ClientError, Result};
pub use models::{ColumnInfo, RecordList, SortDirection};
pub use output::{ErrorEnvelope, ErrorInfo, Metadata, SuccessEnvelope};
pub use raw::RawClient;
pub use resolve::{
    ColumnCache, ColumnMap, ColumnRef, EnrichedRecord, FieldValue, LinkedRecordRef, RecordsPage,
};
pub use transport::{HttpTransport, Transport};
