//! Data-Transfer Models
//!
//! Typed request and response payloads for every remote procedure.
//!
//! # Conventions
//! - Optional request fields are omitted from the wire when unset
//! - Response structs reject shapes they do not recognize (closed enums for
//!   privilege lists), so protocol drift surfaces as a validation error
//! - Values the server treats as opaque are kept as `serde_json::Value`

pub mod columns;
pub mod constraints;
pub mod databases;
pub mod explorations;
pub mod forms;
pub mod misc;
pub mod records;
pub mod roles;
pub mod schemas;
pub mod tables;
pub mod users;

pub use columns::*;
pub use constraints::*;
pub use databases::*;
pub use explorations::*;
pub use forms::*;
pub use misc::*;
pub use records::*;
pub use roles::*;
pub use schemas::*;
pub use tables::*;
pub use users::*;
