//! ixmeta core - shared abstractions for catalog metadata extraction
//!
//! This crate defines the seams the other ixmeta crates are written against:
//!
//! - `Connection` / `RowCursor` - an explicit connection handle and its cursors
//! - `SchemaIntrospection` - generic per-table column and index listing
//! - `IndexDefinition` - the narrow view of an index used for reconciliation
//! - `EngineFamily` - engine identification
//! - Common types like `Value`, `Row` and the `IxmetaError` taxonomy

mod connection;
mod dialects;
mod error;
mod schema;
mod types;

pub use connection::*;
pub use dialects::*;
pub use error::*;
pub use schema::*;
pub use types::*;
