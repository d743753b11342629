//! ixmeta schema - column extraction and index reconciliation
//!
//! This crate provides:
//! - `TableMetadata` and its connection-backed `TableInfoReader`
//! - `get_table_columns`, which tags columns with their index memberships
//! - `group_by_column` / `group_by_column_with_sequences`, which order each
//!   index's columns by catalog key position when it is known
//! - `ExtractOptions`, loadable from TOML

mod extractor;
mod options;
mod reconcile;

#[cfg(test)]
mod reconcile_tests;

pub use extractor::{
    extract_columns, get_table_columns, get_table_columns_with_options, get_table_comment,
    Column, TableInfoReader, TableMetadata,
};
pub use options::ExtractOptions;
pub use reconcile::{group_by_column, group_by_column_with_sequences, ColumnIndexMap, IndexRef};

pub use ixmeta_catalog::{IndexColumnSequences, SequenceProviderRegistry};
pub use ixmeta_core::{IndexDefinition, IndexInfo};
