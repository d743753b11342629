//! Schema introspection traits and types

use crate::{IxmetaError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Generic introspection capability a driver exposes for one table at a time.
///
/// Column order is whatever the engine reports; index column lists carry no
/// ordering guarantee (some engines hand them back as sets).
#[async_trait]
pub trait SchemaIntrospection: Send + Sync {
    /// Get columns for a table
    async fn get_columns(&self, schema: Option<&str>, table: &str) -> Result<Vec<ColumnInfo>>;

    /// Get indexes for a table
    async fn get_indexes(&self, schema: Option<&str>, table: &str) -> Result<Vec<IndexInfo>>;

    /// Get basic table information.
    /// Drivers that can't describe tables keep this default.
    async fn get_table_info(&self, _schema: Option<&str>, table: &str) -> Result<TableInfo> {
        Err(IxmetaError::NotSupported(format!(
            "table information for {}",
            table
        )))
    }
}

/// Table information (basic)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableInfo {
    pub schema: Option<String>,
    pub name: String,
    pub comment: Option<String>,
}

/// Column information
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    /// 1-based position within the table
    pub ordinal: usize,
    pub data_type: String,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub comment: Option<String>,
}

/// Index information as reported by the driver
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IndexInfo {
    pub name: String,
    pub columns: Vec<String>,
    pub is_unique: bool,
    pub is_primary: bool,
    pub index_type: String,
    pub comment: Option<String>,
}

impl IndexInfo {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self.is_unique = true;
        self
    }
}

/// The three things index reconciliation needs to know about an index.
///
/// Kept narrow so the reconciler works over any catalog representation.
pub trait IndexDefinition {
    fn name(&self) -> &str;

    /// Column names as the index reports them; not necessarily key order
    fn columns(&self) -> &[String];

    fn is_unique(&self) -> bool;
}

impl IndexDefinition for IndexInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn is_unique(&self) -> bool {
        self.is_unique
    }
}
