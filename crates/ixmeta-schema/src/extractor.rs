//! Column and index extraction for one table

use std::sync::Arc;

use async_trait::async_trait;
use ixmeta_catalog::{lookup_with_engine, IndexColumnSequences, SequenceProviderRegistry};
use ixmeta_core::{
    ColumnInfo, Connection, EngineFamily, IndexInfo, IxmetaError, Result, SchemaIntrospection,
};

use crate::options::ExtractOptions;
use crate::reconcile::{group_by_column_with_sequences, IndexRef};

/// A table column ready for the code generator
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Type as declared in the catalog
    pub data_type: String,
    /// Whether the consumer should prefer the driver's scanned type over `data_type`
    pub use_scan_type: bool,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub comment: Option<String>,
    pub table_name: String,
    /// Index memberships; empty unless index tagging was requested
    pub indexes: Vec<IndexRef>,
}

impl Column {
    pub fn from_info(info: ColumnInfo, table_name: &str, use_scan_type: bool) -> Self {
        Self {
            name: info.name,
            data_type: info.data_type,
            use_scan_type,
            nullable: info.nullable,
            default_value: info.default_value,
            is_primary_key: info.is_primary_key,
            is_auto_increment: info.is_auto_increment,
            comment: info.comment,
            table_name: table_name.to_string(),
            indexes: Vec::new(),
        }
    }

    /// Names of the indexes this column belongs to, in attachment order
    pub fn index_names(&self) -> Vec<&str> {
        self.indexes.iter().map(|i| i.name()).collect()
    }

    /// Priority of this column within the named index
    pub fn priority_in(&self, index_name: &str) -> Option<i32> {
        self.indexes
            .iter()
            .find(|i| i.name() == index_name)
            .map(|i| i.priority)
    }
}

/// Per-table column and index listing
#[async_trait]
pub trait TableMetadata: Send + Sync {
    /// Columns in the order the engine reports them
    async fn get_table_columns(&self, schema: Option<&str>, table: &str) -> Result<Vec<Column>>;

    /// Index definitions, in no particular order
    async fn get_table_index(&self, schema: Option<&str>, table: &str) -> Result<Vec<IndexInfo>>;
}

/// `TableMetadata` backed by a connection's `SchemaIntrospection`
pub struct TableInfoReader<'a> {
    conn: &'a dyn Connection,
    engine_override: Option<&'a str>,
}

impl<'a> TableInfoReader<'a> {
    pub fn new(conn: &'a dyn Connection) -> Self {
        Self {
            conn,
            engine_override: None,
        }
    }

    /// Treat the connection as `engine` when deriving per-column flags
    pub fn with_engine(mut self, engine: &'a str) -> Self {
        self.engine_override = Some(engine);
        self
    }

    /// The override if set, otherwise the connection's own engine id
    pub fn engine_id(&self) -> &'a str {
        match self.engine_override {
            Some(engine) => engine,
            None => self.conn.engine_id(),
        }
    }

    fn introspection(&self) -> Result<&'a dyn SchemaIntrospection> {
        let conn = self.conn;
        if conn.is_closed() {
            return Err(IxmetaError::CatalogAccess(format!(
                "{} connection is closed",
                conn.driver_name()
            )));
        }
        conn.as_schema_introspection().ok_or_else(|| {
            IxmetaError::CatalogAccess(format!(
                "{} connection does not support schema introspection",
                conn.driver_name()
            ))
        })
    }
}

#[async_trait]
impl<'a> TableMetadata for TableInfoReader<'a> {
    #[tracing::instrument(skip(self))]
    async fn get_table_columns(&self, schema: Option<&str>, table: &str) -> Result<Vec<Column>> {
        let introspection = self.introspection()?;
        let use_scan_type = EngineFamily::from_id(self.engine_id()).prefers_scan_type();
        let columns = introspection
            .get_columns(schema, table)
            .await
            .map_err(IxmetaError::into_catalog_access)?;
        Ok(columns
            .into_iter()
            .map(|info| Column::from_info(info, table, use_scan_type))
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_table_index(&self, schema: Option<&str>, table: &str) -> Result<Vec<IndexInfo>> {
        self.introspection()?
            .get_indexes(schema, table)
            .await
            .map_err(IxmetaError::into_catalog_access)
    }
}

/// List a table's columns, optionally tagged with their index memberships.
///
/// Column listing failures propagate. Index enrichment is best-effort: a
/// failed index listing returns untagged columns, and a failed key-order
/// lookup falls back to each index's own column order. Both are logged.
pub async fn get_table_columns(
    conn: &dyn Connection,
    registry: &SequenceProviderRegistry,
    schema: Option<&str>,
    table: &str,
    index_tag: bool,
) -> Result<Vec<Column>> {
    let options = ExtractOptions::default().with_index_tag(index_tag);
    get_table_columns_with_options(conn, registry, schema, table, &options).await
}

/// `get_table_columns` driven by `ExtractOptions`
pub async fn get_table_columns_with_options(
    conn: &dyn Connection,
    registry: &SequenceProviderRegistry,
    schema: Option<&str>,
    table: &str,
    options: &ExtractOptions,
) -> Result<Vec<Column>> {
    let mut reader = TableInfoReader::new(conn);
    if let Some(engine) = options.engine_override.as_deref() {
        reader = reader.with_engine(engine);
    }
    extract_columns(&reader, conn, registry, schema, table, options).await
}

/// Column fetch over any `TableMetadata` source
#[tracing::instrument(skip(meta, conn, registry, options), fields(index_tag = options.index_tag))]
pub async fn extract_columns<M>(
    meta: &M,
    conn: &dyn Connection,
    registry: &SequenceProviderRegistry,
    schema: Option<&str>,
    table: &str,
    options: &ExtractOptions,
) -> Result<Vec<Column>>
where
    M: TableMetadata + ?Sized,
{
    let mut columns = meta.get_table_columns(schema, table).await?;
    if !options.index_tag || columns.is_empty() {
        return Ok(columns);
    }

    let indexes = match meta.get_table_index(schema, table).await {
        Ok(indexes) => indexes,
        Err(err) => {
            tracing::warn!(
                table = %table,
                error = %err,
                "index listing failed, returning columns without indexes"
            );
            return Ok(columns);
        }
    };
    if indexes.is_empty() {
        return Ok(columns);
    }

    let sequences = if options.sequence_lookup {
        let engine = match options.engine_override.as_deref() {
            Some(engine) => engine,
            None => conn.engine_id(),
        };
        match lookup_with_engine(conn, registry, engine, schema, table).await {
            Ok(sequences) => sequences,
            Err(err) => {
                tracing::warn!(
                    table = %table,
                    error = %err,
                    "index sequence lookup failed, using listed column order"
                );
                IndexColumnSequences::new()
            }
        }
    } else {
        IndexColumnSequences::new()
    };

    let index_list: Vec<Option<Arc<IndexInfo>>> =
        indexes.into_iter().map(|idx| Some(Arc::new(idx))).collect();
    let mut by_column = group_by_column_with_sequences(&index_list, &sequences);
    for column in &mut columns {
        column.indexes = by_column.remove(&column.name).unwrap_or_default();
    }

    tracing::debug!(
        table = %table,
        columns = columns.len(),
        indexes = index_list.len(),
        "attached index memberships"
    );
    Ok(columns)
}

/// The table's comment, or an empty string when it can't be read
pub async fn get_table_comment(conn: &dyn Connection, schema: Option<&str>, table: &str) -> String {
    if conn.is_closed() {
        return String::new();
    }
    let Some(introspection) = conn.as_schema_introspection() else {
        return String::new();
    };
    match introspection.get_table_info(schema, table).await {
        Ok(info) => info.comment.unwrap_or_default(),
        Err(err) => {
            tracing::debug!(table = %table, error = %err, "table comment unavailable");
            String::new()
        }
    }
}
