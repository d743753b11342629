//! SQL Server index key order from the `sys` catalog views

use async_trait::async_trait;
use indoc::indoc;
use ixmeta_core::{Connection, EngineFamily, Result, Value};

use crate::provider::{fetch_sequences, non_empty, IndexColumnSequences, SequenceProvider};

/// Schema used when the caller does not name one
pub const DEFAULT_SCHEMA: &str = "dbo";

/// `key_ordinal` is already 1-based.
pub const INDEX_SEQUENCE_SQL: &str = indoc! {"
    SELECT
        i.name AS index_name,
        c.name AS column_name,
        ic.key_ordinal AS seq_in_index
    FROM sys.indexes i
    JOIN sys.index_columns ic ON i.object_id = ic.object_id AND i.index_id = ic.index_id
    JOIN sys.columns c ON ic.object_id = c.object_id AND ic.column_id = c.column_id
    JOIN sys.tables t ON i.object_id = t.object_id
    JOIN sys.schemas s ON t.schema_id = s.schema_id
    WHERE s.name = @P1 AND t.name = @P2
    ORDER BY i.name, ic.key_ordinal"};

#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlSequenceProvider;

impl MssqlSequenceProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SequenceProvider for MssqlSequenceProvider {
    fn engine(&self) -> EngineFamily {
        EngineFamily::SqlServer
    }

    #[tracing::instrument(skip(self, conn))]
    async fn index_column_sequences(
        &self,
        conn: &dyn Connection,
        schema: Option<&str>,
        table: &str,
    ) -> Result<IndexColumnSequences> {
        let schema = non_empty(schema).unwrap_or(DEFAULT_SCHEMA);
        fetch_sequences(
            conn,
            INDEX_SEQUENCE_SQL,
            &[Value::from(schema), Value::from(table)],
        )
        .await
    }
}
