//! PostgreSQL index key order from `pg_index.indkey`

use async_trait::async_trait;
use indoc::indoc;
use ixmeta_core::{Connection, EngineFamily, Result, Value};

use crate::provider::{fetch_sequences, non_empty, IndexColumnSequences, SequenceProvider};

/// Schema used when the caller does not name one
pub const DEFAULT_SCHEMA: &str = "public";

/// `indkey` is an int2vector of attribute numbers; `generate_subscripts`
/// enumerates its 0-based positions so each (index, position) becomes a row.
pub const INDEX_SEQUENCE_SQL: &str = indoc! {"
    SELECT
        i.relname AS index_name,
        a.attname AS column_name,
        (pos + 1) AS seq_in_index
    FROM pg_index ix
    JOIN pg_class i ON i.oid = ix.indexrelid
    JOIN pg_class t ON t.oid = ix.indrelid
    JOIN pg_namespace n ON n.oid = t.relnamespace
    JOIN LATERAL generate_subscripts(ix.indkey, 1) AS pos ON true
    JOIN pg_attribute a ON a.attrelid = t.oid AND a.attnum = ix.indkey[pos]
    WHERE n.nspname = $1 AND t.relname = $2
    ORDER BY i.relname, pos"};

#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresSequenceProvider;

impl PostgresSequenceProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SequenceProvider for PostgresSequenceProvider {
    fn engine(&self) -> EngineFamily {
        EngineFamily::Postgres
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
