//! MySQL/MariaDB index key order from `information_schema.STATISTICS`

use async_trait::async_trait;
use indoc::indoc;
use ixmeta_core::{Connection, EngineFamily, IxmetaError, Result, Value};

use crate::provider::{fetch_sequences, non_empty, IndexColumnSequences, SequenceProvider};

pub const CURRENT_DATABASE_SQL: &str = "SELECT DATABASE()";

pub const INDEX_SEQUENCE_SQL: &str = indoc! {"
    SELECT INDEX_NAME, COLUMN_NAME, SEQ_IN_INDEX
    FROM information_schema.STATISTICS
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
    ORDER BY INDEX_NAME, SEQ_IN_INDEX"};

#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlSequenceProvider;

impl MySqlSequenceProvider {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the session's default database.
    ///
    /// `Ok(None)` when no database is selected.
    pub async fn current_database(conn: &dyn Connection) -> Result<Option<String>> {
        let result = conn
            .query(CURRENT_DATABASE_SQL, &[])
            .await
            .map_err(IxmetaError::into_metadata_query)?;
        let Some(value) = result.rows.first().and_then(|row| row.get(0)) else {
            return Ok(None);
        };
        if value.is_null() {
            return Ok(None);
        }
        match value.as_text() {
            Some("") => Ok(None),
            Some(name) => Ok(Some(name.to_string())),
            None => Err(IxmetaError::MetadataQuery(format!(
                "cannot scan {} value into current database name",
                value.type_name()
            ))),
        }
    }
}

#[async_trait]
impl SequenceProvider for MySqlSequenceProvider {
    fn engine(&self) -> EngineFamily {
        EngineFamily::MySql
    }

    #[tracing::instrument(skip(self, conn))]
    async fn index_column_sequences(
        &self,
        conn: &dyn Connection,
        schema: Option<&str>,
        table: &str,
    ) -> Result<IndexColumnSequences> {
        let schema = match non_empty(schema) {
            Some(schema) => schema.to_string(),
            None => match Self::current_database(conn).await? {
                Some(database) => database,
                None => {
                    tracing::debug!(
                        table = %table,
                        "no database selected, skipping index sequences"
                    );
                    return Ok(IndexColumnSequences::new());
                }
            },
        };

        fetch_sequences(
            conn,
            INDEX_SEQUENCE_SQL,
            &[Value::from(schema), Value::from(table)],
        )
        .await
    }
}
