//! Connection and cursor traits

use crate::{QueryResult, Result, Row, SchemaIntrospection, Value};
use async_trait::async_trait;

/// A forward-only cursor over a query's rows.
///
/// Dropping the cursor releases it; drivers return their server-side
/// resources from `Drop`, so every exit path of a scan loop closes it.
#[async_trait]
pub trait RowCursor: Send {
    /// Fetch the next row, `Ok(None)` once the result is exhausted
    async fn next_row(&mut self) -> Result<Option<Row>>;
}

/// Cursor over a result that has already been fetched in full
#[derive(Debug)]
pub struct MaterializedCursor {
    rows: std::vec::IntoIter<Row>,
}

impl MaterializedCursor {
    pub fn new(result: QueryResult) -> Self {
        Self {
            rows: result.rows.into_iter(),
        }
    }
}

#[async_trait]
impl RowCursor for MaterializedCursor {
    async fn next_row(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.next())
    }
}

/// A database connection/session handle.
///
/// Passed explicitly through every catalog call; nothing in this workspace
/// keeps a process-wide handle.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "sqlite", "postgres", "mysql")
    fn driver_name(&self) -> &str;

    /// Dialect identifier used to pick engine-specific catalog queries.
    /// Returns None if the dialect is unknown, in which case callers fall
    /// back to `driver_name`.
    fn dialect_id(&self) -> Option<&'static str> {
        None
    }

    /// Execute a query that returns rows
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Open a cursor over a query's rows.
    ///
    /// The default materializes the whole result through `query`; drivers
    /// with real server-side cursors override it.
    async fn open_cursor(&self, sql: &str, params: &[Value]) -> Result<Box<dyn RowCursor>> {
        let result = self.query(sql, params).await?;
        Ok(Box::new(MaterializedCursor::new(result)))
    }

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;

    /// Get schema introspection interface if supported
    fn as_schema_introspection(&self) -> Option<&dyn SchemaIntrospection> {
        None
    }

    /// Engine identifier: `dialect_id` when known, otherwise `driver_name`
    fn engine_id(&self) -> &str {
        match self.dialect_id() {
            Some(id) => id,
            None => self.driver_name(),
        }
    }
}
