//! Scripted connection used by the extraction tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use ixmeta_core::{
    ColumnInfo, Connection, IndexInfo, IxmetaError, MaterializedCursor, QueryResult, Result, Row,
    RowCursor, SchemaIntrospection, TableInfo, Value,
};

pub fn init_test_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive("ixmeta_schema=debug".parse().unwrap())
                    .add_directive("ixmeta_catalog=debug".parse().unwrap()),
            )
            .with_test_writer()
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// What the next statement should produce
pub enum Scripted {
    Rows(QueryResult),
    Fail(String),
    /// Cursor items handed out one by one
    Cursor(Vec<Result<Option<Row>>>),
}

pub const SEQ_COLUMNS: [&str; 3] = ["index_name", "column_name", "seq_in_index"];

pub fn seq_rows(rows: &[(&str, &str, i32)]) -> Scripted {
    Scripted::Rows(QueryResult::from_rows(
        &SEQ_COLUMNS,
        rows.iter()
            .map(|(i, c, s)| vec![Value::from(*i), Value::from(*c), Value::Int32(*s)])
            .collect(),
    ))
}

pub fn seq_row(index: &str, column: &str, seq: Value) -> Row {
    Row::new(
        SEQ_COLUMNS.iter().map(|c| c.to_string()).collect(),
        vec![index.into(), column.into(), seq],
    )
}

pub fn column(name: &str, ordinal: usize, data_type: &str) -> ColumnInfo {
    ColumnInfo {
        name: name.to_string(),
        ordinal,
        data_type: data_type.to_string(),
        nullable: true,
        ..Default::default()
    }
}

struct TrackedCursor {
    items: VecDeque<Result<Option<Row>>>,
    open: Arc<AtomicUsize>,
}

#[async_trait]
impl RowCursor for TrackedCursor {
    async fn next_row(&mut self) -> Result<Option<Row>> {
        self.items.pop_front().unwrap_or(Ok(None))
    }
}

impl Drop for TrackedCursor {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

/// In-memory connection with scripted catalog answers.
///
/// `get_columns`/`get_indexes` answer from fixed data; every SQL statement
/// pops the next `Scripted` response and is recorded.
pub struct ScriptedConnection {
    driver: &'static str,
    dialect: Option<&'static str>,
    closed: AtomicBool,
    introspection: bool,
    columns: std::result::Result<Vec<ColumnInfo>, String>,
    indexes: std::result::Result<Vec<IndexInfo>, String>,
    table_comment: Option<String>,
    responses: Mutex<VecDeque<Scripted>>,
    statements: Mutex<Vec<(String, Vec<Value>)>>,
    index_calls: AtomicUsize,
    open_cursors: Arc<AtomicUsize>,
}

impl ScriptedConnection {
    pub fn new(driver: &'static str) -> Self {
        Self {
            driver,
            dialect: None,
            closed: AtomicBool::new(false),
            introspection: true,
            columns: Ok(Vec::new()),
            indexes: Ok(Vec::new()),
            table_comment: None,
            responses: Mutex::new(VecDeque::new()),
            statements: Mutex::new(Vec::new()),
            index_calls: AtomicUsize::new(0),
            open_cursors: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_dialect(mut self, dialect: &'static str) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnInfo>) -> Self {
        self.columns = Ok(columns);
        self
    }

    pub fn with_column_error(mut self, message: &str) -> Self {
        self.columns = Err(message.to_string());
        self
    }

    pub fn with_indexes(mut self, indexes: Vec<IndexInfo>) -> Self {
        self.indexes = Ok(indexes);
        self
    }

    pub fn with_index_error(mut self, message: &str) -> Self {
        self.indexes = Err(message.to_string());
        self
    }

    pub fn with_table_comment(mut self, comment: &str) -> Self {
        self.table_comment = Some(comment.to_string());
        self
    }

    pub fn without_introspection(mut self) -> Self {
        self.introspection = false;
        self
    }

    pub fn respond(self, response: Scripted) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn statements(&self) -> Vec<(String, Vec<Value>)> {
        self.statements.lock().unwrap().clone()
    }

    pub fn index_calls(&self) -> usize {
        self.index_calls.load(Ordering::SeqCst)
    }

    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    fn next_response(&self, sql: &str, params: &[Value]) -> Scripted {
        self.statements
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::Rows(QueryResult::empty()))
    }

    fn tracked(&self, items: VecDeque<Result<Option<Row>>>) -> Box<dyn RowCursor> {
        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        Box::new(TrackedCursor {
            items,
            open: self.open_cursors.clone(),
        })
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    fn driver_name(&self) -> &str {
        self.driver
    }

    fn dialect_id(&self) -> Option<&'static str> {
        self.dialect
    }

    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        match self.next_response(sql, params) {
            Scripted::Rows(result) => Ok(result),
            Scripted::Fail(message) => Err(IxmetaError::Query(message)),
            Scripted::Cursor(_) => Err(IxmetaError::Query(
                "scripted cursor answered a plain query".to_string(),
            )),
        }
    }

    async fn open_cursor(&self, sql: &str, params: &[Value]) -> Result<Box<dyn RowCursor>> {
        match self.next_response(sql, params) {
            Scripted::Rows(result) => {
                let mut rows = MaterializedCursor::new(result);
                let mut items = VecDeque::new();
                while let Some(row) = rows.next_row().await? {
                    items.push_back(Ok(Some(row)));
                }
                Ok(self.tracked(items))
            }
            Scripted::Fail(message) => Err(IxmetaError::Query(message)),
            Scripted::Cursor(items) => Ok(self.tracked(items.into())),
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn as_schema_introspection(&self) -> Option<&dyn SchemaIntrospection> {
        if self.introspection {
            Some(self)
        } else {
            None
        }
    }
}

#[async_trait]
impl SchemaIntrospection for ScriptedConnection {
    async fn get_columns(&self, _schema: Option<&str>, _table: &str) -> Result<Vec<ColumnInfo>> {
        self.columns.clone().map_err(IxmetaError::Query)
    }

    async fn get_indexes(&self, _schema: Option<&str>, _table: &str) -> Result<Vec<IndexInfo>> {
        self.index_calls.fetch_add(1, Ordering::SeqCst);
        self.indexes.clone().map_err(IxmetaError::Query)
    }

    async fn get_table_info(&self, schema: Option<&str>, table: &str) -> Result<TableInfo> {
        Ok(TableInfo {
            schema: schema.map(|s| s.to_string()),
            name: table.to_string(),
            comment: self.table_comment.clone(),
        })
    }
}
