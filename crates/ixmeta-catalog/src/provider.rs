//! Sequence provider trait and the shared row-scanning loop

use async_trait::async_trait;
use ixmeta_core::{Connection, EngineFamily, IxmetaError, Result, Row, RowCursor, Value};
use std::collections::HashMap;

/// index name -> column name -> 1-based position of the column in the index key
pub type IndexColumnSequences = HashMap<String, HashMap<String, i32>>;

/// Fetches the authoritative key order of every index on a table.
#[async_trait]
pub trait SequenceProvider: Send + Sync {
    /// Engine family this provider speaks to
    fn engine(&self) -> EngineFamily;

    /// Query the catalog for the key position of each index column.
    ///
    /// `schema` of `None` (or empty) means the connection's current schema.
    /// Any failure, including an undecodable row, is a `MetadataQuery` error.
    async fn index_column_sequences(
        &self,
        conn: &dyn Connection,
        schema: Option<&str>,
        table: &str,
    ) -> Result<IndexColumnSequences>;
}

/// Provider for engines without a known catalog layout.
///
/// Always answers with an empty table so reconciliation falls back to the
/// index's own column order.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSequenceProvider;

#[async_trait]
impl SequenceProvider for NoopSequenceProvider {
    fn engine(&self) -> EngineFamily {
        EngineFamily::Other
    }

    async fn index_column_sequences(
        &self,
        conn: &dyn Connection,
        _schema: Option<&str>,
        table: &str,
    ) -> Result<IndexColumnSequences> {
        tracing::debug!(
            engine = %conn.engine_id(),
            table = %table,
            "no index sequence query for engine"
        );
        Ok(IndexColumnSequences::new())
    }
}

/// Treat `Some("")` like `None`
pub(crate) fn non_empty(schema: Option<&str>) -> Option<&str> {
    schema.filter(|s| !s.trim().is_empty())
}

/// Run `sql` and collect `(index_name, column_name, seq_in_index)` rows.
pub(crate) async fn fetch_sequences(
    conn: &dyn Connection,
    sql: &str,
    params: &[Value],
) -> Result<IndexColumnSequences> {
    let cursor = conn
        .open_cursor(sql, params)
        .await
        .map_err(IxmetaError::into_metadata_query)?;
    scan_sequences(cursor).await
}

/// Drain a cursor of `(index_name, column_name, seq_in_index)` rows.
///
/// Stops at the first row that fails to decode. The cursor is owned here and
/// dropped on every return.
pub async fn scan_sequences(mut cursor: Box<dyn RowCursor>) -> Result<IndexColumnSequences> {
    let mut sequences = IndexColumnSequences::new();
    let mut row_number = 0usize;

    while let Some(row) = cursor
        .next_row()
        .await
        .map_err(IxmetaError::into_metadata_query)?
    {
        row_number += 1;
        let (index_name, column_name, seq) = decode_sequence_row(&row, row_number)?;
        sequences
            .entry(index_name)
            .or_default()
            .insert(column_name, seq);
    }

    tracing::trace!(rows = row_number, indexes = sequences.len(), "scanned index sequences");
    Ok(sequences)
}

/// Decode one `(index_name, column_name, seq_in_index)` row
pub fn decode_sequence_row(row: &Row, row_number: usize) -> Result<(String, String, i32)> {
    let index_name = text_cell(row, 0, "index_name", row_number)?;
    let column_name = text_cell(row, 1, "column_name", row_number)?;
    let seq = sequence_cell(row, 2, row_number)?;
    Ok((index_name, column_name, seq))
}

fn cell<'r>(row: &'r Row, idx: usize, what: &str, row_number: usize) -> Result<&'r Value> {
    row.get(idx).ok_or_else(|| {
        IxmetaError::MetadataQuery(format!(
            "row {}: missing {} (column {})",
            row_number, what, idx
        ))
    })
}

fn text_cell(row: &Row, idx: usize, what: &str, row_number: usize) -> Result<String> {
    let value = cell(row, idx, what, row_number)?;
    if let Some(text) = value.as_text() {
        return Ok(text.to_string());
    }
    Err(match value {
        Value::Bytes(_) => {
            IxmetaError::MetadataQuery(format!("row {}: {} is not valid UTF-8", row_number, what))
        }
        other => IxmetaError::MetadataQuery(format!(
            "row {}: cannot scan {} value into {}",
            row_number,
            other.type_name(),
            what
        )),
    })
}

fn sequence_cell(row: &Row, idx: usize, row_number: usize) -> Result<i32> {
    let value = cell(row, idx, "seq_in_index", row_number)?;
    let wide = value.as_i64().ok_or_else(|| {
        IxmetaError::MetadataQuery(format!(
            "row {}: cannot scan {} value into seq_in_index",
            row_number,
            value.type_name()
        ))
    })?;
    match i32::try_from(wide) {
        Ok(seq) if seq >= 1 => Ok(seq),
        _ => Err(IxmetaError::MetadataQuery(format!(
            "row {}: seq_in_index {} out of range",
            row_number, wide
        ))),
    }
}
