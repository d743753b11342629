//! Index reconciliation: column name -> index memberships with key priority

use std::collections::HashMap;
use std::sync::Arc;

use ixmeta_catalog::IndexColumnSequences;
use ixmeta_core::{IndexDefinition, IndexInfo};

/// One index a column belongs to, and where the column sits in its key
#[derive(Debug)]
pub struct IndexRef<I: ?Sized = IndexInfo> {
    pub index: Arc<I>,
    /// 1-based position of the column in the index key
    pub priority: i32,
}

impl<I: ?Sized> Clone for IndexRef<I> {
    fn clone(&self) -> Self {
        Self {
            index: self.index.clone(),
            priority: self.priority,
        }
    }
}

impl<I: IndexDefinition + ?Sized> IndexRef<I> {
    pub fn name(&self) -> &str {
        self.index.name()
    }

    pub fn is_unique(&self) -> bool {
        self.index.is_unique()
    }
}

impl<I: IndexDefinition + ?Sized> PartialEq for IndexRef<I> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
            && self.index.name() == other.index.name()
            && self.index.columns() == other.index.columns()
            && self.index.is_unique() == other.index.is_unique()
    }
}

/// Column name -> every index membership of that column
pub type ColumnIndexMap<I = IndexInfo> = HashMap<String, Vec<IndexRef<I>>>;

/// 1-based position of the first occurrence of `column` in `columns`
fn positional_priority(columns: &[String], column: &str) -> i32 {
    columns
        .iter()
        .position(|c| c == column)
        .map_or(0, |i| i as i32 + 1)
}

/// Group index memberships by column using each index's own column order.
///
/// `None` entries are skipped.
pub fn group_by_column<I>(index_list: &[Option<Arc<I>>]) -> ColumnIndexMap<I>
where
    I: IndexDefinition + ?Sized,
{
    let mut column_index_map: ColumnIndexMap<I> = HashMap::with_capacity(index_list.len());

    for idx in index_list.iter().flatten() {
        let columns = idx.columns();
        for col in columns {
            column_index_map
                .entry(col.clone())
                .or_default()
                .push(IndexRef {
                    index: idx.clone(),
                    priority: positional_priority(columns, col),
                });
        }
    }
    column_index_map
}

/// Group index memberships by column, taking priorities from catalog key order.
///
/// For each column of each index:
/// - the sequence recorded for (index, column) when there is one;
/// - otherwise the column's position in the index's own column list.
///
/// With an empty `index_column_seq` this returns exactly what
/// `group_by_column` returns.
pub fn group_by_column_with_sequences<I>(
    index_list: &[Option<Arc<I>>],
    index_column_seq: &IndexColumnSequences,
) -> ColumnIndexMap<I>
where
    I: IndexDefinition + ?Sized,
{
    let mut column_index_map: ColumnIndexMap<I> = HashMap::with_capacity(index_list.len());

    for idx in index_list.iter().flatten() {
        let columns = idx.columns();
        let column_seq = index_column_seq.get(idx.name());

        for col in columns {
            let priority = match column_seq {
                Some(seqs) => match seqs.get(col) {
                    Some(&seq) => seq,
                    None => {
                        tracing::debug!(
                            index = %idx.name(),
                            column = %col,
                            "column missing from catalog key order, using listed position"
                        );
                        positional_priority(columns, col)
                    }
                },
                None => positional_priority(columns, col),
            };

            column_index_map
                .entry(col.clone())
                .or_default()
                .push(IndexRef {
                    index: idx.clone(),
                    priority,
                });
        }
    }
    column_index_map
}
