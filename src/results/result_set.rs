use std::collections::HashMap;
use std::sync::Arc;

use super::row::{SqlRow, build_column_index};
use crate::value::SqlValue;

/// The rows produced by one statement execution.
///
/// Column names are stored once and shared by every row, along with one
/// name-to-index map built when the names are set.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query.
    pub rows: Vec<SqlRow>,
    /// Rows affected, for DML statements.
    pub rows_affected: usize,
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            rows: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
            column_index: None,
        }
    }

    /// Set the column names shared by all rows. The name-to-index map is
    /// built here, once per result set.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(Arc::new(build_column_index(&column_names)));
        self.column_names = Some(column_names);
    }

    /// The shared column names, if set.
    #[must_use]
    pub fn column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Append a row from its cell values. No-op until column names are set.
    pub fn add_row_values(&mut self, values: Vec<SqlValue>) {
        if let (Some(column_names), Some(column_index)) =
            (&self.column_names, &self.column_index)
        {
            self.rows.push(SqlRow {
                column_names: column_names.clone(),
                values,
                column_index: column_index.clone(),
            });
            self.rows_affected += 1;
        }
    }

    /// Append an already-built row.
    pub fn add_row(&mut self, row: SqlRow) {
        if self.column_names.is_none() {
            self.column_names = Some(row.column_names.clone());
            self.column_index = Some(row.column_index.clone());
        }
        self.rows.push(row);
        self.rows_affected += 1;
    }
}
