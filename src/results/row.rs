use std::collections::HashMap;
use std::sync::Arc;

use crate::value::SqlValue;

/// A single row of a result set.
///
/// Column names are shared across all rows of one result set; a shared
/// name-to-index map makes repeated lookups by column name cheap.
#[derive(Debug, Clone)]
pub struct SqlRow {
    /// The column names for this row (shared across the result set).
    pub column_names: Arc<Vec<String>>,
    /// The cell values, in column order.
    pub values: Vec<SqlValue>,
    pub(crate) column_index: Arc<HashMap<String, usize>>,
}

impl SqlRow {
    /// Create a standalone row. Rows inside a [`ResultSet`](super::ResultSet)
    /// share one index map instead.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<SqlValue>) -> Self {
        let column_index = Arc::new(build_column_index(&column_names));
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Index of a column by name, if present.
    #[must_use]
    pub fn column_position(&self, column_name: &str) -> Option<usize> {
        self.column_index.get(column_name).copied()
    }

    /// Cell value by column name.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&SqlValue> {
        self.column_position(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Cell value by column position.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }
}

pub(super) fn build_column_index(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_and_index_agree() {
        let row = SqlRow::new(
            Arc::new(vec!["id".into(), "name".into()]),
            vec![SqlValue::Int(1), SqlValue::Text("a".into())],
        );
        assert_eq!(row.get("name"), row.get_by_index(1));
        assert_eq!(row.column_position("id"), Some(0));
        assert_eq!(row.get("missing"), None);
    }
}
