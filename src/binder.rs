//! Row binding: result columns to struct fields by declared column name.
//!
//! A destination type declares its column table once with
//! [`row_target!`](crate::row_target); a [`BindPlan`] then resolves a result
//! set's column order against that table up front, so per-row scans are a
//! straight positional walk. Binding is fail-fast: a column with no matching
//! field aborts before any field is written, and partially populated records
//! are never produced.

use crate::error::SqlRebindError;
use crate::results::{ResultSet, SqlRow};
use crate::value::SqlValue;

/// One declared column-to-field write target.
pub struct ColumnBinding<T> {
    /// The result column name this field is bound to.
    pub column: &'static str,
    /// Writes a cell value into the field.
    pub write: fn(&mut T, &SqlValue) -> Result<(), SqlRebindError>,
}

/// A type rows can be scanned into.
///
/// Implemented via [`row_target!`](crate::row_target), which builds the
/// binding table at compile time. Fields without an entry in the table are
/// not scan targets and keep their `Default` value.
pub trait RowTarget: Default + Sized {
    /// The declared column bindings for this type.
    fn column_bindings() -> &'static [ColumnBinding<Self>];
}

/// Write targets for one column-name ordering, built once per result set
/// and reused for every row.
pub struct BindPlan<T: RowTarget> {
    writes: Vec<fn(&mut T, &SqlValue) -> Result<(), SqlRebindError>>,
}

impl<T: RowTarget> core::fmt::Debug for BindPlan<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BindPlan")
            .field("writes", &self.writes)
            .finish()
    }
}

impl<T: RowTarget + 'static> BindPlan<T> {
    /// Match each result column against the destination's binding table.
    ///
    /// # Errors
    ///
    /// - `MalformedDestination` when the destination declares no bindings,
    ///   or declares the same column twice.
    /// - `MissingColumnField` for the first column with no matching field.
    pub fn new(columns: &[String]) -> Result<Self, SqlRebindError> {
        let bindings = T::column_bindings();
        if bindings.is_empty() {
            return Err(SqlRebindError::MalformedDestination(
                "destination declares no column bindings".to_string(),
            ));
        }
        for (i, b) in bindings.iter().enumerate() {
            if bindings[..i].iter().any(|prev| prev.column == b.column) {
                return Err(SqlRebindError::MalformedDestination(format!(
                    "column '{}' is bound to more than one field",
                    b.column
                )));
            }
        }

        let mut writes = Vec::with_capacity(columns.len());
        for column in columns {
            let binding = bindings
                .iter()
                .find(|b| b.column == column.as_str())
                .ok_or_else(|| SqlRebindError::MissingColumnField(column.clone()))?;
            writes.push(binding.write);
        }

        tracing::debug!(columns = columns.len(), "built bind plan");
        Ok(Self { writes })
    }

    /// Scan one row into a fresh record.
    ///
    /// # Errors
    ///
    /// `ParameterError` when the row's width does not match the plan or a
    /// cell's shape does not fit its field.
    pub fn scan(&self, row: &SqlRow) -> Result<T, SqlRebindError> {
        self.scan_values(&row.values)
    }

    /// Scan one row's cell values, in column order.
    ///
    /// # Errors
    ///
    /// See [`BindPlan::scan`].
    pub fn scan_values(&self, values: &[SqlValue]) -> Result<T, SqlRebindError> {
        if values.len() != self.writes.len() {
            return Err(SqlRebindError::ParameterError(format!(
                "row has {} values but the plan binds {} columns",
                values.len(),
                self.writes.len()
            )));
        }
        let mut dest = T::default();
        for (write, value) in self.writes.iter().zip(values) {
            write(&mut dest, value)?;
        }
        Ok(dest)
    }
}

/// Scan every row of a result set, building the plan once.
///
/// An empty result set with no column metadata scans to an empty vec.
///
/// # Errors
///
/// Same failure modes as [`BindPlan::new`] and [`BindPlan::scan`].
pub fn scan_all<T: RowTarget + 'static>(result_set: &ResultSet) -> Result<Vec<T>, SqlRebindError> {
    let Some(columns) = result_set.column_names() else {
        return Ok(Vec::new());
    };
    let plan = BindPlan::<T>::new(columns)?;
    result_set.rows.iter().map(|row| plan.scan(row)).collect()
}

/// Declares the column-to-field table that makes a struct a [`RowTarget`].
///
/// Each entry binds a field to the result column name it is scanned from,
/// the moral equivalent of a `db:"column"` tag:
///
/// ```rust
/// use sql_rebind::row_target;
///
/// #[derive(Default)]
/// struct Entity {
///     book: String,
///     author: String,
/// }
///
/// row_target!(Entity {
///     book => "book",
///     author => "author",
/// });
/// ```
#[macro_export]
macro_rules! row_target {
    ($ty:ty { $($field:ident => $col:literal),+ $(,)? }) => {
        impl $crate::binder::RowTarget for $ty {
            fn column_bindings() -> &'static [$crate::binder::ColumnBinding<Self>] {
                const BINDINGS: &[$crate::binder::ColumnBinding<$ty>] = &[
                    $(
                        $crate::binder::ColumnBinding {
                            column: $col,
                            write: |dest, value| {
                                dest.$field =
                                    $crate::value::FromSqlValue::from_sql_value(value)?;
                                Ok(())
                            },
                        },
                    )+
                ];
                BINDINGS
            }
        }
    };
}
