//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::binder::{BindPlan, ColumnBinding, RowTarget, scan_all};
pub use crate::error::SqlRebindError;
pub use crate::pipeline::{
    PassthroughExpander, StatementExecutor, TemplateExpander, execute, fetch_all, materialize,
};
pub use crate::results::{ResultSet, SqlRow};
pub use crate::rewrite::{
    Dialect, Placeholder, RewriteOptions, RewrittenStatement, UnresolvedPolicy, bindvar_token,
    rewrite_statement,
};
pub use crate::source::BindSource;
pub use crate::value::{FromSqlValue, SqlValue};
