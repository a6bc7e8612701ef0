//! The statement materialization pipeline and its collaborator seams.
//!
//! The full flow is template expansion (external), then placeholder
//! rewriting (this crate), then driver execution (external), then row
//! binding (this crate). The two external stages are represented by small
//! traits so callers can plug in a real template engine and a real driver;
//! this crate performs no I/O itself.

use crate::binder::{RowTarget, scan_all};
use crate::error::SqlRebindError;
use crate::results::ResultSet;
use crate::rewrite::{RewriteOptions, RewrittenStatement, rewrite_statement};
use crate::source::BindSource;
use crate::value::SqlValue;

/// The conditional-template stage. It must fully resolve template blocks
/// before the rewriter sees the text; the rewriter treats its output as a
/// plain statement.
pub trait TemplateExpander<D: ?Sized> {
    /// Expand `template` against `data` into a plain statement.
    ///
    /// # Errors
    ///
    /// Implementations report failures as `SqlRebindError::TemplateError`.
    fn expand(&self, template: &str, data: &D) -> Result<String, SqlRebindError>;
}

/// The identity expander, for statements that are not templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughExpander;

impl<D: ?Sized> TemplateExpander<D> for PassthroughExpander {
    fn expand(&self, template: &str, _data: &D) -> Result<String, SqlRebindError> {
        Ok(template.to_string())
    }
}

/// The driver stage: executes a rewritten statement with positional
/// parameters and returns rows (or, for DML, a rows-affected count on an
/// otherwise empty result set).
pub trait StatementExecutor {
    /// Execute `statement` with `params` bound positionally.
    ///
    /// # Errors
    ///
    /// Implementations report failures as `SqlRebindError::ExecutionError`.
    fn execute(
        &mut self,
        statement: &str,
        params: &[SqlValue],
    ) -> Result<ResultSet, SqlRebindError>;
}

/// Expand a template and rewrite the result in one step.
///
/// # Errors
///
/// Propagates template failures and rewrite failures unchanged.
pub fn materialize<D, E>(
    template: &str,
    data: &D,
    options: &RewriteOptions,
    expander: &E,
) -> Result<RewrittenStatement, SqlRebindError>
where
    D: BindSource,
    E: TemplateExpander<D>,
{
    let expanded = expander.expand(template, data)?;
    rewrite_statement(&expanded, data, options)
}

/// Materialize and run a statement that returns rows, scanning every row
/// into `T`.
///
/// # Errors
///
/// Propagates template, rewrite, execution, and binding failures.
pub fn fetch_all<T, D, E, X>(
    executor: &mut X,
    template: &str,
    data: &D,
    options: &RewriteOptions,
    expander: &E,
) -> Result<Vec<T>, SqlRebindError>
where
    T: RowTarget + 'static,
    D: BindSource,
    E: TemplateExpander<D>,
    X: StatementExecutor,
{
    let rewritten = materialize(template, data, options, expander)?;
    let result_set = executor.execute(&rewritten.statement, &rewritten.params)?;
    scan_all(&result_set)
}

/// Materialize and run a DML statement, returning rows affected.
///
/// # Errors
///
/// Propagates template, rewrite, and execution failures.
pub fn execute<D, E, X>(
    executor: &mut X,
    template: &str,
    data: &D,
    options: &RewriteOptions,
    expander: &E,
) -> Result<usize, SqlRebindError>
where
    D: BindSource,
    E: TemplateExpander<D>,
    X: StatementExecutor,
{
    let rewritten = materialize(template, data, options, expander)?;
    let result_set = executor.execute(&rewritten.statement, &rewritten.params)?;
    Ok(result_set.rows_affected)
}
