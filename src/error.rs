use thiserror::Error;

/// Errors surfaced by statement rewriting and row binding.
///
/// Unknown dialects are deliberately not represented here: they fall back to
/// the generic `?` bindvar so unconfigured callers still get valid output.
#[derive(Debug, Error)]
pub enum SqlRebindError {
    /// A placeholder name had no matching key or field in the bind source.
    ///
    /// Only produced under `UnresolvedPolicy::Error`; the default policy
    /// binds NULL and reports the name in `RewrittenStatement::unbound`.
    #[error("unresolved placeholder '{0}'")]
    UnresolvedPlaceholder(String),

    /// A result column had no matching bound field on the scan destination.
    /// Always fatal for the scan; partial binds are not permitted.
    #[error("no field bound to result column '{0}'")]
    MissingColumnField(String),

    /// The scan destination cannot accept rows at all (empty or duplicated
    /// binding table). Reported before any field is written.
    #[error("malformed scan destination: {0}")]
    MalformedDestination(String),

    /// A value did not fit the destination field's shape.
    #[error("parameter error: {0}")]
    ParameterError(String),

    /// The template expansion collaborator failed before rewriting began.
    #[error("template expansion error: {0}")]
    TemplateError(String),

    /// Failure reported by a statement executor implementation.
    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}
