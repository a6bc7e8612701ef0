//! Statement rewriting: named placeholders to positional bindvars.
//!
//! `@name` placeholders are discovered by the scanner, resolved against a
//! [`BindSource`] by name, and replaced with the target dialect's positional
//! token. The output argument order always matches the token ordinals: the
//! rewritten statement executed with [`RewrittenStatement::params`] supplied
//! positionally reproduces the named bindings.

mod scanner;

pub use scanner::Placeholder;
use scanner::scan_placeholders;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SqlRebindError;
use crate::source::BindSource;
use crate::value::SqlValue;

/// Target positional-parameter convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL-style bindvars like `$1`.
    Postgres,
    /// Plain `?` bindvars; ordinal is implicit in call order. Also the
    /// fallback for any engine without a dedicated entry.
    Generic,
}

/// Format the bindvar token for one ordinal. Pure and idempotent.
#[must_use]
pub fn bindvar_token(dialect: Dialect, ordinal: usize) -> String {
    match dialect {
        Dialect::Postgres => format!("${ordinal}"),
        Dialect::Generic => "?".to_string(),
    }
}

/// What to do when a placeholder name resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Bind `SqlValue::Null` for the slot and report the name in
    /// [`RewrittenStatement::unbound`]. Nothing is silent: callers that
    /// consider a miss fatal check `unbound`. This keeps statements built
    /// from conditional templates working when optional filters are absent.
    #[default]
    BindNull,
    /// Fail the rewrite with `UnresolvedPlaceholder` on the first miss.
    Error,
}

/// Per-call rewrite options.
///
/// Serde-derivable so applications can carry these in configuration:
/// ```rust
/// use sql_rebind::prelude::*;
///
/// let options = RewriteOptions::default()
///     .with_dialect(Dialect::Generic)
///     .with_unresolved(UnresolvedPolicy::Error);
/// # let _ = options;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteOptions {
    pub dialect: Dialect,
    /// Placeholder prefix; one sigil per statement.
    pub sigil: char,
    pub on_unresolved: UnresolvedPolicy,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Postgres,
            sigil: '@',
            on_unresolved: UnresolvedPolicy::default(),
        }
    }
}

impl RewriteOptions {
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    #[must_use]
    pub fn with_sigil(mut self, sigil: char) -> Self {
        self.sigil = sigil;
        self
    }

    #[must_use]
    pub fn with_unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.on_unresolved = policy;
        self
    }
}

/// A rewritten statement and its positional arguments, bundled so they
/// travel together to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenStatement {
    /// The statement with every placeholder replaced by a bindvar token.
    pub statement: String,
    /// Positional arguments; `params[i]` belongs to ordinal `i + 1`.
    pub params: Vec<SqlValue>,
    /// Placeholder names that resolved to nothing, in discovery order
    /// (duplicates kept). Empty under `UnresolvedPolicy::Error`.
    pub unbound: Vec<String>,
}

/// Rewrite `sql`, resolving each placeholder against `data`.
///
/// Placeholders are resolved by name at every occurrence, so a repeated
/// name gets its own ordinal and its own argument slot. The input is never
/// mutated; output is assembled by splicing byte ranges of the input around
/// each placeholder, which keeps multi-byte characters intact.
///
/// # Errors
///
/// Returns `SqlRebindError::UnresolvedPlaceholder` when a name resolves to
/// nothing and the policy is [`UnresolvedPolicy::Error`].
pub fn rewrite_statement<D: BindSource>(
    sql: &str,
    data: &D,
    options: &RewriteOptions,
) -> Result<RewrittenStatement, SqlRebindError> {
    let placeholders = scan_placeholders(sql, options.sigil);

    let mut statement = String::with_capacity(sql.len());
    let mut params = Vec::with_capacity(placeholders.len());
    let mut unbound = Vec::new();
    let mut copied_to = 0;

    for ph in &placeholders {
        statement.push_str(&sql[copied_to..ph.start]);
        statement.push_str(&bindvar_token(options.dialect, ph.ordinal));
        copied_to = ph.end;

        match data.lookup(&ph.name) {
            Some(value) => params.push(value),
            None => match options.on_unresolved {
                UnresolvedPolicy::BindNull => {
                    params.push(SqlValue::Null);
                    unbound.push(ph.name.clone());
                }
                UnresolvedPolicy::Error => {
                    return Err(SqlRebindError::UnresolvedPlaceholder(ph.name.clone()));
                }
            },
        }
    }
    statement.push_str(&sql[copied_to..]);

    tracing::debug!(
        placeholders = placeholders.len(),
        unbound = unbound.len(),
        dialect = ?options.dialect,
        "rewrote statement"
    );

    Ok(RewrittenStatement {
        statement,
        params,
        unbound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn data(pairs: &[(&str, SqlValue)]) -> HashMap<String, SqlValue> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn rewrites_to_postgres_bindvars() {
        let d = data(&[("ID", SqlValue::Int(5)), ("Name", SqlValue::Text("x".into()))]);
        let r = rewrite_statement(
            "SELECT * FROM t WHERE id = @ID AND name = @Name;",
            &d,
            &RewriteOptions::default(),
        )
        .unwrap();
        assert_eq!(r.statement, "SELECT * FROM t WHERE id = $1 AND name = $2;");
        assert_eq!(r.params, vec![SqlValue::Int(5), SqlValue::Text("x".into())]);
        assert!(r.unbound.is_empty());
    }

    #[test]
    fn generic_dialect_uses_question_marks() {
        let d = data(&[("A", SqlValue::Int(1))]);
        let opts = RewriteOptions::default().with_dialect(Dialect::Generic);
        let r = rewrite_statement("WHERE a = @A", &d, &opts).unwrap();
        assert_eq!(r.statement, "WHERE a = ?");
    }

    #[test]
    fn repeated_name_gets_independent_ordinals() {
        let d = data(&[("X", SqlValue::Text("v".into()))]);
        let r = rewrite_statement("WHERE a = @X OR b = @X", &d, &RewriteOptions::default())
            .unwrap();
        assert_eq!(r.statement, "WHERE a = $1 OR b = $2");
        assert_eq!(
            r.params,
            vec![SqlValue::Text("v".into()), SqlValue::Text("v".into())]
        );
    }

    #[test]
    fn sigil_in_literal_survives_untouched() {
        let d = data(&[("ID", SqlValue::Int(5))]);
        let r = rewrite_statement(
            "WHERE note = '@not_a_param' AND id = @ID",
            &d,
            &RewriteOptions::default(),
        )
        .unwrap();
        assert_eq!(r.statement, "WHERE note = '@not_a_param' AND id = $1");
        assert_eq!(r.params, vec![SqlValue::Int(5)]);
    }

    #[test]
    fn unresolved_binds_null_and_reports_by_default() {
        let r = rewrite_statement("WHERE a = @Gone", &(), &RewriteOptions::default()).unwrap();
        assert_eq!(r.statement, "WHERE a = $1");
        assert_eq!(r.params, vec![SqlValue::Null]);
        assert_eq!(r.unbound, vec!["Gone".to_string()]);
    }

    #[test]
    fn unresolved_is_fatal_under_error_policy() {
        let opts = RewriteOptions::default().with_unresolved(UnresolvedPolicy::Error);
        let err = rewrite_statement("WHERE a = @Gone", &(), &opts).unwrap_err();
        assert!(matches!(
            err,
            SqlRebindError::UnresolvedPlaceholder(name) if name == "Gone"
        ));
    }

    #[test]
    fn empty_name_is_unresolvable_not_a_panic() {
        let r = rewrite_statement("VALUES (@)", &(), &RewriteOptions::default()).unwrap();
        assert_eq!(r.statement, "VALUES ($1)");
        assert_eq!(r.unbound, vec![String::new()]);
    }

    #[test]
    fn unicode_names_resolve_and_splice_cleanly() {
        let d = data(&[("すみません", SqlValue::Text("ご".into()))]);
        let r = rewrite_statement(
            "WHERE 挨拶 = @すみません AND x = 'café'",
            &d,
            &RewriteOptions::default(),
        )
        .unwrap();
        assert_eq!(r.statement, "WHERE 挨拶 = $1 AND x = 'café'");
        assert_eq!(r.params, vec![SqlValue::Text("ご".into())]);
    }

    #[test]
    fn token_formatting_is_idempotent() {
        assert_eq!(bindvar_token(Dialect::Postgres, 3), "$3");
        assert_eq!(bindvar_token(Dialect::Postgres, 3), "$3");
        assert_eq!(bindvar_token(Dialect::Generic, 3), "?");
        assert_eq!(bindvar_token(Dialect::Generic, 9), "?");
    }

    #[test]
    fn statement_without_placeholders_passes_through() {
        let r = rewrite_statement("SELECT 1;", &(), &RewriteOptions::default()).unwrap();
        assert_eq!(r.statement, "SELECT 1;");
        assert!(r.params.is_empty());
    }
}
