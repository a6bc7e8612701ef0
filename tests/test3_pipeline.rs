use std::sync::Arc;

use sql_rebind::prelude::*;

/// Echoes every bound value back as a row of (ordinal, value), so tests can
/// prove that positional execution reproduces the named bindings.
#[derive(Default)]
struct EchoExecutor {
    statements: Vec<String>,
}

impl StatementExecutor for EchoExecutor {
    fn execute(
        &mut self,
        statement: &str,
        params: &[SqlValue],
    ) -> Result<ResultSet, SqlRebindError> {
        self.statements.push(statement.to_string());
        let mut rs = ResultSet::with_capacity(params.len());
        rs.set_column_names(Arc::new(vec!["ordinal".to_string(), "value".to_string()]));
        for (i, value) in params.iter().enumerate() {
            rs.add_row_values(vec![SqlValue::Int(i as i64 + 1), value.clone()]);
        }
        Ok(rs)
    }
}

#[derive(Default, Debug, PartialEq)]
struct Echo {
    ordinal: i64,
    value: SqlValue,
}

sql_rebind::row_target!(Echo {
    ordinal => "ordinal",
    value => "value",
});

struct Search {
    title: String,
    author: String,
}

sql_rebind::bind_source!(Search { title, author });

#[test]
fn positional_execution_reproduces_named_bindings() {
    let search = Search {
        title: "%salem%".into(),
        author: "Stephen King".into(),
    };
    let mut db = EchoExecutor::default();
    let echoes: Vec<Echo> = fetch_all(
        &mut db,
        "SELECT title FROM books WHERE title ILIKE @title AND author = @author AND author != @title;",
        &search,
        &RewriteOptions::default(),
        &PassthroughExpander,
    )
    .unwrap();

    assert_eq!(
        db.statements,
        vec![
            "SELECT title FROM books WHERE title ILIKE $1 AND author = $2 AND author != $3;"
                .to_string()
        ]
    );
    assert_eq!(
        echoes,
        vec![
            Echo { ordinal: 1, value: SqlValue::Text("%salem%".into()) },
            Echo { ordinal: 2, value: SqlValue::Text("Stephen King".into()) },
            Echo { ordinal: 3, value: SqlValue::Text("%salem%".into()) },
        ]
    );
}

#[test]
fn execute_reports_rows_affected() {
    let search = Search {
        title: "Dune".into(),
        author: "Frank Herbert".into(),
    };
    let mut db = EchoExecutor::default();
    let affected = execute(
        &mut db,
        "INSERT INTO books (title, author) VALUES (@title, @author);",
        &search,
        &RewriteOptions::default(),
        &PassthroughExpander,
    )
    .unwrap();
    // The echo executor emits one row per bound value.
    assert_eq!(affected, 2);
}

/// A stand-in for the external conditional-template stage: drops an optional
/// clause when its placeholder has no value.
struct OptionalClauseExpander {
    clause: &'static str,
    guard: &'static str,
}

impl<D: BindSource> TemplateExpander<D> for OptionalClauseExpander {
    fn expand(&self, template: &str, data: &D) -> Result<String, SqlRebindError> {
        let marker = format!("{{{{{}}}}}", self.guard);
        if !template.contains(marker.as_str()) {
            return Err(SqlRebindError::TemplateError(format!(
                "marker {marker} not found"
            )));
        }
        let replacement = if data.lookup(self.guard).is_some() {
            self.clause
        } else {
            ""
        };
        Ok(template.replace(marker.as_str(), replacement))
    }
}

#[test]
fn template_stage_runs_before_the_scan() {
    let expander = OptionalClauseExpander {
        clause: "AND author = @author",
        guard: "author",
    };
    let opts = RewriteOptions::default();

    let with_author = Search {
        title: "It".into(),
        author: "Stephen King".into(),
    };
    let r = materialize(
        "SELECT * FROM books WHERE true {{author}}",
        &with_author,
        &opts,
        &expander,
    )
    .unwrap();
    assert_eq!(r.statement, "SELECT * FROM books WHERE true AND author = $1");
    assert_eq!(r.params, vec![SqlValue::Text("Stephen King".into())]);

    let mut without = std::collections::HashMap::<String, SqlValue>::new();
    without.insert("title".into(), SqlValue::Text("It".into()));
    let r = materialize(
        "SELECT * FROM books WHERE true {{author}}",
        &without,
        &opts,
        &expander,
    )
    .unwrap();
    assert_eq!(r.statement, "SELECT * FROM books WHERE true ");
    assert!(r.params.is_empty());
}

#[test]
fn template_failure_stops_the_pipeline() {
    let expander = OptionalClauseExpander {
        clause: "",
        guard: "missing_marker",
    };
    let err = materialize(
        "SELECT 1;",
        &(),
        &RewriteOptions::default(),
        &expander,
    )
    .unwrap_err();
    assert!(matches!(err, SqlRebindError::TemplateError(_)));
}

#[test]
fn unbound_names_survive_materialization() {
    let data = std::collections::HashMap::<String, SqlValue>::new();
    let r = materialize(
        "SELECT * FROM t WHERE a = @a",
        &data,
        &RewriteOptions::default(),
        &PassthroughExpander,
    )
    .unwrap();
    assert_eq!(r.unbound, vec!["a".to_string()]);
    assert_eq!(r.params, vec![SqlValue::Null]);
}
