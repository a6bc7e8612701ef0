//! Named-parameter SQL rewriting and row-to-struct binding.
//!
//! Write statements with readable `@name` placeholders, bind values from a
//! map, JSON object, or struct, and get back a dialect-correct positional
//! statement plus its ordered argument list. On the way back, scan result
//! rows into structs by declared column names.
//!
//! ```rust
//! use sql_rebind::prelude::*;
//!
//! struct Search {
//!     author: String,
//! }
//! sql_rebind::bind_source!(Search { author });
//!
//! let search = Search { author: "Stephen King".into() };
//! let r = rewrite_statement(
//!     "SELECT title FROM books WHERE author = @author;",
//!     &search,
//!     &RewriteOptions::default(),
//! )?;
//! assert_eq!(r.statement, "SELECT title FROM books WHERE author = $1;");
//! assert_eq!(r.params, vec![SqlValue::Text("Stephen King".into())]);
//! # Ok::<(), sql_rebind::SqlRebindError>(())
//! ```
//!
//! Template expansion and driver execution are collaborator seams
//! ([`pipeline::TemplateExpander`], [`pipeline::StatementExecutor`]); this
//! crate performs no I/O and holds no cross-call state, so rewriting and
//! binding may run concurrently over different statements without
//! coordination.

pub mod binder;
pub mod error;
pub mod pipeline;
pub mod prelude;
pub mod results;
pub mod rewrite;
pub mod source;
pub mod value;

pub use error::SqlRebindError;
