//! Bind sources: where placeholder values come from.
//!
//! A [`BindSource`] is anything that can answer "what value goes in the slot
//! named `x`?". Maps answer by key, JSON objects by member, and structs by a
//! field table declared with [`bind_source!`](crate::bind_source). A miss is
//! not an error here; the rewriter decides what an unresolved placeholder
//! means.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::value::SqlValue;

/// A named lookup over an application data object.
///
/// Resolution is by exact, case-sensitive name match. Implementations are
/// pure reads; `None` means "no value", never "NULL" (bind NULL explicitly
/// with [`SqlValue::Null`]).
pub trait BindSource {
    /// Look up the value bound to `name`.
    fn lookup(&self, name: &str) -> Option<SqlValue>;
}

/// One level of reference indirection resolves like the referent itself.
impl<T: BindSource + ?Sized> BindSource for &T {
    fn lookup(&self, name: &str) -> Option<SqlValue> {
        (**self).lookup(name)
    }
}

/// The empty source: every lookup misses. Useful for statements with no
/// placeholders.
impl BindSource for () {
    fn lookup(&self, _name: &str) -> Option<SqlValue> {
        None
    }
}

impl<V: Clone + Into<SqlValue>> BindSource for HashMap<String, V> {
    fn lookup(&self, name: &str) -> Option<SqlValue> {
        self.get(name).map(|v| v.clone().into())
    }
}

impl<V: Clone + Into<SqlValue>> BindSource for BTreeMap<String, V> {
    fn lookup(&self, name: &str) -> Option<SqlValue> {
        self.get(name).map(|v| v.clone().into())
    }
}

impl BindSource for JsonMap<String, JsonValue> {
    fn lookup(&self, name: &str) -> Option<SqlValue> {
        self.get(name).map(|v| v.clone().into())
    }
}

/// A JSON object resolves by member name; any other JSON shape (scalar,
/// array) resolves nothing.
impl BindSource for JsonValue {
    fn lookup(&self, name: &str) -> Option<SqlValue> {
        match self {
            JsonValue::Object(map) => map.lookup(name),
            _ => None,
        }
    }
}

/// Declares the name-to-field table that makes a struct usable as a
/// [`BindSource`].
///
/// Placeholder names match the listed field names exactly and
/// case-sensitively; fields not listed are not bindable. Field types need an
/// `Into<SqlValue>` conversion (via `Clone`).
///
/// ```rust
/// use sql_rebind::bind_source;
///
/// struct Book {
///     title: String,
///     author: i64,
/// }
///
/// bind_source!(Book { title, author });
/// ```
#[macro_export]
macro_rules! bind_source {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::source::BindSource for $ty {
            fn lookup(&self, name: &str) -> Option<$crate::value::SqlValue> {
                match name {
                    $(
                        stringify!($field) => {
                            Some($crate::value::SqlValue::from(self.$field.clone()))
                        }
                    )+
                    _ => None,
                }
            }
        }
    };
}
