//! Binding context values.
//!
//! A [`Context`] is an ordered mapping from tag names to [`Value`]s. Entries are
//! substituted in insertion order, so the order of a context is observable.

use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Ordered mapping from tag name to value.
pub type Context = IndexMap<String, Value>;

/// Text produced lazily at substitution time.
pub type DeferredFn = Arc<dyn Fn() -> String + Send + Sync>;

/// A value bound to a tag name.
#[derive(Clone)]
pub enum Value {
    /// Text or number, rendered as text
    Scalar(String),
    /// Controls inclusion of `{{#name}}` or `{{^name}}` sections
    Boolean(bool),
    /// Drives iteration over a `{{#name}}` section
    List(Vec<Value>),
    /// Nested context for a single, non-iterated section render
    Map(Context),
    /// Invoked once per tag form it feeds; results are not memoized
    DeferredText(DeferredFn),
    /// Unsupported value; tags bound to it are left untouched
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wraps a closure as a [`Value::DeferredText`].
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Value::DeferredText(Arc::new(f))
    }

    /// Wraps an arbitrary value as a [`Value::Opaque`].
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(Arc::new(value))
    }

    /// Short name of the variant, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Boolean(_) => "boolean",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::DeferredText(_) => "deferred",
            Value::Opaque(_) => "opaque",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::DeferredText(_) => f.write_str("DeferredText(..)"),
            Value::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! scalar_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Scalar(n.to_string())
                }
            }
        )*
    };
}

scalar_from_number!(i32, i64, u32, u64, usize, f32, f64);

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Context> for Value {
    fn from(map: Context) -> Self {
        Value::Map(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Scalar(String::new()),
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => Value::Scalar(n.to_string()),
            serde_json::Value::String(s) => Value::Scalar(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
