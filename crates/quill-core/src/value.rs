//! Dynamic argument values.
//!
//! Formatting arguments are loosely typed: the same argument can be printed
//! as a string, parsed as a number, or serialized as JSON depending on the
//! directive that consumes it. [`Value`] models that argument space and
//! provides the coercions the directives rely on.
//!
//! # Overview
//!
//! - [`Value`] - a null, boolean, number, string, array, object or lazy value
//! - [`Lazy`] - a deferred computation evaluated when a directive consumes it
//! - [`Map`] - insertion-ordered object storage
//!
//! # Example
//!
//! ```
//! use quill_core::value::Value;
//!
//! let point = Value::object([("x", Value::from(1)), ("y", Value::from(2.5))]);
//! assert_eq!(point.type_name(), "object");
//! assert_eq!(Value::from("12").to_number(), 12.0);
//! assert_eq!(Value::from(vec![1, 2]).to_text(), "1,2");
//! ```

use std::{borrow::Cow, fmt, sync::Arc};

use indexmap::IndexMap;
use serde::{
    Serialize, Serializer,
    ser::{Error as _, SerializeMap, SerializeSeq},
};
use serde_json::value::RawValue;

use crate::{number, template::Accessor};

/// Insertion-ordered map used for object values.
pub type Map = IndexMap<String, Value>;

/// A deferred argument value.
///
/// Lazy values are evaluated once each time a directive consumes them,
/// except for the `t`, `T` and `v` directives which inspect the lazy value
/// itself.
///
/// # Example
///
/// ```
/// use quill_core::value::{Lazy, Value};
///
/// let lazy = Lazy::new(|| Value::from("computed"));
/// assert_eq!(lazy.evaluate(), Value::from("computed"));
/// ```
#[derive(Clone)]
pub struct Lazy(Arc<dyn Fn() -> Value + Send + Sync>);

impl Lazy {
    /// Wrap a computation.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(compute))
    }

    /// Run the computation.
    pub fn evaluate(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lazy(..)")
    }
}

impl PartialEq for Lazy {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A formatting argument.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A double precision number.
    Number(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    Array(Vec<Value>),
    /// String keys mapped to values, in insertion order.
    Object(Map),
    /// A deferred value.
    Lazy(Lazy),
}

impl Value {
    /// Build an object value from key/value pairs.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a lazy value from a computation.
    pub fn lazy<F>(compute: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Lazy(Lazy::new(compute))
    }

    /// Returns `true` for numbers.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns `true` for lazy values.
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    /// Evaluate a lazy value, or clone any other value.
    pub fn evaluated(&self) -> Value {
        match self {
            Self::Lazy(lazy) => lazy.evaluate(),
            other => other.clone(),
        }
    }

    /// Lower-case name of the value's dynamic type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Lazy(_) => "function",
        }
    }

    /// Truthiness: `null`, `false`, `0`, `NaN` and `""` are false, everything
    /// else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Lazy(_) => true,
        }
    }

    /// Numeric coercion.
    ///
    /// Strings are parsed whole with [`number::string_to_number`]; arrays
    /// coerce through their text form, so `[]` is `0`, `[5]` is `5` and
    /// longer arrays are NaN. Objects and lazy values are NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => number::string_to_number(s),
            Self::Array(_) => number::string_to_number(&self.to_text()),
            Self::Object(_) | Self::Lazy(_) => f64::NAN,
        }
    }

    /// Returns `true` if this value is a number or coerces to one.
    pub fn is_numeric(&self) -> bool {
        self.is_number() || !self.to_number().is_nan()
    }

    /// String coercion.
    ///
    /// Arrays join their elements with commas (null elements render empty),
    /// objects render as `[object Object]` and lazy values as `[function]`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => number::number_to_string(*n),
            Self::String(s) => s.clone(),
            Self::Array(items) => items
                .iter()
                .map(|item| match item {
                    Self::Null => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Self::Object(_) => "[object Object]".to_string(),
            Self::Lazy(_) => "[function]".to_string(),
        }
    }

    /// Look up one step of a key path.
    ///
    /// Objects answer key accessors and index accessors (by the decimal
    /// text of the index); arrays answer index accessors. Strings answer
    /// index accessors with the character at that position, which is the
    /// only owned result. Every other combination has no such property.
    pub fn get(&self, accessor: &Accessor) -> Option<Cow<'_, Value>> {
        match (self, accessor) {
            (Self::Object(map), Accessor::Key(key)) => map.get(key).map(Cow::Borrowed),
            (Self::Object(map), Accessor::Index(index)) => {
                map.get(&index.to_string()).map(Cow::Borrowed)
            }
            (Self::Array(items), Accessor::Index(index)) => items.get(*index).map(Cow::Borrowed),
            (Self::String(s), Accessor::Index(index)) => s
                .chars()
                .nth(*index)
                .map(|c| Cow::Owned(Self::String(c.to_string()))),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// Serializes like `JSON.stringify`: non-finite numbers and lazy values
/// become `null`, and lazy object members are omitted.
///
/// Finite numbers are written as raw JSON tokens holding their
/// [`number_to_string`](number::number_to_string) text, so `%j` and `%s`
/// print a number the same way.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null | Self::Lazy(_) => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            Self::Number(n) => RawValue::from_string(number::number_to_string(*n))
                .map_err(S::Error::custom)?
                .serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let members = map.iter().filter(|(_, value)| !value.is_lazy());
                let mut out = serializer.serialize_map(Some(members.clone().count()))?;
                for (key, value) in members {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Object(map)
    }
}

impl From<Lazy> for Value {
    fn from(lazy: Lazy) -> Self {
        Self::Lazy(lazy)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Array(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(true).type_name(), "boolean");
        assert_eq!(Value::from(1).type_name(), "number");
        assert_eq!(Value::from("a").type_name(), "string");
        assert_eq!(Value::from(vec![1]).type_name(), "array");
        assert_eq!(Value::object([("a", 1)]).type_name(), "object");
        assert_eq!(Value::lazy(|| Value::Null).type_name(), "function");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("false").is_truthy());
        assert!(Value::from(Vec::<Value>::new()).is_truthy());
        assert!(Value::object(Vec::<(String, Value)>::new()).is_truthy());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::from(true).to_number(), 1.0);
        assert_eq!(Value::from(" 42 ").to_number(), 42.0);
        assert_eq!(Value::from(Vec::<Value>::new()).to_number(), 0.0);
        assert_eq!(Value::from(vec![5]).to_number(), 5.0);
        assert!(Value::from(vec![1, 2]).to_number().is_nan());
        assert!(Value::object([("a", 1)]).to_number().is_nan());
        assert!(Value::from("12px").to_number().is_nan());
    }

    #[test]
    fn test_is_numeric() {
        assert!(Value::from(f64::NAN).is_numeric());
        assert!(Value::from("-3.5").is_numeric());
        assert!(Value::from(false).is_numeric());
        assert!(!Value::from("three").is_numeric());
        assert!(!Value::lazy(|| Value::from(1)).is_numeric());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Null.to_text(), "null");
        assert_eq!(Value::from(false).to_text(), "false");
        assert_eq!(Value::from(2.5).to_text(), "2.5");
        assert_eq!(
            Value::from(vec![Value::from(1), Value::Null, Value::from("x")]).to_text(),
            "1,,x"
        );
        assert_eq!(Value::object([("a", 1)]).to_text(), "[object Object]");
        assert_eq!(Value::lazy(|| Value::Null).to_text(), "[function]");
    }

    #[test]
    fn test_get_accessors() {
        let value = Value::object([
            ("name", Value::from("quill")),
            ("tags", Value::from(vec!["a", "b"])),
            ("0", Value::from("zero")),
        ]);

        assert_eq!(
            value.get(&Accessor::Key("name".to_string())).as_deref(),
            Some(&Value::from("quill"))
        );
        assert_eq!(
            value.get(&Accessor::Index(0)).as_deref(),
            Some(&Value::from("zero"))
        );
        assert!(value.get(&Accessor::Key("missing".to_string())).is_none());

        let tags = value.get(&Accessor::Key("tags".to_string())).unwrap();
        assert!(matches!(tags, Cow::Borrowed(_)));
        assert_eq!(tags.get(&Accessor::Index(1)).as_deref(), Some(&Value::from("b")));
        assert!(tags.get(&Accessor::Index(2)).is_none());
        assert!(tags.get(&Accessor::Key("length".to_string())).is_none());
        assert!(Value::Null.get(&Accessor::Index(0)).is_none());
    }

    #[test]
    fn test_get_string_index() {
        let name = Value::from("héllo");

        assert_eq!(name.get(&Accessor::Index(0)).as_deref(), Some(&Value::from("h")));
        assert_eq!(name.get(&Accessor::Index(1)).as_deref(), Some(&Value::from("é")));
        assert!(name.get(&Accessor::Index(5)).is_none());
        assert!(name.get(&Accessor::Key("length".to_string())).is_none());
    }

    #[test]
    fn test_lazy_evaluation() {
        let value = Value::lazy(|| Value::from(7));
        assert_eq!(value.evaluated(), Value::from(7));
        assert_eq!(Value::from(3).evaluated(), Value::from(3));
    }

    #[test]
    fn test_serialize_like_json_stringify() {
        let value = Value::object([
            ("int", Value::from(3)),
            ("float", Value::from(1.5)),
            ("nan", Value::from(f64::NAN)),
            ("skipped", Value::lazy(|| Value::Null)),
            ("list", Value::from(vec![Value::lazy(|| Value::Null), Value::from(true)])),
        ]);

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(
            json,
            r#"{"int":3,"float":1.5,"nan":null,"list":[null,true]}"#
        );
    }

    #[test]
    fn test_serialize_number_text() {
        let cases = [
            (0.000001, "0.000001"),
            (1e-7, "1e-7"),
            (2f64.powi(60), "1152921504606846976"),
            (1e21, "1e+21"),
            (-0.0, "0"),
            (-2.5, "-2.5"),
        ];
        for (number, expected) in cases {
            assert_eq!(
                serde_json::to_string(&Value::from(number)).unwrap(),
                expected,
                "{number:?}"
            );
        }

        let list = Value::from(vec![
            Value::from(0.5),
            Value::from(1e-7),
            Value::from(f64::INFINITY),
        ]);
        assert_eq!(serde_json::to_string(&list).unwrap(), "[0.5,1e-7,null]");
    }

    #[test]
    fn test_from_serde_json_preserves_order() {
        let json: serde_json::Value = serde_json::from_str(r#"{"b":1,"a":[true,null]}"#).unwrap();
        let value = Value::from(json);

        let Value::Object(map) = &value else {
            panic!("expected object, got {value:?}");
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(
            map["a"],
            Value::from(vec![Value::from(true), Value::Null])
        );
    }
}
