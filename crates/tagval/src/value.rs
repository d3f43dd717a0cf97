//! Kind-tagged views of field values.
//!
//! Rules never see concrete Rust types. Each field is exposed through
//! [`Inspect`], which reports a [`FieldValue`] describing the value's kind
//! and a JSON snapshot of the raw value for error diagnostics.

use serde_json::Value as Json;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

/// The view of a field value that rules operate on.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Any string-like value
    Str(&'a str),
    /// Signed integer of any width
    Int(i64),
    /// Unsigned integer of any width
    Uint(u64),
    /// Floating point of any width
    Float(f64),
    Bool(bool),
    /// Sequence with its element count
    Seq(usize),
    /// Map with its entry count
    Map(usize),
    /// Optional value, `None` when absent
    Optional(Option<Box<FieldValue<'a>>>),
    /// A value with no finer structure; only its zero-ness is known
    Opaque { is_zero: bool },
}

impl<'a> FieldValue<'a> {
    /// A short kind name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "string",
            FieldValue::Int(_) => "int",
            FieldValue::Uint(_) => "uint",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::Seq(_) => "sequence",
            FieldValue::Map(_) => "map",
            FieldValue::Optional(_) => "optional",
            FieldValue::Opaque { .. } => "opaque",
        }
    }

    /// Whether this is the zero value of its kind.
    pub fn is_zero(&self) -> bool {
        match self {
            FieldValue::Str(s) => s.is_empty(),
            FieldValue::Int(v) => *v == 0,
            FieldValue::Uint(v) => *v == 0,
            FieldValue::Float(v) => *v == 0.0,
            FieldValue::Bool(b) => !b,
            FieldValue::Seq(len) | FieldValue::Map(len) => *len == 0,
            FieldValue::Optional(inner) => inner.is_none(),
            FieldValue::Opaque { is_zero } => *is_zero,
        }
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Element count for sequences and maps.
    pub fn len(&self) -> Option<usize> {
        match self {
            FieldValue::Seq(len) | FieldValue::Map(len) => Some(*len),
            _ => None,
        }
    }
}

/// Types that can appear as validated fields.
///
/// Implemented for strings, all primitive numbers, `bool`, the standard
/// collections, `Option`, smart pointers, and `serde_json::Value`. Use
/// [`opaque_inspect!`](crate::opaque_inspect) for caller-defined types that
/// should only be checked for zero-ness.
pub trait Inspect {
    /// The kind-tagged view of this value.
    fn field_value(&self) -> FieldValue<'_>;

    /// The raw value as JSON, attached to validation errors.
    fn snapshot(&self) -> Json;
}

impl Inspect for str {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }

    fn snapshot(&self) -> Json {
        Json::String(self.to_owned())
    }
}

impl Inspect for String {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }

    fn snapshot(&self) -> Json {
        Json::String(self.clone())
    }
}

impl Inspect for std::borrow::Cow<'_, str> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }

    fn snapshot(&self) -> Json {
        Json::String(self.to_string())
    }
}

macro_rules! inspect_number {
    ($variant:ident as $wide:ty: $($t:ty),*) => {
        $(
            impl Inspect for $t {
                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::$variant(*self as $wide)
                }

                fn snapshot(&self) -> Json {
                    Json::from(*self)
                }
            }
        )*
    };
}

inspect_number!(Int as i64: i8, i16, i32, i64);
inspect_number!(Uint as u64: u8, u16, u32, u64);

impl Inspect for isize {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Int(*self as i64)
    }

    fn snapshot(&self) -> Json {
        Json::from(*self as i64)
    }
}

impl Inspect for usize {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Uint(*self as u64)
    }

    fn snapshot(&self) -> Json {
        Json::from(*self as u64)
    }
}

impl Inspect for f32 {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(f64::from(*self))
    }

    fn snapshot(&self) -> Json {
        Json::from(f64::from(*self))
    }
}

impl Inspect for f64 {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }

    fn snapshot(&self) -> Json {
        Json::from(*self)
    }
}

impl Inspect for bool {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }

    fn snapshot(&self) -> Json {
        Json::Bool(*self)
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Optional(self.as_ref().map(|v| Box::new(v.field_value())))
    }

    fn snapshot(&self) -> Json {
        self.as_ref().map_or(Json::Null, Inspect::snapshot)
    }
}

macro_rules! inspect_deref {
    ($($ptr:ident),*) => {
        $(
            impl<T: Inspect + ?Sized> Inspect for $ptr<T> {
                fn field_value(&self) -> FieldValue<'_> {
                    (**self).field_value()
                }

                fn snapshot(&self) -> Json {
                    (**self).snapshot()
                }
            }
        )*
    };
}

inspect_deref!(Box, Rc, Arc);

impl<T: Inspect + ?Sized> Inspect for &T {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }

    fn snapshot(&self) -> Json {
        (**self).snapshot()
    }
}

fn snapshot_seq<'a, T: Inspect + 'a>(items: impl Iterator<Item = &'a T>) -> Json {
    Json::Array(items.map(Inspect::snapshot).collect())
}

impl<T: Inspect> Inspect for [T] {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Seq(self.len())
    }

    fn snapshot(&self) -> Json {
        snapshot_seq(self.iter())
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Seq(N)
    }

    fn snapshot(&self) -> Json {
        snapshot_seq(self.iter())
    }
}

macro_rules! inspect_seq {
    ($($coll:ident),*) => {
        $(
            impl<T: Inspect> Inspect for $coll<T> {
                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::Seq(self.len())
                }

                fn snapshot(&self) -> Json {
                    snapshot_seq(self.iter())
                }
            }
        )*
    };
}

inspect_seq!(Vec, VecDeque, BTreeSet);

impl<T: Inspect, S> Inspect for HashSet<T, S> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Seq(self.len())
    }

    fn snapshot(&self) -> Json {
        snapshot_seq(self.iter())
    }
}

fn snapshot_map<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Json
where
    K: Display + 'a,
    V: Inspect + 'a,
{
    Json::Object(
        entries
            .map(|(k, v)| (k.to_string(), v.snapshot()))
            .collect(),
    )
}

impl<K: Display, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Map(self.len())
    }

    fn snapshot(&self) -> Json {
        snapshot_map(self.iter())
    }
}

impl<K: Display, V: Inspect> Inspect for BTreeMap<K, V> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Map(self.len())
    }

    fn snapshot(&self) -> Json {
        snapshot_map(self.iter())
    }
}

impl Inspect for Json {
    fn field_value(&self) -> FieldValue<'_> {
        match self {
            Json::Null => FieldValue::Optional(None),
            Json::Bool(b) => FieldValue::Bool(*b),
            Json::Number(n) => {
                if let Some(v) = n.as_i64() {
                    FieldValue::Int(v)
                } else if let Some(v) = n.as_u64() {
                    FieldValue::Uint(v)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => FieldValue::Str(s),
            Json::Array(items) => FieldValue::Seq(items.len()),
            Json::Object(map) => FieldValue::Map(map.len()),
        }
    }

    fn snapshot(&self) -> Json {
        self.clone()
    }
}

/// Implement [`Inspect`] for caller-defined types as opaque values.
///
/// The type must implement `Default`, `PartialEq` and `serde::Serialize`.
/// A value is zero when it equals `Default::default()`, which is what
/// `required` checks; other rules see it as an opaque kind.
///
/// ```rust,ignore
/// #[derive(Default, PartialEq, Serialize)]
/// pub struct Address { pub city: String }
///
/// tagval::opaque_inspect!(Address);
/// ```
#[macro_export]
macro_rules! opaque_inspect {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::Inspect for $t {
                fn field_value(&self) -> $crate::FieldValue<'_> {
                    $crate::FieldValue::Opaque {
                        is_zero: *self == <$t as ::core::default::Default>::default(),
                    }
                }

                fn snapshot(&self) -> $crate::__private::serde_json::Value {
                    $crate::__private::serde_json::to_value(self)
                        .unwrap_or($crate::__private::serde_json::Value::Null)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_inspect_as_str() {
        assert_eq!("abc".field_value(), FieldValue::Str("abc"));
        assert_eq!(String::from("x").field_value(), FieldValue::Str("x"));
    }

    #[test]
    fn numbers_widen_to_common_representation() {
        assert_eq!((-5i8).field_value(), FieldValue::Int(-5));
        assert_eq!(7u16.field_value(), FieldValue::Uint(7));
        assert_eq!(1.5f32.field_value(), FieldValue::Float(1.5));
        assert_eq!(3usize.field_value(), FieldValue::Uint(3));
    }

    #[test]
    fn collections_report_length() {
        assert_eq!(vec![1i32, 2, 3].field_value(), FieldValue::Seq(3));
        assert_eq!([1u8; 4].field_value(), FieldValue::Seq(4));
        let mut map = HashMap::new();
        map.insert("a", 1i32);
        assert_eq!(map.field_value(), FieldValue::Map(1));
    }

    #[test]
    fn option_wraps_inner_view() {
        let some: Option<String> = Some("hi".into());
        assert_eq!(
            some.field_value(),
            FieldValue::Optional(Some(Box::new(FieldValue::Str("hi"))))
        );
        assert_eq!(None::<i32>.field_value(), FieldValue::Optional(None));
        assert_eq!(None::<i32>.snapshot(), Json::Null);
    }

    #[test]
    fn nested_options_use_the_trait_view() {
        let nested: Option<Option<u8>> = Some(Some(4));
        assert_eq!(
            nested.field_value(),
            FieldValue::Optional(Some(Box::new(FieldValue::Optional(Some(Box::new(
                FieldValue::Uint(4)
            ))))))
        );
        assert_eq!(
            Some(None::<u8>).field_value(),
            FieldValue::Optional(Some(Box::new(FieldValue::Optional(None))))
        );
    }

    #[test]
    fn zero_values() {
        assert!(FieldValue::Str("").is_zero());
        assert!(FieldValue::Float(0.0).is_zero());
        assert!(FieldValue::Bool(false).is_zero());
        assert!(!FieldValue::Seq(1).is_zero());
        assert!(FieldValue::Opaque { is_zero: true }.is_zero());
    }

    #[test]
    fn json_values_map_to_kinds() {
        assert_eq!(json!(null).field_value(), FieldValue::Optional(None));
        assert_eq!(json!(-3).field_value(), FieldValue::Int(-3));
        assert_eq!(json!(u64::MAX).field_value(), FieldValue::Uint(u64::MAX));
        assert_eq!(json!(2.5).field_value(), FieldValue::Float(2.5));
        assert_eq!(json!([1, 2]).field_value(), FieldValue::Seq(2));
        assert_eq!(json!({"a": 1}).field_value(), FieldValue::Map(1));
    }

    #[test]
    fn snapshots_keep_raw_content() {
        assert_eq!(vec!["a", "b"].snapshot(), json!(["a", "b"]));
        let mut map = BTreeMap::new();
        map.insert(1i32, true);
        assert_eq!(map.snapshot(), json!({"1": true}));
    }
}
