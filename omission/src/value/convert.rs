//! Conversion of Rust data into [`Value`] graphs.
//!
//! [`IntoValue`] is implemented here for primitives, strings and the common std
//! containers, and generated by `#[derive(IntoValue)]` for your own types.
//!
//! ## Mapping
//!
//! | Rust | Value |
//! |------|-------|
//! | `bool` | `Bool` |
//! | integers, floats | `Number` (as `f64`) |
//! | `String`, `&str`, `char`, `Rc<str>` | `String` |
//! | `()`, `PhantomData<T>` | `Null` |
//! | `Option<T>` | `Null` or the inner value |
//! | `Vec<T>`, slices, arrays, sets | `Array` |
//! | maps with `Into<Key>` keys | `Object` |
//! | `Box<T>` | the inner value |
//!
//! ## External Types
//!
//! Types that should never be opened by the omission engine (handles, clients,
//! timestamps) can be wrapped with [`Opaque::new`], or marked
//! `#[omission(opaque)]` when they appear as fields of a derived type.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    marker::PhantomData,
    rc::Rc,
};

use super::{Array, Atom, Key, Object, Opaque, Value};

// =============================================================================
// IntoValue - Types that can become a Value
// =============================================================================

/// Conversion into a [`Value`].
///
/// Derive it with `#[derive(IntoValue)]`:
///
/// ```rust
/// use omission::{IntoValue, Value};
///
/// #[derive(IntoValue)]
/// struct Login {
///     user: String,
///     password: String,
/// }
///
/// let value = Login { user: "ada".into(), password: "hunter2".into() }.into_value();
/// assert_eq!(value.get("user").as_ref().and_then(Value::as_str), Some("ada"));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be converted into an omission `Value`",
    label = "this type does not implement `IntoValue`",
    note = "use `#[derive(IntoValue)]` on the type definition",
    note = "or mark the field `#[omission(opaque)]` to keep it as an unopened leaf"
)]
pub trait IntoValue {
    /// Converts `self` into a value graph.
    #[must_use]
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for Array {
    fn into_value(self) -> Value {
        Value::Array(self)
    }
}

impl IntoValue for Object {
    fn into_value(self) -> Value {
        Value::Object(self)
    }
}

impl IntoValue for Opaque {
    fn into_value(self) -> Value {
        Value::Opaque(self)
    }
}

impl IntoValue for Atom {
    fn into_value(self) -> Value {
        Value::Atom(self)
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}

impl<T: ?Sized> IntoValue for PhantomData<T> {
    fn into_value(self) -> Value {
        Value::Null
    }
}

macro_rules! impl_into_value_lossless_number {
    ($($ty:ty),*) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::Number(f64::from(self))
                }
            }
        )*
    };
}

impl_into_value_lossless_number!(i8, i16, i32, u8, u16, u32, f32, f64);

// Values beyond 2^53 lose precision, as with any f64-backed number.
macro_rules! impl_into_value_wide_number {
    ($($ty:ty),*) => {
        $(
            impl IntoValue for $ty {
                #[allow(clippy::cast_precision_loss)]
                fn into_value(self) -> Value {
                    Value::Number(self as f64)
                }
            }
        )*
    };
}

impl_into_value_wide_number!(i64, i128, isize, u64, u128, usize);

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::String(Rc::from(self))
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(Rc::from(self))
    }
}

impl IntoValue for &String {
    fn into_value(self) -> Value {
        Value::String(Rc::from(self.as_str()))
    }
}

impl IntoValue for Rc<str> {
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoValue for char {
    fn into_value(self) -> Value {
        Value::String(Rc::from(self.to_string()))
    }
}

impl<T> IntoValue for Option<T>
where
    T: IntoValue,
{
    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T> IntoValue for Box<T>
where
    T: IntoValue,
{
    fn into_value(self) -> Value {
        (*self).into_value()
    }
}

impl<T> IntoValue for Vec<T>
where
    T: IntoValue,
{
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T, const N: usize> IntoValue for [T; N]
where
    T: IntoValue,
{
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T> IntoValue for &[T]
where
    T: IntoValue + Clone,
{
    fn into_value(self) -> Value {
        Value::Array(self.iter().cloned().map(IntoValue::into_value).collect())
    }
}

impl<T, S> IntoValue for HashSet<T, S>
where
    T: IntoValue,
{
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T> IntoValue for BTreeSet<T>
where
    T: IntoValue,
{
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<K, V, S> IntoValue for HashMap<K, V, S>
where
    K: Into<Key>,
    V: IntoValue,
{
    fn into_value(self) -> Value {
        Value::Object(
            self.into_iter()
                .map(|(key, value)| (key, value.into_value()))
                .collect(),
        )
    }
}

impl<K, V> IntoValue for BTreeMap<K, V>
where
    K: Into<Key>,
    V: IntoValue,
{
    fn into_value(self) -> Value {
        Value::Object(
            self.into_iter()
                .map(|(key, value)| (key, value.into_value()))
                .collect(),
        )
    }
}

// =============================================================================
// From impls, so `Value::from(x)` works for the common leaf types
// =============================================================================

macro_rules! impl_from_via_into_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    IntoValue::into_value(value)
                }
            }
        )*
    };
}

impl_from_via_into_value!(
    bool, i32, i64, u32, u64, usize, f32, f64, String, Rc<str>, Atom, Array, Object, Opaque
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        IntoValue::into_value(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::from_vec(items))
    }
}
