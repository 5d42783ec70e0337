//! Literal builders for values and paths.

/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object keys must be literals (or parenthesized expressions convertible into
/// [`Key`](crate::Key)). Any [`IntoValue`](crate::IntoValue) expression can
/// appear in value position; anything longer than a single token, such as a
/// negative number or a method call, needs parentheses.
///
/// ```rust
/// use omission::value;
///
/// let shared = value!({ "id": 1 });
/// let value = value!({
///     "omit": "a",
///     "list": [true, null, undefined, (-1)],
///     "shared": (shared.clone()),
/// });
/// assert!(value.get("shared").is_some_and(|inner| inner.ptr_eq(&shared)));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };
    (undefined) => {
        $crate::Value::Undefined
    };
    ([ $($item:tt),* $(,)? ]) => {
        $crate::Value::Array(
            $crate::Array::from_vec(::std::vec![ $( $crate::value!($item) ),* ])
        )
    };
    ({ $($key:tt : $item:tt),* $(,)? }) => {
        $crate::Value::Object($crate::Object::from_entries(::std::vec![
            $( ($crate::Key::from($key), $crate::value!($item)) ),*
        ]))
    };
    ($other:expr) => {
        $crate::IntoValue::into_value($other)
    };
}

/// Builds a [`Path`](crate::Path) from key literals.
///
/// ```rust
/// use omission::{path, Key};
///
/// let path = path!["omitFirst", 1, "omit"];
/// assert_eq!(path.last(), Some(&Key::from("omit")));
/// assert_eq!(path.to_string(), "$.omitFirst[1].omit");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($segment:expr),+ $(,)?) => {
        <$crate::Path as ::std::iter::FromIterator<$crate::Key>>::from_iter([
            $( $crate::Key::from($segment) ),+
        ])
    };
}
