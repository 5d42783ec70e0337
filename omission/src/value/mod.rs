//! The dynamic value graph that the omission engine walks.
//!
//! Values are either primitives, shared containers ([`Array`], [`Object`]), or
//! [`Opaque`] objects that the engine never opens.
//!
//! ## Identity
//!
//! Container handles are reference counted. Cloning a handle yields the *same*
//! container, which is what [`Value::ptr_eq`] compares. Structural equality is
//! `==`.
//!
//! ## Cycles
//!
//! Containers use interior mutability so that callers can build self-referential
//! graphs:
//!
//! ```rust
//! use omission::{Object, Value};
//!
//! let node = Object::new();
//! node.insert("self", node.clone());
//! let value = Value::Object(node);
//! assert_eq!(format!("{value:?}"), r#"{"self": [Circular]}"#);
//! # if let Value::Object(node) = value { node.clear(); }
//! ```
//!
//! Cyclic graphs keep themselves alive; call [`Object::clear`] or
//! [`Array::clear`] on one member to release them.

mod convert;
mod key;

use std::{
    any::Any,
    cell::RefCell,
    collections::HashSet,
    fmt,
    rc::Rc,
};

use indexmap::IndexMap;

pub use convert::IntoValue;
pub use key::{Atom, Key};

/// Address of a container allocation, used for identity comparisons and memo keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Identity(*const ());

// =============================================================================
// Value
// =============================================================================

/// A dynamic value: primitive, ordered sequence, plain mapping, or opaque object.
#[derive(Clone, Default)]
pub enum Value {
    /// A missing value.
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(Rc<str>),
    /// A symbolic token.
    Atom(Atom),
    /// An ordered sequence.
    Array(Array),
    /// A plain keyed mapping.
    Object(Object),
    /// Any other object. Never traversed.
    Opaque(Opaque),
}

impl Value {
    /// Returns `true` for every variant that is neither a container nor opaque.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_) | Value::Opaque(_))
    }

    /// Reference equality.
    ///
    /// Containers and opaque values are identical when they share an allocation.
    /// Primitives are identical when their values are; numbers compare by bit
    /// pattern, so `NaN` is identical to itself and `0.0` is not identical to
    /// `-0.0`.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Atom(a), Value::Atom(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Opaque(a), Value::Opaque(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Allocation identity of an array or object.
    pub(crate) fn identity(&self) -> Option<Identity> {
        match self {
            Value::Array(array) => Some(array.identity()),
            Value::Object(object) => Some(object.identity()),
            _ => None,
        }
    }

    /// Looks up `key` in an object, or a position in an array.
    ///
    /// Returns `None` for primitives, opaque values and missing entries.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        let key = key.into();
        match self {
            Value::Object(object) => object.get(&key),
            Value::Array(array) => key.as_index().and_then(|index| array.get(index)),
            _ => None,
        }
    }

    /// Follows `path` from this value.
    pub fn pointer(&self, path: &crate::Path) -> Option<Value> {
        path.iter()
            .try_fold(self.clone(), |value, key| value.get(key))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Value::Opaque(opaque) => Some(opaque),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns `true` if this is an object with an own entry named `key`.
    pub fn has_key(&self, key: impl Into<Key>) -> bool {
        self.as_object()
            .is_some_and(|object| object.contains_key(&key.into()))
    }
}

// =============================================================================
// Array
// =============================================================================

/// A shared, mutable ordered sequence.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_vec(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns the element at `index` (a cheap handle clone).
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn push(&self, value: impl IntoValue) {
        let value = value.into_value();
        self.0.borrow_mut().push(value);
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// Returns `None` and leaves the array untouched when `index` is out of bounds.
    pub fn set(&self, index: usize, value: impl IntoValue) -> Option<Value> {
        let value = value.into_value();
        self.0
            .borrow_mut()
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value))
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Returns a snapshot of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Returns `true` if both handles refer to the same array.
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> Identity {
        Identity(Rc::as_ptr(&self.0).cast())
    }

    pub(crate) fn replace_contents(&self, items: Vec<Value>) {
        *self.0.borrow_mut() = items;
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

// =============================================================================
// Object
// =============================================================================

/// A shared, mutable plain mapping that keeps insertion order.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<IndexMap<Key, Value>>>);

impl Object {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an object from entries; later duplicates overwrite earlier values.
    #[must_use]
    pub fn from_entries(entries: Vec<(Key, Value)>) -> Self {
        entries.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, key: &Key) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.0.borrow().contains_key(key)
    }

    /// Inserts an entry, returning the previous value under `key`.
    ///
    /// Re-inserting an existing key keeps its original position.
    pub fn insert(&self, key: impl Into<Key>, value: impl IntoValue) -> Option<Value> {
        let key = key.into();
        let value = value.into_value();
        self.0.borrow_mut().insert(key, value)
    }

    /// Removes an entry, preserving the order of the remaining ones.
    pub fn remove(&self, key: &Key) -> Option<Value> {
        self.0.borrow_mut().shift_remove(key)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn keys(&self) -> Vec<Key> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Returns a snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns `true` if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> Identity {
        Identity(Rc::as_ptr(&self.0).cast())
    }

    pub(crate) fn replace_contents(&self, entries: IndexMap<Key, Value>) {
        *self.0.borrow_mut() = entries;
    }
}

impl<K> FromIterator<(K, Value)> for Object
where
    K: Into<Key>,
{
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self(Rc::new(RefCell::new(entries)))
    }
}

// =============================================================================
// Opaque
// =============================================================================

/// Anything that can sit inside a [`Value::Opaque`].
///
/// Blanket-implemented for every `'static` type with a `Debug` impl.
pub trait OpaqueObject: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

impl<T> OpaqueObject for T
where
    T: Any + fmt::Debug,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A shared handle to an object the omission engine treats as a leaf.
#[derive(Clone)]
pub struct Opaque(Rc<dyn OpaqueObject>);

impl Opaque {
    #[must_use]
    pub fn new<T: OpaqueObject>(object: T) -> Self {
        Self(Rc::new(object))
    }

    /// Wraps an existing shared allocation without copying it.
    #[must_use]
    pub fn from_rc(object: Rc<dyn OpaqueObject>) -> Self {
        Self(object)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        // Deref first: `Rc<dyn OpaqueObject>` is itself an `OpaqueObject`.
        (*self.0).as_any().downcast_ref()
    }

    /// Returns `true` if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        self.identity() == other.identity()
    }

    fn identity(&self) -> Identity {
        Identity(Rc::as_ptr(&self.0).cast())
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

// =============================================================================
// Structural equality
// =============================================================================

/// Deep equality. Object entry order is ignored; opaque values are equal only
/// when identical. `NaN` equals `NaN`, matching [`Value::ptr_eq`]. A pair of containers met again while still being compared is
/// assumed equal, so cyclic graphs compare without looping.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_eq(self, other, &mut HashSet::new())
    }
}

#[allow(clippy::float_cmp)]
fn deep_eq(left: &Value, right: &Value, seen: &mut HashSet<(Identity, Identity)>) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::Opaque(a), Value::Opaque(b)) => a.ptr_eq(b),
        (Value::Array(a), Value::Array(b)) => {
            if a.ptr_eq(b) || !seen.insert((a.identity(), b.identity())) {
                return true;
            }
            let (a, b) = (a.to_vec(), b.to_vec());
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(a, b)| deep_eq(a, b, seen))
        }
        (Value::Object(a), Value::Object(b)) => {
            if a.ptr_eq(b) || !seen.insert((a.identity(), b.identity())) {
                return true;
            }
            a.len() == b.len()
                && a.entries()
                    .iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| deep_eq(value, &other, seen)))
        }
        _ => left.ptr_eq(right),
    }
}

// =============================================================================
// Debug
// =============================================================================

struct DebugValue<'a> {
    value: &'a Value,
    stack: &'a RefCell<Vec<Identity>>,
}

impl DebugValue<'_> {
    fn nested<'b>(&'b self, value: &'b Value) -> DebugValue<'b> {
        DebugValue {
            value,
            stack: self.stack,
        }
    }

    fn enter(&self, identity: Identity) -> bool {
        let mut stack = self.stack.borrow_mut();
        if stack.contains(&identity) {
            return false;
        }
        stack.push(identity);
        true
    }

    fn leave(&self) {
        self.stack.borrow_mut().pop();
    }
}

impl fmt::Debug for DebugValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Number(number) => write!(f, "{number}"),
            Value::String(text) => write!(f, "{text:?}"),
            Value::Atom(atom) => write!(f, "@{}", atom.name()),
            Value::Opaque(opaque) => write!(f, "Opaque({opaque:?})"),
            Value::Array(array) => {
                if !self.enter(array.identity()) {
                    return f.write_str("[Circular]");
                }
                let items = array.to_vec();
                let result = f
                    .debug_list()
                    .entries(items.iter().map(|item| self.nested(item)))
                    .finish();
                self.leave();
                result
            }
            Value::Object(object) => {
                if !self.enter(object.identity()) {
                    return f.write_str("[Circular]");
                }
                let entries = object.entries();
                let result = f
                    .debug_map()
                    .entries(entries.iter().map(|(key, value)| (key, self.nested(value))))
                    .finish();
                self.leave();
                result
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stack = RefCell::new(Vec::new());
        fmt::Debug::fmt(
            &DebugValue {
                value: self,
                stack: &stack,
            },
            f,
        )
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Array(self.clone()), f)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Object(self.clone()), f)
    }
}

#[cfg(test)]
mod tests {
    use super::{Array, Atom, Key, Object, Opaque, Value};
    use crate::value;

    #[test]
    fn cloned_handles_are_identical() {
        let object = Object::new();
        let left = Value::Object(object.clone());
        let right = Value::Object(object);
        assert!(left.ptr_eq(&right));
    }

    #[test]
    fn equal_but_distinct_containers_are_not_identical() {
        let left = value!({ "a": 1 });
        let right = value!({ "a": 1 });
        assert_eq!(left, right);
        assert!(!left.ptr_eq(&right));
    }

    #[test]
    fn primitive_identity_follows_value() {
        assert!(Value::from("a").ptr_eq(&Value::from("a")));
        assert!(Value::Number(f64::NAN).ptr_eq(&Value::Number(f64::NAN)));
        assert!(!Value::Number(0.0).ptr_eq(&Value::Number(-0.0)));
        assert!(!Value::Null.ptr_eq(&Value::Undefined));
        assert!(Value::Atom(Atom::new("s")).ptr_eq(&Value::Atom(Atom::new("s"))));
    }

    #[test]
    fn object_equality_ignores_entry_order() {
        assert_eq!(value!({ "a": 1, "b": 2 }), value!({ "b": 2, "a": 1 }));
        assert_ne!(value!({ "a": 1 }), value!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn nan_leaves_compare_equal() {
        assert_eq!(value!({ "x": (f64::NAN) }), value!({ "x": (f64::NAN) }));
        assert_ne!(value!((f64::NAN)), value!(0.0));
    }

    #[test]
    fn opaque_equality_is_identity() {
        let shared = Opaque::new(5_u8);
        assert_eq!(Value::Opaque(shared.clone()), Value::Opaque(shared));
        assert_ne!(Value::Opaque(Opaque::new(5_u8)), Value::Opaque(Opaque::new(5_u8)));
    }

    #[test]
    fn cyclic_values_compare_without_looping() {
        let left = Object::new();
        left.insert("self", left.clone());
        let right = Object::new();
        right.insert("self", right.clone());
        assert_eq!(Value::Object(left.clone()), Value::Object(right.clone()));
        left.clear();
        right.clear();
    }

    #[test]
    fn debug_marks_cycles() {
        let array = Array::new();
        array.push(1);
        array.push(array.clone());
        assert_eq!(format!("{array:?}"), "[1, [Circular]]");
        array.clear();
    }

    #[test]
    fn debug_prints_shared_non_cyclic_values_twice() {
        let shared = value!({ "x": true });
        let outer = value!([(shared.clone()), (shared)]);
        assert_eq!(format!("{outer:?}"), r#"[{"x": true}, {"x": true}]"#);
    }

    #[test]
    fn get_and_pointer_navigate_containers() {
        let value = value!({ "list": [{ "name": "first" }] });
        assert_eq!(value.get("list").and_then(|list| list.get(0_usize)), Some(value!({ "name": "first" })));
        let found = value.pointer(&crate::path!["list", 0, "name"]);
        assert_eq!(found.as_ref().and_then(Value::as_str), Some("first"));
        assert!(value.pointer(&crate::path!["list", 3]).is_none());
    }

    #[test]
    fn object_insert_keeps_original_position() {
        let object = Object::new();
        object.insert("a", 1);
        object.insert("b", 2);
        object.insert("a", 3);
        assert_eq!(object.keys(), vec![Key::from("a"), Key::from("b")]);
        assert_eq!(object.get(&"a".into()), Some(Value::from(3)));
    }

    #[test]
    fn array_set_out_of_bounds_is_ignored() {
        let array = Array::from_vec(vec![Value::Null]);
        assert!(array.set(4, true).is_none());
        assert_eq!(array.set(0, true), Some(Value::Null));
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn opaque_downcasts_to_original_type() {
        #[derive(Debug)]
        struct Handle(u32);

        let opaque = Opaque::new(Handle(7));
        assert_eq!(opaque.downcast_ref::<Handle>().map(|handle| handle.0), Some(7));
        assert!(opaque.downcast_ref::<String>().is_none());
    }
}
