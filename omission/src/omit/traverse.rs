//! The traversal engine: walks a value graph and rebuilds only what changed.

use indexmap::IndexMap;

use super::{
    memo::{Memo, Step},
    path::Path,
    policy::{KeepPolicy, KeepSignal, OmitAll},
};
use crate::value::{Array, IntoValue, Key, Object, Value};

/// Removes every entry named `key` from every object reachable from `value`.
///
/// Arrays are walked element by element. Opaque values and primitives are
/// returned as they are. Any container whose contents did not change is
/// returned by original reference, so `omit_deep(v, k).ptr_eq(v)` holds when
/// `k` does not occur in `v`.
///
/// ```rust
/// use omission::{omit_deep, value};
///
/// let input = value!({ "omit": "a", "keep": "b", "other": "c" });
/// assert_eq!(omit_deep(&input, "omit"), value!({ "keep": "b", "other": "c" }));
/// ```
#[must_use]
pub fn omit_deep(value: &Value, key: impl Into<Key>) -> Value {
    omit_deep_with(value, key, &OmitAll)
}

/// Like [`omit_deep`], consulting `policy` before each entry is processed.
///
/// See [`KeepPolicy`] for when the policy is called and what each
/// [`KeepSignal`] does.
#[must_use]
pub fn omit_deep_with<P>(value: &Value, key: impl Into<Key>, policy: &P) -> Value
where
    P: KeepPolicy + ?Sized,
{
    let target = key.into();
    let mut traversal = Traversal {
        target: &target,
        policy,
        memo: Memo::new(),
        path: Path::root(),
    };
    traversal.run(value)
}

/// State for one top-level call.
struct Traversal<'a, P: ?Sized> {
    target: &'a Key,
    policy: &'a P,
    memo: Memo,
    path: Path,
}

impl<P> Traversal<'_, P>
where
    P: KeepPolicy + ?Sized,
{
    fn run(&mut self, value: &Value) -> Value {
        self.plan(value);
        self.memo.propagate();
        self.build(value)
    }

    /// Asks the policy about `key` with the path extended by it.
    ///
    /// The caller must pop the path once the entry is processed.
    fn enter(&mut self, key: &Key) -> Option<KeepSignal> {
        self.path.push(key.clone());
        self.policy.decide(&self.path, key)
    }

    /// First walk: decides every entry of every container once, on the first
    /// path that reaches it.
    fn plan(&mut self, value: &Value) {
        let (identity, entries, is_object): (_, Vec<(Key, Value)>, bool) = match value {
            Value::Array(array) => (
                array.identity(),
                array
                    .to_vec()
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (Key::Index(index), item))
                    .collect(),
                false,
            ),
            Value::Object(object) => (object.identity(), object.entries(), true),
            _ => return,
        };
        if !self.memo.begin(identity) {
            return;
        }

        let mut steps = Vec::with_capacity(entries.len());
        for (key, child) in entries {
            let signal = self.enter(&key);
            let step = match signal {
                Some(KeepSignal::BreakSubtree) => Step::Keep(key, child),
                _ if is_object && &key == self.target && signal != Some(KeepSignal::KeepKey) => {
                    Step::Drop
                }
                _ => {
                    self.plan(&child);
                    Step::Visit(key, child)
                }
            };
            self.path.pop();
            steps.push(step);
        }
        self.memo.record(identity, steps);
    }

    /// Second walk: rebuilds the containers marked as changed.
    fn build(&mut self, value: &Value) -> Value {
        let Some(identity) = value.identity() else {
            return value.clone();
        };
        if let Some(known) = self.memo.lookup(identity) {
            return known;
        }
        let Some(steps) = self.memo.take_steps(identity) else {
            return value.clone();
        };

        match value {
            Value::Array(_) => {
                let placeholder = Array::new();
                self.memo
                    .reserve(identity, Value::Array(placeholder.clone()));
                let items = steps
                    .into_iter()
                    .filter_map(|step| self.build_step(step))
                    .map(|(_, item)| item)
                    .collect();
                placeholder.replace_contents(items);
                Value::Array(placeholder)
            }
            _ => {
                let placeholder = Object::new();
                self.memo
                    .reserve(identity, Value::Object(placeholder.clone()));
                let entries: IndexMap<Key, Value> = steps
                    .into_iter()
                    .filter_map(|step| self.build_step(step))
                    .collect();
                placeholder.replace_contents(entries);
                Value::Object(placeholder)
            }
        }
    }

    fn build_step(&mut self, step: Step) -> Option<(Key, Value)> {
        match step {
            Step::Drop => None,
            Step::Keep(key, child) => Some((key, child)),
            Step::Visit(key, child) => {
                let next = self.build(&child);
                Some((key, next))
            }
        }
    }
}

// =============================================================================
// Omittable - Convenience .omit_deep() on anything convertible
// =============================================================================

/// Convenience entrypoints for every [`IntoValue`] type.
///
/// The value is converted first, so the result never shares structure with the
/// original Rust data. Use [`omit_deep`] on an existing [`Value`] to keep
/// structural sharing observable.
///
/// ```rust
/// use omission::{value, IntoValue, Omittable};
///
/// #[derive(Debug, IntoValue)]
/// #[omission(opaque)]
/// struct Handle(u32);
///
/// #[derive(IntoValue)]
/// struct Query {
///     #[omission(rename = "__typename")]
///     typename: &'static str,
///     id: u32,
///     handle: Handle,
/// }
///
/// let query = Query { typename: "Query", id: 1, handle: Handle(9) };
/// let output = query.omit_deep("__typename");
/// assert!(!output.has_key("__typename"));
/// assert_eq!(output.get("id"), Some(value!(1)));
/// assert!(output.get("handle").is_some_and(|handle| handle.as_opaque().is_some()));
/// ```
pub trait Omittable: IntoValue + Sized {
    /// Converts `self` and removes `key` at every depth.
    #[must_use]
    fn omit_deep(self, key: impl Into<Key>) -> Value {
        omit_deep(&self.into_value(), key)
    }

    /// Converts `self` and removes `key` at every depth, consulting `policy`.
    #[must_use]
    fn omit_deep_with<P>(self, key: impl Into<Key>, policy: &P) -> Value
    where
        P: KeepPolicy + ?Sized,
    {
        omit_deep_with(&self.into_value(), key, policy)
    }
}

impl<T> Omittable for T where T: IntoValue {}
