//! Keep policies: per-path overrides of the omission rule.
//!
//! Policies are pure decisions. They do not traverse values or rebuild
//! containers; the engine asks them about one entry at a time.

use super::path::Path;
use crate::value::Key;

/// The outcome of a keep policy for one entry.
///
/// Returning `None` from [`KeepPolicy::decide`] defers to the default rule,
/// which is the same as [`KeepSignal::Remove`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeepSignal {
    /// Apply the default rule: drop the entry when its key is the target key.
    Remove,
    /// Keep this entry even though its key is the target key.
    ///
    /// The entry's value is still traversed, so nested occurrences of the
    /// target key below it are removed. On other keys this has no effect.
    KeepKey,
    /// Keep the value reached through this entry verbatim, by original
    /// reference, without looking at anything beneath it.
    BreakSubtree,
}

/// Sentinel a policy returns to stop descending into a subtree.
pub const BREAK: KeepSignal = KeepSignal::BreakSubtree;

/// Decides, for one entry of a visited object or array, whether the default
/// omission rule applies.
///
/// `path` already ends with `key`. The engine calls `decide` exactly once per
/// own entry of every object and every element of every array it visits,
/// before descending into the entry. Keys that are not present are never asked
/// about.
///
/// Closures implement this trait directly:
///
/// ```rust
/// use omission::{omit_deep_with, path, value, Key, KeepSignal, Path};
///
/// let input = value!({ "omit": 1, "foo": { "omit": 2 } });
/// let keep_foo = |path: &Path, _key: &Key| {
///     (*path == path!["foo", "omit"]).then_some(KeepSignal::KeepKey)
/// };
/// let output = omit_deep_with(&input, "omit", &keep_foo);
/// assert_eq!(output, value!({ "foo": { "omit": 2 } }));
/// ```
pub trait KeepPolicy {
    /// Returns the override for the entry at `path`, or `None` to defer.
    fn decide(&self, path: &Path, key: &Key) -> Option<KeepSignal>;
}

impl<F> KeepPolicy for F
where
    F: Fn(&Path, &Key) -> Option<KeepSignal>,
{
    fn decide(&self, path: &Path, key: &Key) -> Option<KeepSignal> {
        self(path, key)
    }
}

/// Wraps a closure as a policy, letting the compiler infer its parameter types.
pub fn policy_fn<F>(decide: F) -> F
where
    F: Fn(&Path, &Key) -> Option<KeepSignal>,
{
    decide
}

/// The default policy: never overrides the omission rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct OmitAll;

impl KeepPolicy for OmitAll {
    fn decide(&self, _path: &Path, _key: &Key) -> Option<KeepSignal> {
        None
    }
}

/// A declarative policy that matches exact paths.
///
/// Break paths take precedence over keep paths when both match.
///
/// ```rust
/// use omission::{omit_deep_with, path, value, KeepPaths};
///
/// let policy = KeepPaths::new()
///     .keep_key(path!["omitFirst", 1, "omit"])
///     .break_at(path!["raw"]);
/// let input = value!({
///     "omitFirst": [{ "omit": true }, { "omit": false }],
///     "raw": { "omit": "kept" },
/// });
/// let output = omit_deep_with(&input, "omit", &policy);
/// assert_eq!(output, value!({
///     "omitFirst": [{}, { "omit": false }],
///     "raw": { "omit": "kept" },
/// }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct KeepPaths {
    keep: Vec<Path>,
    breaks: Vec<Path>,
}

impl KeepPaths {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the target key at exactly `path`.
    #[must_use]
    pub fn keep_key(mut self, path: impl Into<Path>) -> Self {
        self.keep.push(path.into());
        self
    }

    /// Keeps the value at exactly `path` verbatim.
    #[must_use]
    pub fn break_at(mut self, path: impl Into<Path>) -> Self {
        self.breaks.push(path.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keep.is_empty() && self.breaks.is_empty()
    }
}

impl KeepPolicy for KeepPaths {
    fn decide(&self, path: &Path, _key: &Key) -> Option<KeepSignal> {
        if self.breaks.contains(path) {
            Some(KeepSignal::BreakSubtree)
        } else if self.keep.contains(path) {
            Some(KeepSignal::KeepKey)
        } else {
            None
        }
    }
}
