//! Root-to-node key sequences.

use std::{fmt, slice};

use crate::value::Key;

/// The sequence of keys and positions leading from the root value to the
/// current traversal position.
///
/// Paths are compared structurally. The root value has the empty path.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<Key>);

impl Path {
    /// The empty path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended by `key`.
    #[must_use]
    pub fn child(&self, key: impl Into<Key>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The final segment, i.e. the key of the current entry.
    pub fn last(&self) -> Option<&Key> {
        self.0.last()
    }

    /// The path of the enclosing container.
    pub fn parent(&self) -> Option<Path> {
        self.0
            .split_last()
            .map(|(_, parent)| Self(parent.to_vec()))
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn iter(&self) -> slice::Iter<'_, Key> {
        self.0.iter()
    }

    pub fn segments(&self) -> &[Key] {
        &self.0
    }

    pub(crate) fn push(&mut self, key: Key) {
        self.0.push(key);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Key>> for Path {
    fn from(segments: Vec<Key>) -> Self {
        Self(segments)
    }
}

impl PartialEq<[Key]> for Path {
    fn eq(&self, other: &[Key]) -> bool {
        self.0.as_slice() == other
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Key;
    type IntoIter = slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

/// Renders as `$` followed by `.name`, `[index]` and `[@atom]` segments.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for key in &self.0 {
            match key {
                Key::Name(name) => write!(f, ".{name}")?,
                Key::Index(index) => write!(f, "[{index}]")?,
                Key::Atom(atom) => write!(f, "[@{}]", atom.name())?,
            }
        }
        Ok(())
    }
}
