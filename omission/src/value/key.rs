//! Keys of object entries and path segments.

use std::{fmt, rc::Rc};

/// A named symbolic token.
///
/// Atoms follow registry semantics: two atoms created from the same name are
/// equal. They never compare equal to a string with the same text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(Rc<str>);

impl Atom {
    /// Creates (or looks up) the atom named `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Rc::from(name))
    }

    /// Returns the atom's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({})", self.0)
    }
}

/// The key of an object entry, or one segment of a [`crate::Path`].
///
/// Array positions appear in paths as [`Key::Index`]. Objects may use any key
/// variant; `Key::Index(1)` and `Key::Name("1")` are distinct keys.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A string key.
    Name(Rc<str>),
    /// A numeric key or array position.
    Index(usize),
    /// A symbolic key.
    Atom(Atom),
}

impl Key {
    /// Returns the key text when this is a [`Key::Name`].
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) | Key::Atom(_) => None,
        }
    }

    /// Returns the position when this is a [`Key::Index`].
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) | Key::Atom(_) => None,
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{name:?}"),
            Key::Index(index) => write!(f, "{index}"),
            Key::Atom(atom) => write!(f, "@{}", atom.name()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{index}"),
            Key::Atom(atom) => write!(f, "@{}", atom.name()),
        }
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.as_name() == Some(other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.as_name() == Some(*other)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(Rc::from(name))
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::Name(Rc::from(name.as_str()))
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(Rc::from(name))
    }
}

impl From<Rc<str>> for Key {
    fn from(name: Rc<str>) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

/// Non-negative integers are positions; negative ones are plain names.
impl From<i32> for Key {
    fn from(index: i32) -> Self {
        usize::try_from(index).map_or_else(|_| Key::Name(Rc::from(index.to_string())), Key::Index)
    }
}

impl From<Atom> for Key {
    fn from(atom: Atom) -> Self {
        Key::Atom(atom)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{Atom, Key};

    #[test]
    fn atoms_with_same_name_are_equal() {
        assert_eq!(Atom::new("foo"), Atom::new("foo"));
        assert_ne!(Atom::new("foo"), Atom::new("bar"));
    }

    #[test]
    fn atom_key_differs_from_name_key() {
        assert_ne!(Key::from(Atom::new("omit")), Key::from("omit"));
    }

    #[test]
    fn negative_integers_become_names() {
        assert_eq!(Key::from(3), Key::Index(3));
        assert_eq!(Key::from(-1), Key::from("-1"));
    }

    #[test]
    fn index_and_name_keys_are_distinct() {
        assert_ne!(Key::from(1_usize), Key::from("1"));
    }

    #[test]
    fn key_compares_with_str() {
        assert!(Key::from("omit") == "omit");
        assert!(Key::from(0_usize) != "0");
    }

    #[test]
    fn display_renders_each_variant() {
        assert_eq!(Key::from("a").to_string(), "a");
        assert_eq!(Key::from(2_usize).to_string(), "2");
        assert_eq!(Key::from(Atom::new("s")).to_string(), "@s");
    }
}
