//! Errors for the fallible edges of the crate.
//!
//! The omission transform itself is total. Only serialization of a value graph
//! into a tree-shaped format can fail.

use crate::omit::Path;

/// A value graph that cannot be represented as a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The graph loops back to a container that is still being serialized.
    #[error("circular reference at {path}")]
    Circular { path: Path },
    /// Opaque objects have no serialized form.
    #[error("opaque object at {path} cannot be serialized")]
    Opaque { path: Path },
}

impl Error {
    /// Where in the value graph serialization stopped.
    pub fn path(&self) -> &Path {
        match self {
            Error::Circular { path } | Error::Opaque { path } => path,
        }
    }
}
