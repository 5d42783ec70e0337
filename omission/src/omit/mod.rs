//! Deep key omission: traversal, cycle memo, and keep policies.
//!
//! This module ties the pieces together:
//!
//! - **`path`**: where the engine is (`Path`)
//! - **`policy`**: per-path overrides (`KeepPolicy`, `KeepSignal`, `KeepPaths`)
//! - **`memo`**: identity memo that makes cyclic graphs terminate
//! - **`traverse`**: the engine and entrypoints (`omit_deep`, `Omittable`)
//!
//! The value model lives in `crate::value`.

mod memo;
mod path;
mod policy;
mod traverse;

pub use path::Path;
pub use policy::{policy_fn, KeepPaths, KeepPolicy, KeepSignal, OmitAll, BREAK};
pub use traverse::{omit_deep, omit_deep_with, Omittable};
