//! Deep key omission for dynamic value graphs.
//!
//! Given a [`Value`] (primitives, arrays, plain objects and opaque objects,
//! possibly with reference cycles), [`omit_deep`] returns an equivalent value
//! with every entry named `key` removed at every depth.
//!
//! Key rules:
//! - Only [`Value::Object`] entries are removed; arrays are walked element-wise.
//! - [`Value::Opaque`] objects and primitives are returned unchanged.
//! - Subtrees that did not change are returned by original reference
//!   ([`Value::ptr_eq`]), including the root.
//! - Each container is transformed at most once per call, so cycles terminate
//!   and aliases stay aliases.
//! - A [`KeepPolicy`] can keep the key at chosen paths ([`KeepSignal::KeepKey`])
//!   or freeze whole subtrees ([`BREAK`]).
//!
//! ```rust
//! use omission::{omit_deep_with, path, value, KeepPaths};
//!
//! let input = value!({
//!     "omit": true,
//!     "foo": { "omit": false, "bar": "bar" },
//!     "raw": { "omit": "kept" },
//! });
//! let policy = KeepPaths::new()
//!     .keep_key(path!["foo", "omit"])
//!     .break_at(path!["raw"]);
//! let output = omit_deep_with(&input, "omit", &policy);
//! assert_eq!(output, value!({
//!     "foo": { "omit": false, "bar": "bar" },
//!     "raw": { "omit": "kept" },
//! }));
//! assert!(output.get("raw").is_some_and(|raw| input.get("raw").is_some_and(|orig| raw.ptr_eq(&orig))));
//! ```
//!
//! What this crate does:
//! - defines the dynamic value model and conversions into it ([`IntoValue`])
//! - implements the omission engine and keep policies
//! - provides integrations behind feature flags (`serde`, `slog`)
//!
//! What it does not do:
//! - mutate its input
//! - remove several different keys in one pass
//! - perform I/O or logging on its own
//!
//! The `IntoValue` derive macro lives in `omission-derive` and is re-exported here.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use omission_derive::IntoValue;

#[allow(unused_extern_crates)]
extern crate self as omission;

// Module declarations
mod error;
#[cfg(feature = "serde")]
mod json;
mod macros;
mod omit;
#[cfg(feature = "slog")]
pub mod slog;
mod value;

// Re-exports
pub use error::Error;
pub use omit::{
    omit_deep, omit_deep_with, policy_fn, KeepPaths, KeepPolicy, KeepSignal, OmitAll, Omittable,
    Path, BREAK,
};
pub use value::{Array, Atom, IntoValue, Key, Object, Opaque, OpaqueObject, Value};
