//! Adapters for emitting values through `slog` with a key omitted first.
//!
//! This module connects [`omit_deep`] with `slog` by providing
//! `slog::Value` implementations that serialize value graphs as structured JSON
//! via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is derived from the omitted value, not
//!   from the original.
//! - Avoiding fallible logging APIs: serialization failures (cycles, opaque
//!   objects) are represented as placeholder strings rather than propagated.
//!
//! It does not configure `slog` or decide which key should be omitted.

use serde_json::Value as JsonValue;
use slog::{Key as SlogKey, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    omit::{omit_deep, omit_deep_with, KeepPolicy},
    value::{IntoValue, Key, Value},
};

const SERIALIZE_FAILED: &str = "Failed to serialize omitted value";

/// A `slog::Value` that emits an owned JSON payload.
///
/// The payload is computed eagerly, so logging never touches the original
/// value graph.
pub struct OmittedJson {
    value: JsonValue,
}

impl OmittedJson {
    fn new(value: &Value) -> Self {
        let value = value
            .to_json()
            .unwrap_or_else(|_| JsonValue::String(SERIALIZE_FAILED.to_string()));
        Self { value }
    }

    /// The JSON payload that will be logged.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for OmittedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: SlogKey,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs them with `key` removed.
///
/// ## Example
/// ```ignore
/// use omission::slog::IntoOmittedJson;
///
/// info!(logger, "request"; "variables" => variables.into_omitted_json("__typename"));
/// ```
pub trait IntoOmittedJson: IntoValue + Sized {
    /// Converts `self`, omits `key` at every depth, and wraps the JSON result.
    ///
    /// If the omitted value cannot be serialized, the payload is the JSON string
    /// `"Failed to serialize omitted value"`.
    fn into_omitted_json(self, key: impl Into<Key>) -> OmittedJson {
        OmittedJson::new(&omit_deep(&self.into_value(), key))
    }

    /// Like [`IntoOmittedJson::into_omitted_json`], consulting `policy`.
    fn into_omitted_json_with<P>(self, key: impl Into<Key>, policy: &P) -> OmittedJson
    where
        P: KeepPolicy + ?Sized,
    {
        OmittedJson::new(&omit_deep_with(&self.into_value(), key, policy))
    }
}

impl<T> IntoOmittedJson for T where T: IntoValue {}

/// Logs the value itself, with the same serialization fallback as [`OmittedJson`].
impl SlogValue for Value {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: SlogKey,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        SlogValue::serialize(&OmittedJson::new(self), record, key, serializer)
    }
}
