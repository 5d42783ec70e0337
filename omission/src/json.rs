//! `serde` and `serde_json` interop for [`Value`].
//!
//! Converting *from* JSON always succeeds. Converting *to* JSON follows the
//! usual JSON encoding of dynamic values:
//!
//! - `Undefined` and `Atom` values are skipped inside objects and become
//!   `null` anywhere else; entries with atom keys are skipped;
//! - non-finite numbers become `null`, integral numbers are written as integers;
//! - shared (non-cyclic) containers are written at every occurrence;
//! - cycles and opaque values are errors carrying the offending [`Path`].

use serde::{ser::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value as JsonValue};

use crate::{
    error::Error,
    omit::Path,
    value::{Identity, IntoValue, Key, Value},
};

impl IntoValue for JsonValue {
    fn into_value(self) -> Value {
        match self {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(flag) => Value::Bool(flag),
            JsonValue::Number(number) => number.as_f64().map_or(Value::Null, Value::Number),
            JsonValue::String(text) => text.into_value(),
            JsonValue::Array(items) => {
                Value::Array(items.into_iter().map(IntoValue::into_value).collect())
            }
            JsonValue::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into_value()))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        json.into_value()
    }
}

impl Value {
    /// Serializes the graph into a `serde_json::Value` tree.
    pub fn to_json(&self) -> Result<JsonValue, Error> {
        JsonWriter::default().write(self)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        JsonValue::deserialize(deserializer).map(Value::from)
    }
}

/// Tracks the current path and the containers on the current branch.
#[derive(Default)]
struct JsonWriter {
    path: Path,
    branch: Vec<Identity>,
}

impl JsonWriter {
    fn write(&mut self, value: &Value) -> Result<JsonValue, Error> {
        let json = match value {
            Value::Undefined | Value::Null | Value::Atom(_) => JsonValue::Null,
            Value::Bool(flag) => JsonValue::Bool(*flag),
            Value::Number(number) => json_number(*number),
            Value::String(text) => JsonValue::String(text.to_string()),
            Value::Opaque(_) => {
                return Err(Error::Opaque {
                    path: self.path.clone(),
                })
            }
            Value::Array(array) => {
                self.enter(array.identity())?;
                let items = array.to_vec();
                let mut written = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    self.path.push(Key::Index(index));
                    written.push(self.write(item)?);
                    self.path.pop();
                }
                self.branch.pop();
                JsonValue::Array(written)
            }
            Value::Object(object) => {
                self.enter(object.identity())?;
                let mut written = Map::new();
                for (key, item) in object.entries() {
                    if matches!(key, Key::Atom(_)) || matches!(item, Value::Undefined | Value::Atom(_))
                    {
                        continue;
                    }
                    self.path.push(key.clone());
                    let json = self.write(&item)?;
                    self.path.pop();
                    written.insert(key.to_string(), json);
                }
                self.branch.pop();
                JsonValue::Object(written)
            }
        };
        Ok(json)
    }

    fn enter(&mut self, identity: Identity) -> Result<(), Error> {
        if self.branch.contains(&identity) {
            return Err(Error::Circular {
                path: self.path.clone(),
            });
        }
        self.branch.push(identity);
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn json_number(number: f64) -> JsonValue {
    // 2^63; the upper bound is exclusive because i64::MAX is not representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if number.fract() == 0.0 && (-LIMIT..LIMIT).contains(&number) {
        JsonValue::from(number as i64)
    } else {
        Number::from_f64(number).map_or(JsonValue::Null, JsonValue::Number)
    }
}
