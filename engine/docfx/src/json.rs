//! `serde_json` bridge.
//!
//! A formula is written in JSON as an object with exactly one member whose
//! key is a formula key and whose value is a string:
//!
//! ```text
//! { "total": { "$formula": "super.price * super.qty" } }
//! ```
//!
//! Any other object, including one with a formula key next to other keys,
//! is plain data.

use docfx_ir::{Map, Value};
use serde_json::Value as Json;

/// Largest magnitude written back as a JSON integer (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Object keys that mark a formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaKeys {
    keys: Vec<String>,
}

impl Default for FormulaKeys {
    fn default() -> Self {
        FormulaKeys::new(["$formula", "$$formula"])
    }
}

impl FormulaKeys {
    /// The first key is used when a formula is written back out.
    pub fn new<K: Into<String>>(keys: impl IntoIterator<Item = K>) -> Self {
        FormulaKeys {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn primary(&self) -> &str {
        self.keys.first().map_or("$formula", String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }
}

/// Convert a JSON document, turning formula objects into formulas.
pub fn from_json(json: Json, keys: &FormulaKeys) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        Json::String(s) => Value::String(s),
        Json::Array(items) => Value::Array(items.into_iter().map(|v| from_json(v, keys)).collect()),
        Json::Object(map) => {
            if map.len() == 1 {
                if let Some((key, Json::String(source))) = map.iter().next() {
                    if keys.contains(key) {
                        return Value::Formula(source.clone());
                    }
                }
            }
            Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, from_json(value, keys)))
                    .collect::<Map>(),
            )
        }
    }
}

/// Convert a document back to JSON.
///
/// Non-finite numbers become `null`; integral numbers within ±2^53 become
/// JSON integers. A formula left in the document is written with the
/// primary formula key.
pub fn to_json(value: Value, keys: &FormulaKeys) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(b),
        Value::Number(n) => number_to_json(n),
        Value::String(s) => Json::String(s),
        Value::Array(items) => Json::Array(items.into_iter().map(|v| to_json(v, keys)).collect()),
        Value::Object(map) => Json::Object(
            map.into_iter()
                .map(|(key, value)| (key, to_json(value, keys)))
                .collect(),
        ),
        Value::Formula(source) => {
            let mut map = serde_json::Map::new();
            map.insert(keys.primary().to_string(), Json::String(source));
            Json::Object(map)
        }
    }
}

fn number_to_json(n: f64) -> Json {
    if !n.is_finite() {
        return Json::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Json::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number)
}
