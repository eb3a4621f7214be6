//! Outgoing capsule response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::nested::{PathSegment, parse_path, set_nested_field};

/// Response payload built during a turn.
///
/// Serializes as the wrapped JSON object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BixbyResponse {
    body: Value,
}

impl Default for BixbyResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl BixbyResponse {
    /// Empty response (`{}`).
    pub fn new() -> Self {
        Self {
            body: Value::Object(Map::new()),
        }
    }

    /// Deep-assign `value` at a dotted path such as `a.b[0]`.
    pub fn set_field(&mut self, path: &str, value: Value) {
        self.set_field_at(&parse_path(path), value);
    }

    pub fn set_field_at(&mut self, path: &[PathSegment], value: Value) {
        set_nested_field(&mut self.body, path, value);
    }

    /// Read the value at a dotted path, if present.
    pub fn get(&self, path: &str) -> Option<&Value> {
        parse_path(path)
            .iter()
            .try_fold(&self.body, |current, segment| match segment {
                PathSegment::Key(key) => current.get(key.as_str()),
                PathSegment::Index(index) => current.get(*index),
            })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn as_value(&self) -> &Value {
        &self.body
    }

    pub fn into_value(self) -> Value {
        self.body
    }
}

impl From<Value> for BixbyResponse {
    fn from(body: Value) -> Self {
        Self { body }
    }
}
