//! Mapping writer with explicit zero-value omission
//!
//! Every optional field goes through one of the typed writers below, each
//! of which states its own omission rule. Nothing is emitted implicitly.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A key/value mapping under construction
///
/// Keys come out sorted, whatever order they were written in.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    map: Map<String, Value>,
}

impl Mapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Boolean, omitted when false
    pub fn flag(mut self, key: &str, value: bool) -> Self {
        if value {
            self.map.insert(key.to_string(), Value::Bool(true));
        }
        self
    }

    /// Tri-state boolean, omitted only when unset
    pub fn tristate(mut self, key: &str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.map.insert(key.to_string(), Value::Bool(value));
        }
        self
    }

    /// String, omitted when empty
    pub fn text(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            return self;
        }
        self.required_text(key, value)
    }

    /// String, always emitted
    pub fn required_text(mut self, key: &str, value: &str) -> Self {
        self.map.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Integer, omitted when zero
    pub fn number(mut self, key: &str, value: impl Into<i64>) -> Self {
        let value = value.into();
        if value != 0 {
            self.map.insert(key.to_string(), Value::from(value));
        }
        self
    }

    /// String list, omitted when empty
    pub fn list(self, key: &str, values: &[String]) -> Self {
        if values.is_empty() {
            return self;
        }
        self.required_list(key, values)
    }

    /// String list, always emitted (an empty list stays `[]`)
    pub fn required_list(mut self, key: &str, values: &[String]) -> Self {
        let values = values.iter().cloned().map(Value::String).collect();
        self.map.insert(key.to_string(), Value::Array(values));
        self
    }

    /// String-to-string mapping, omitted when empty
    pub fn strings(mut self, key: &str, values: &BTreeMap<String, String>) -> Self {
        if !values.is_empty() {
            let object = values
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            self.map.insert(key.to_string(), Value::Object(object));
        }
        self
    }

    /// Arbitrary value mapping, omitted when unset or empty
    pub fn values(mut self, key: &str, values: Option<&BTreeMap<String, Value>>) -> Self {
        if let Some(values) = values.filter(|v| !v.is_empty()) {
            let object = values.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            self.map.insert(key.to_string(), Value::Object(object));
        }
        self
    }

    /// JSON object, omitted when empty
    pub fn object(mut self, key: &str, values: &Map<String, Value>) -> Self {
        if !values.is_empty() {
            self.map.insert(key.to_string(), Value::Object(values.clone()));
        }
        self
    }

    /// Already-encoded document, omitted when absent
    pub fn document(mut self, key: &str, value: Option<Value>) -> Self {
        if let Some(value) = value {
            self.map.insert(key.to_string(), value);
        }
        self
    }

    /// Nested record, omitted when absent or when it has no fields
    pub fn nested(mut self, key: &str, value: Option<Mapping>) -> Self {
        if let Some(value) = value.filter(|m| !m.is_empty()) {
            self.map.insert(key.to_string(), value.into_value());
        }
        self
    }

    /// Sequence of records, omitted when empty
    pub fn entries(self, key: &str, values: Vec<Value>) -> Self {
        if values.is_empty() {
            return self;
        }
        self.required_entries(key, values)
    }

    /// Sequence of records, always emitted
    pub fn required_entries(mut self, key: &str, values: Vec<Value>) -> Self {
        self.map.insert(key.to_string(), Value::Array(values));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }
}
