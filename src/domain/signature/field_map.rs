//! Ordered field map used as the unit of signing.
//!
//! Insertion order is significant: when a payload carries no explicit
//! `signedFields` list, the default signing order is the order in which
//! fields were inserted.

use serde_json::{Map, Number, Value};

/// Ordered mapping from field name to its string form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Creates an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a field map from a JSON object, keeping the object's key order.
    ///
    /// Values are coerced with [`scalar_to_string`].
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        object
            .iter()
            .map(|(key, value)| (key.clone(), scalar_to_string(value)))
            .collect()
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value for `key`, or the empty string when absent.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Sets `key` to `value`.
    ///
    /// An existing key keeps its position and has its value replaced;
    /// a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`FieldMap::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Coerces a JSON value to the string the processor signs for it.
///
/// Booleans follow the processor's interpolation rules: `true` is `"1"`,
/// `false` and `null` are empty. Nested structures are signed as compact JSON.
///
/// Integers keep their digits. Floats with no fractional part print as
/// integers (`150.00` and `1e2` sign as `"150"` and `"100"`); other floats
/// use their shortest round-trip form.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        Value::Number(n) => number_to_string(n),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // f64's Display is shortest round-trip and drops a zero fraction.
        Some(f) if f.is_finite() => f.to_string(),
        _ => n.to_string(),
    }
}
