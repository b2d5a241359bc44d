//! Key/value metadata carried by a logger.
//!
//! A [`LogContext`] is an insertion-ordered map from string keys to JSON values.
//! Overlaying one context onto another keeps every existing key and replaces
//! the values of keys present in both, without moving them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the request correlation id is bound.
pub const REQUEST_ID: &str = "request_id";

/// Ordered contextual metadata attached to every log line a logger emits.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogContext {
    entries: Map<String, Value>,
}

impl LogContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Binds `value` to `key`, returning the previous value.
    ///
    /// Replacing an existing key keeps its position.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder form of [`LogContext::insert`].
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.insert(key, value);
        self
    }

    /// Returns `self` extended with every entry of `other`.
    ///
    /// Entries of `other` win on overlapping keys.
    #[must_use]
    pub fn overlay(mut self, other: &LogContext) -> Self {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
        self
    }

    /// The bound correlation id, if any.
    pub fn request_id(&self) -> Option<&Value> {
        self.get(REQUEST_ID)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.entries.iter()
    }

    pub fn keys(&self) -> serde_json::map::Keys<'_> {
        self.entries.keys()
    }
}

impl From<Map<String, Value>> for LogContext {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}

impl<K, V> Extend<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a LogContext {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn overlay_keeps_existing_keys_and_prefers_newer_values() {
        let base = LogContext::new()
            .with("request_id", "PR-1")
            .with("tenant", "acme");
        let newer = LogContext::new().with("request_id", "PR-2").with("asset_id", "AS-1");

        let merged = base.overlay(&newer);

        assert_eq!(merged.get("request_id"), Some(&json!("PR-2")));
        assert_eq!(merged.get("tenant"), Some(&json!("acme")));
        assert_eq!(merged.get("asset_id"), Some(&json!("AS-1")));
    }

    #[test]
    fn overlay_preserves_position_of_replaced_keys() {
        let base = LogContext::new().with("a", 1).with("b", 2);
        let merged = base.overlay(&LogContext::new().with("a", 3).with("c", 4));

        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn overlay_with_empty_context_is_identity() {
        let base = LogContext::new().with("request_id", "PR-1");
        assert_eq!(base.clone().overlay(&LogContext::new()), base);
    }

    #[test]
    fn collects_from_pairs() {
        let context: LogContext = [("request_id", "PR-1"), ("request_type", "purchase")]
            .into_iter()
            .collect();
        assert_eq!(context.len(), 2);
        assert_eq!(context.request_id(), Some(&json!("PR-1")));
    }

    #[test]
    fn serializes_as_a_plain_object() {
        let context = LogContext::new().with("request_id", "PR-1");
        assert_eq!(
            serde_json::to_value(&context).unwrap(),
            json!({"request_id": "PR-1"})
        );
    }
}
