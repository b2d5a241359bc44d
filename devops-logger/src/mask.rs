//! Key-based masking of nested JSON payloads.
//!
//! Masking walks objects and arrays and replaces the value of every object
//! entry whose key is sensitive with a run of mask characters. The run is as
//! long as the value's string form, so the output keeps a hint of the original
//! size without revealing it.
//!
//! Only object keys trigger masking. Array elements are walked but never
//! matched, and scalars outside a sensitive entry are returned unchanged.

use std::collections::HashSet;

use serde_json::{Map, Value};

/// Character used for masking unless configured otherwise.
pub const MASK_CHAR: char = '*';

/// Containers nested deeper than this are masked wholesale.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// The set of object keys whose values must be masked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SensitiveKeys {
    keys: HashSet<String>,
}

impl SensitiveKeys {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>>(&mut self, key: K) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Into<String>> FromIterator<K> for SensitiveKeys {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut keys = Self::new();
        keys.extend(iter);
        keys
    }
}

impl<K: Into<String>> Extend<K> for SensitiveKeys {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

/// Returns the length of the string form of `value`, in Unicode scalar values.
///
/// Strings count their characters; everything else counts its compact JSON
/// rendering (`null` is 4, `false` is 5, `{"a":1}` is 7).
pub fn stringified_len(value: &Value) -> usize {
    match value {
        Value::String(text) => text.chars().count(),
        other => rendered_len(other),
    }
}

/// Length of the compact JSON rendering of `value`.
///
/// Walks containers with an explicit stack, so arbitrarily deep input costs
/// heap, not call stack.
fn rendered_len(value: &Value) -> usize {
    let mut total = 0;
    let mut pending = vec![value];
    while let Some(node) = pending.pop() {
        match node {
            Value::Array(items) => {
                total += 2 + items.len().saturating_sub(1);
                pending.extend(items);
            }
            Value::Object(fields) => {
                total += 2 + fields.len().saturating_sub(1);
                for (key, value) in fields {
                    // quoted key and the colon
                    total += scalar_len(&Value::String(key.clone())) + 1;
                    pending.push(value);
                }
            }
            scalar => total += scalar_len(scalar),
        }
    }
    total
}

fn scalar_len(scalar: &Value) -> usize {
    scalar.to_string().chars().count()
}

/// Configurable masking pass.
///
/// ```rust
/// use devops_logger::Masker;
/// use serde_json::json;
///
/// let masker = Masker::new(["password"]).with_mask_char('#');
/// let masked = masker.mask(&json!({"user": "alice", "password": "hunter2"}));
///
/// assert_eq!(masked, json!({"user": "alice", "password": "#######"}));
/// ```
#[derive(Clone, Debug)]
pub struct Masker {
    keys: SensitiveKeys,
    mask_char: char,
    max_depth: usize,
}

impl Masker {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().collect(),
            mask_char: MASK_CHAR,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Sets how many levels of objects and arrays are walked.
    ///
    /// A container found below the limit is replaced by a mask of its
    /// stringified length instead of being walked.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn keys(&self) -> &SensitiveKeys {
        &self.keys
    }

    pub fn mask_char(&self) -> char {
        self.mask_char
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns a masked copy of `data`. The input is not modified.
    #[must_use]
    pub fn mask(&self, data: &Value) -> Value {
        self.mask_at(data, 0)
    }

    /// Replaces `value` with a run of mask characters of its stringified length.
    pub fn redact(&self, value: &Value) -> String {
        std::iter::repeat(self.mask_char)
            .take(stringified_len(value))
            .collect()
    }

    fn mask_at(&self, data: &Value, depth: usize) -> Value {
        match data {
            Value::Object(_) | Value::Array(_) if depth >= self.max_depth => {
                Value::String(self.redact(data))
            }
            Value::Object(fields) => Value::Object(self.mask_fields(fields, depth + 1)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.mask_at(item, depth + 1))
                    .collect(),
            ),
            leaf => leaf.clone(),
        }
    }

    fn mask_fields(&self, fields: &Map<String, Value>, depth: usize) -> Map<String, Value> {
        fields
            .iter()
            .map(|(key, value)| {
                let masked = if self.keys.contains(key) {
                    Value::String(self.redact(value))
                } else {
                    self.mask_at(value, depth)
                };
                (key.clone(), masked)
            })
            .collect()
    }
}

/// Masks the values of `keys` anywhere in `data` using `*`.
///
/// ```rust
/// use devops_logger::mask;
/// use serde_json::json;
///
/// let masked = mask(&json!({"token": "abc", "items": [{"token": 12}]}), ["token"]);
/// assert_eq!(masked, json!({"token": "***", "items": [{"token": "**"}]}));
/// ```
#[must_use]
pub fn mask<I, K>(data: &Value, keys: I) -> Value
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    Masker::new(keys).mask(data)
}
