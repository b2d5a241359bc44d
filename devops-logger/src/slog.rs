//! Adapters for emitting through `slog`.
//!
//! This module connects the crate to `slog` in two directions:
//! - `slog::Logger` implements [`LogSink`], so a [`crate::ContextualLogger`] can
//!   write through any drain. Bound context entries become structured key/value
//!   pairs on the record.
//! - [`MaskedJson`] is a `slog::Value` carrying a masked payload, emitted as
//!   nested JSON via `slog`'s nested-value support.
//!
//! It does not configure `slog` or its drains.

use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue, KV};

use crate::{context::LogContext, level::Level, logger::LogSink, mask::Masker};

/// Serializes a [`LogContext`] as top-level key/value pairs.
struct ContextKv<'a>(&'a LogContext);

impl KV for ContextKv<'_> {
    fn serialize(&self, record: &Record<'_>, serializer: &mut dyn Serializer) -> SlogResult {
        for (key, value) in self.0 {
            let key = Key::from(key.clone());
            match value {
                JsonValue::Null => serializer.emit_none(key)?,
                JsonValue::Bool(flag) => serializer.emit_bool(key, *flag)?,
                JsonValue::String(text) => serializer.emit_str(key, text)?,
                JsonValue::Number(number) => {
                    if let Some(int) = number.as_i64() {
                        serializer.emit_i64(key, int)?;
                    } else if let Some(uint) = number.as_u64() {
                        serializer.emit_u64(key, uint)?;
                    } else if let Some(float) = number.as_f64() {
                        serializer.emit_f64(key, float)?;
                    }
                }
                nested => {
                    let nested = slog::Serde(nested.clone());
                    SlogValue::serialize(&nested, record, key, serializer)?;
                }
            }
        }
        Ok(())
    }
}

impl LogSink for slog::Logger {
    fn emit(&self, level: Level, message: &str, context: &LogContext) {
        let kv = ContextKv(context);
        match level {
            Level::Critical => slog::crit!(self, "{}", message; kv),
            Level::Error => slog::error!(self, "{}", message; kv),
            Level::Warning => slog::warn!(self, "{}", message; kv),
            Level::Info => slog::info!(self, "{}", message; kv),
            Level::Debug => slog::debug!(self, "{}", message; kv),
            Level::Trace => slog::trace!(self, "{}", message; kv),
        }
    }
}

/// A `slog::Value` that emits a masked payload as structured JSON.
///
/// Only the masked copy is stored; the original payload is never serialized.
pub struct MaskedJson {
    value: JsonValue,
}

impl MaskedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The masked payload.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

impl Masker {
    /// Masks `data` and wraps the result for logging through `slog`.
    ///
    /// ## Example
    /// ```ignore
    /// let masker = Masker::new(["password"]);
    /// info!(logger, "payload received"; "payload" => masker.masked_json(&payload));
    /// ```
    pub fn masked_json(&self, data: &JsonValue) -> MaskedJson {
        MaskedJson::new(self.mask(data))
    }
}
