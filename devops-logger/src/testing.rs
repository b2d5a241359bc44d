//! In-memory sink for asserting on emitted records.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{context::LogContext, level::Level, logger::LogSink};

/// One record captured by [`MemorySink`].
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedRecord {
    pub level: Level,
    pub message: String,
    pub context: LogContext,
}

/// A [`LogSink`] that keeps every record it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<CapturedRecord>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the captured records, oldest first.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.lock().clone()
    }

    pub fn last(&self) -> Option<CapturedRecord> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CapturedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for MemorySink {
    fn emit(&self, level: Level, message: &str, context: &LogContext) {
        self.lock().push(CapturedRecord {
            level,
            message: message.to_string(),
            context: context.clone(),
        });
    }
}
