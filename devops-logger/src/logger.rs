//! Context-carrying logger over an injected sink.
//!
//! [`ContextualLogger`] wraps a shared [`LogSink`] and an owned [`LogContext`].
//! Every record it emits carries the bound context merged over the per-call
//! extra data, and is prefixed with the bound `request_id` when one is present.
//!
//! Binding a request (see [`crate::bind`]) produces a new logger sharing the same
//! sink; the original logger and its context are left untouched.

use std::{fmt, sync::Arc};

use serde_json::Value;

use crate::{context::LogContext, level::Level};

/// Backend that receives fully processed log records.
///
/// Implementations decide filtering, formatting and transport.
pub trait LogSink {
    /// Emits one record.
    fn emit(&self, level: Level, message: &str, context: &LogContext);
}

impl<S> LogSink for &S
where
    S: LogSink + ?Sized,
{
    fn emit(&self, level: Level, message: &str, context: &LogContext) {
        (**self).emit(level, message, context);
    }
}

impl<S> LogSink for Box<S>
where
    S: LogSink + ?Sized,
{
    fn emit(&self, level: Level, message: &str, context: &LogContext) {
        (**self).emit(level, message, context);
    }
}

impl<S> LogSink for Arc<S>
where
    S: LogSink + ?Sized,
{
    fn emit(&self, level: Level, message: &str, context: &LogContext) {
        (**self).emit(level, message, context);
    }
}

/// A logger that attaches bound metadata to every record.
pub struct ContextualLogger<S: ?Sized> {
    context: LogContext,
    sink: Arc<S>,
}

impl<S> ContextualLogger<S> {
    /// Wraps `sink` with an empty context.
    pub fn new(sink: S) -> Self {
        Self::with_context(sink, LogContext::new())
    }

    pub fn with_context(sink: S, context: LogContext) -> Self {
        Self::from_shared(Arc::new(sink), context)
    }
}

impl<S: ?Sized> ContextualLogger<S> {
    /// Wraps an already shared sink.
    pub fn from_shared(sink: Arc<S>, context: LogContext) -> Self {
        Self { context, sink }
    }

    /// The context bound to this logger.
    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    /// Returns `true` if both loggers write to the same sink instance.
    pub fn shares_sink_with(&self, other: &ContextualLogger<S>) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink)
    }

    /// Returns a logger over the same sink with `context` merged over the bound one.
    #[must_use]
    pub fn with_extra(&self, context: &LogContext) -> Self {
        Self::from_shared(Arc::clone(&self.sink), self.context.clone().overlay(context))
    }

    /// Binds the identifiers of `request`; see [`crate::bind`].
    #[must_use]
    pub fn bind(&self, request: &Value) -> Self {
        crate::binder::bind(self, request)
    }

    /// Computes the message and context a call would emit.
    ///
    /// The bound context wins over `extra` on overlapping keys. If the merged
    /// context carries a `request_id`, the message is prefixed with it.
    pub fn process<M>(&self, message: M, extra: LogContext) -> (String, LogContext)
    where
        M: fmt::Display,
    {
        let context = extra.overlay(&self.context);
        let message = match context.request_id() {
            Some(Value::String(id)) => format!("{id} {message}"),
            Some(id) => format!("{id} {message}"),
            None => message.to_string(),
        };
        (message, context)
    }
}

impl<S: LogSink + ?Sized> ContextualLogger<S> {
    pub fn log<M: fmt::Display>(&self, level: Level, message: M) {
        self.log_with(level, message, LogContext::new());
    }

    /// Logs with per-call extra data.
    pub fn log_with<M: fmt::Display>(&self, level: Level, message: M, extra: LogContext) {
        let (message, context) = self.process(message, extra);
        self.sink.emit(level, &message, &context);
    }

    pub fn critical<M: fmt::Display>(&self, message: M) {
        self.log(Level::Critical, message);
    }

    pub fn error<M: fmt::Display>(&self, message: M) {
        self.log(Level::Error, message);
    }

    pub fn warning<M: fmt::Display>(&self, message: M) {
        self.log(Level::Warning, message);
    }

    pub fn info<M: fmt::Display>(&self, message: M) {
        self.log(Level::Info, message);
    }

    pub fn debug<M: fmt::Display>(&self, message: M) {
        self.log(Level::Debug, message);
    }

    pub fn trace<M: fmt::Display>(&self, message: M) {
        self.log(Level::Trace, message);
    }
}

impl<S: LogSink + ?Sized> LogSink for ContextualLogger<S> {
    fn emit(&self, level: Level, message: &str, context: &LogContext) {
        self.log_with(level, message, context.clone());
    }
}

// Manual impl: cloning shares the sink, so `S` itself need not be `Clone`.
impl<S: ?Sized> Clone for ContextualLogger<S> {
    fn clone(&self) -> Self {
        Self::from_shared(Arc::clone(&self.sink), self.context.clone())
    }
}

impl<S: ?Sized> fmt::Debug for ContextualLogger<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextualLogger")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
