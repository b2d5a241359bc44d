//! Binding request identifiers onto a logger.

use std::sync::Arc;

use serde_json::Value;

use crate::{logger::ContextualLogger, request::Request};

/// Returns a logger whose context is extended with the identifiers of `request`.
///
/// The request id, type and status are always read; asset requests add
/// `tier_id` and `asset_id`, tier-config requests add `tier_id` and
/// `tier_config_id`. Absent or `null` values are skipped, so binding never
/// erases context bound earlier.
///
/// If `request` is not an object the logger is returned as is (a clone sharing
/// the same sink and context).
///
/// ```rust
/// use devops_logger::{bind, ContextualLogger, Level, LogContext, LogSink};
/// use serde_json::json;
///
/// struct Stdout;
///
/// impl LogSink for Stdout {
///     fn emit(&self, level: Level, message: &str, _context: &LogContext) {
///         println!("{level}: {message}");
///     }
/// }
///
/// let logger = ContextualLogger::new(Stdout);
/// let bound = bind(&logger, &json!({"id": "PR-1", "type": "purchase"}));
///
/// assert_eq!(bound.context().request_id(), Some(&json!("PR-1")));
/// assert!(logger.context().is_empty());
/// ```
#[must_use]
pub fn bind<S: ?Sized>(logger: &ContextualLogger<S>, request: &Value) -> ContextualLogger<S> {
    match Request::from_value(request) {
        Some(request) => ContextualLogger::from_shared(
            Arc::clone(logger.sink()),
            logger.context().clone().overlay(&request.context()),
        ),
        None => logger.clone(),
    }
}

/// Helper to name the sink type of a logger field.
#[doc(hidden)]
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `ContextualLogger`",
    label = "the logger field must be a `ContextualLogger<_>`",
    note = "mark the logger field with `#[logger]` or name it `logger`"
)]
pub trait LoggerField {
    type Sink: ?Sized;
}

impl<S: ?Sized> LoggerField for ContextualLogger<S> {
    type Sink = S;
}

/// Types that own a [`ContextualLogger`] and rebind it in place.
///
/// Usually implemented with `#[derive(BoundLogger)]`:
///
/// ```rust
/// use devops_logger::{BoundLogger, ContextualLogger, Level, LogContext, LogSink, WithBoundLogger};
/// use serde_json::json;
///
/// struct Stdout;
///
/// impl LogSink for Stdout {
///     fn emit(&self, level: Level, message: &str, _context: &LogContext) {
///         println!("{level}: {message}");
///     }
/// }
///
/// #[derive(BoundLogger)]
/// struct Processor {
///     logger: ContextualLogger<Stdout>,
/// }
///
/// let mut processor = Processor {
///     logger: ContextualLogger::new(Stdout),
/// };
/// processor
///     .bind_logger(&json!({"id": "PR-1", "type": "purchase"}))
///     .info("processing");
///
/// assert_eq!(processor.logger.context().request_id(), Some(&json!("PR-1")));
/// ```
pub trait WithBoundLogger {
    type Sink: ?Sized;

    /// The logger owned by the host.
    fn logger_mut(&mut self) -> &mut ContextualLogger<Self::Sink>;

    /// Replaces the host logger with one bound to `request` and returns it.
    fn bind_logger(&mut self, request: &Value) -> &ContextualLogger<Self::Sink> {
        let logger = self.logger_mut();
        *logger = bind(logger, request);
        logger
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{context::LogContext, testing::MemorySink};

    fn logger() -> ContextualLogger<MemorySink> {
        ContextualLogger::new(MemorySink::new())
    }

    #[test]
    fn binds_purchase_request() {
        let bound = bind(
            &logger(),
            &json!({"id": "PR-123-456-789", "type": "purchase", "status": "pending"}),
        );

        assert_eq!(bound.context().get("request_id"), Some(&json!("PR-123-456-789")));
        assert_eq!(bound.context().get("request_type"), Some(&json!("purchase")));
        assert_eq!(bound.context().get("request_status"), Some(&json!("pending")));
    }

    #[test]
    fn binds_setup_request() {
        let bound = bind(
            &logger(),
            &json!({"id": "TC-123-456-789", "type": "setup", "status": "pending"}),
        );

        assert_eq!(bound.context().get("request_id"), Some(&json!("TC-123-456-789")));
    }

    #[test]
    fn empty_request_adds_nothing() {
        let bound = bind(&logger(), &json!({}));
        assert!(bound.context().is_empty());
    }

    #[test]
    fn non_object_request_returns_logger_unchanged() {
        let base = ContextualLogger::with_context(
            MemorySink::new(),
            LogContext::new().with("tenant", "acme"),
        );

        for request in [json!("Some invalid request"), json!(null), json!([1, 2]), json!(7)] {
            let bound = bind(&base, &request);
            assert_eq!(bound.context(), base.context());
            assert!(bound.shares_sink_with(&base));
        }
    }

    #[test]
    fn binding_is_additive_and_does_not_touch_the_original() {
        let first = bind(
            &logger(),
            &json!({"id": "PR-1", "type": "purchase", "asset": {"id": "AS-1"}}),
        );
        let second = bind(&first, &json!({"id": "PR-2", "status": null}));

        assert_eq!(first.context().get("request_id"), Some(&json!("PR-1")));
        assert_eq!(second.context().get("request_id"), Some(&json!("PR-2")));
        assert_eq!(second.context().get("asset_id"), Some(&json!("AS-1")));
        assert_eq!(second.context().get("request_type"), Some(&json!("purchase")));
        assert!(!second.context().contains_key("request_status"));
    }

    #[test]
    fn sibling_bindings_do_not_interfere() {
        let root = logger();
        let asset = bind(&root, &json!({"id": "PR-1", "asset": {"id": "AS-1"}}));
        let tier = bind(&root, &json!({"id": "TCR-1", "configuration": {"id": "TC-1"}}));

        assert!(!asset.context().contains_key("tier_config_id"));
        assert!(!tier.context().contains_key("asset_id"));
        assert!(root.context().is_empty());
    }

    struct Host {
        logger: ContextualLogger<MemorySink>,
    }

    impl WithBoundLogger for Host {
        type Sink = MemorySink;

        fn logger_mut(&mut self) -> &mut ContextualLogger<MemorySink> {
            &mut self.logger
        }
    }

    #[test]
    fn host_rebinds_its_own_logger() {
        let mut host = Host { logger: logger() };

        host.bind_logger(&json!({"id": "PR-1", "type": "purchase"}));
        host.bind_logger(&json!("not a request"));

        assert_eq!(host.logger.context().request_id(), Some(&json!("PR-1")));
    }
}
