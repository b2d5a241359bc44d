//! A downstream host struct with a `logger` field and a custom sink.

use devops_logger::{BoundLogger, ContextualLogger, Level, LogContext, LogSink, WithBoundLogger};
use serde_json::json;

struct StderrSink;

impl LogSink for StderrSink {
    fn emit(&self, level: Level, message: &str, _context: &LogContext) {
        eprintln!("[{level}] {message}");
    }
}

#[derive(BoundLogger)]
struct Extension {
    logger: ContextualLogger<StderrSink>,
}

fn main() {
    let mut extension = Extension {
        logger: ContextualLogger::new(StderrSink),
    };
    extension
        .bind_logger(&json!({"id": "PR-1", "type": "purchase"}))
        .info("bound");
    assert!(extension.logger.context().request_id().is_some());
}
