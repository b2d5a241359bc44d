//! `#[logger]` on a tuple field behind a boxed trait-object sink.

use devops_logger::{BoundLogger, ContextualLogger, Level, LogContext, LogSink, WithBoundLogger};
use serde_json::json;

struct Quiet;

impl LogSink for Quiet {
    fn emit(&self, _level: Level, _message: &str, _context: &LogContext) {}
}

#[derive(BoundLogger)]
struct Step(&'static str, #[logger] ContextualLogger<Box<dyn LogSink>>);

fn main() {
    let sink: Box<dyn LogSink> = Box::new(Quiet);
    let mut step = Step("approve", ContextualLogger::new(sink));
    step.bind_logger(&json!({"id": "TCR-1", "type": "setup"}))
        .warning("bound");
    assert_eq!(step.0, "approve");
}
