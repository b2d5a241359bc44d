//! Request-bound contextual logging and payload masking.
//!
//! This crate separates:
//! - **Binding**: deriving correlation metadata from a request and attaching it
//!   to a logger, so every line that logger emits carries it.
//! - **Masking**: redacting sensitive keys from a JSON payload before it is
//!   logged.
//!
//! Requests and payloads are `serde_json::Value`s. A request is classified as an
//! asset request, a tier-config request, or undefined, and the classification
//! decides which identifiers are bound:
//!
//! | Model | Bound keys |
//! |-------|------------|
//! | any | `request_id`, `request_type`, `request_status` |
//! | `asset` | `tier_id` (customer tier), `asset_id` |
//! | `tier-config` | `tier_id` (account), `tier_config_id` |
//!
//! Missing or `null` values are never bound, and binding never removes keys
//! bound earlier. Every message emitted through a logger with a `request_id` is
//! prefixed with it.
//!
//! What this crate does:
//! - defines the [`LogSink`] backend trait and the [`ContextualLogger`] decorator
//! - classifies requests and binds their identifiers ([`classify`], [`bind`])
//! - masks payloads by key ([`mask`], [`Masker`])
//! - provides integrations behind feature flags (e.g. `slog`)
//!
//! What it does not do:
//! - format, filter or transport log records; that is the sink's job
//! - install or resolve a global logger
//!
//! The `BoundLogger` derive macro lives in `devops-logger-derive` and is
//! re-exported here.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use devops_logger_derive::BoundLogger;

// Lets derive output name `::devops_logger` from inside this crate too.
#[allow(unused_extern_crates)]
extern crate self as devops_logger;

// Module declarations
mod binder;
mod context;
mod level;
mod logger;
mod mask;
mod request;
#[cfg(feature = "slog")]
pub mod slog;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-exports
pub use binder::{bind, WithBoundLogger};
pub use context::{LogContext, REQUEST_ID};
pub use level::{Level, ParseLevelError};
pub use logger::{ContextualLogger, LogSink};
pub use mask::{mask, stringified_len, Masker, SensitiveKeys, DEFAULT_MAX_DEPTH, MASK_CHAR};
pub use request::{
    classify, FieldPath, ModelRule, Request, RequestModel, COMMON_FIELDS, REQUEST_MODELS,
};
#[doc(hidden)]
pub use binder::LoggerField;
