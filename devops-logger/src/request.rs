//! Request classification and field extraction.
//!
//! Requests are plain JSON objects. This module decides which model a request
//! belongs to and which identifiers should be lifted into a [`LogContext`].
//!
//! Classification is driven by the static [`REQUEST_MODELS`] table. A rule
//! matches when its object key is present at the top level of the request, or
//! when the request `type` is one of the rule's types. The first matching rule
//! wins; a request matching no rule is [`RequestModel::Undefined`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::LogContext;

/// The domain model a request belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestModel {
    Asset,
    TierConfig,
    Undefined,
}

impl RequestModel {
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestModel::Asset => "asset",
            RequestModel::TierConfig => "tier-config",
            RequestModel::Undefined => "undefined",
        }
    }
}

impl fmt::Display for RequestModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A context key and the path of object keys its value is read from.
pub type FieldPath = (&'static str, &'static [&'static str]);

/// One entry of the classification table.
#[derive(Clone, Copy, Debug)]
pub struct ModelRule {
    /// Model assigned when the rule matches.
    pub model: RequestModel,
    /// Top-level key whose presence selects this model.
    pub object: &'static str,
    /// Request `type` values that select this model.
    pub types: &'static [&'static str],
    /// Model-specific fields bound into the logger context.
    pub fields: &'static [FieldPath],
}

impl ModelRule {
    /// Returns `true` if the request carries the object key or one of the types.
    pub fn matches(&self, request: &Map<String, Value>) -> bool {
        request.contains_key(self.object)
            || request
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|kind| self.types.iter().any(|candidate| *candidate == kind))
    }
}

/// Fields bound for every request, regardless of model.
pub const COMMON_FIELDS: &[FieldPath] = &[
    ("request_id", &["id"]),
    ("request_type", &["type"]),
    ("request_status", &["status"]),
];

/// Classification rules in priority order.
pub const REQUEST_MODELS: &[ModelRule] = &[
    ModelRule {
        model: RequestModel::Asset,
        object: "asset",
        types: &["adjustment", "purchase", "change", "suspend", "resume", "cancel"],
        fields: &[
            ("tier_id", &["asset", "tiers", "customer", "id"]),
            ("asset_id", &["asset", "id"]),
        ],
    },
    ModelRule {
        model: RequestModel::TierConfig,
        object: "configuration",
        types: &["setup"],
        fields: &[
            ("tier_id", &["configuration", "account", "id"]),
            ("tier_config_id", &["configuration", "id"]),
        ],
    },
];

/// Read-only view over a request object.
#[derive(Clone, Copy, Debug)]
pub struct Request<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Request<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns a view if `value` is an object, `None` otherwise.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// Walks `path` through nested objects.
    ///
    /// Missing keys, non-object intermediates and `null` leaves all resolve to
    /// `None`.
    pub fn lookup(&self, path: &[&str]) -> Option<&'a Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.fields.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// The first rule in [`REQUEST_MODELS`] matching this request.
    pub fn rule(&self) -> Option<&'static ModelRule> {
        REQUEST_MODELS.iter().find(|rule| rule.matches(self.fields))
    }

    pub fn model(&self) -> RequestModel {
        self.rule().map_or(RequestModel::Undefined, |rule| rule.model)
    }

    /// Collects the non-null identifiers of this request.
    pub fn context(&self) -> LogContext {
        let model_fields: &[FieldPath] = self.rule().map_or(&[][..], |rule| rule.fields);
        COMMON_FIELDS
            .iter()
            .chain(model_fields)
            .filter_map(|(key, path)| self.lookup(path).map(|value| (*key, value.clone())))
            .collect()
    }
}

/// Classifies a request. Values that are not objects are `Undefined`.
pub fn classify(request: &Value) -> RequestModel {
    Request::from_value(request).map_or(RequestModel::Undefined, |request| request.model())
}
