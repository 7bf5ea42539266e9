// SPDX-License-Identifier: MIT OR Apache-2.0
//! The `dispatch` extension field: a single target or an ordered sequence.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SignalError;

/// A single `(adapter_tag, options)` pair identifying how and where a
/// signal should be delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DispatchTarget {
    /// Symbolic adapter tag (built-in or user-defined).
    pub adapter: String,
    /// Attribute bag whose recognized keys depend on the adapter.
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl DispatchTarget {
    /// Construct a target with an empty options map.
    #[must_use]
    pub fn new(adapter: impl Into<String>) -> Self {
        Self {
            adapter: adapter.into(),
            options: Map::new(),
        }
    }

    /// Set a single option, returning `self` for chaining.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Either a single dispatch target or an ordered sequence of them.
///
/// Mirrors spec §3: "Either a single `(adapter_tag, options_map)` pair, or
/// an ordered sequence of such pairs."
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchSpec {
    /// A single delivery target.
    Single(DispatchTarget),
    /// An ordered sequence of delivery targets, all attempted (best-effort).
    Many(Vec<DispatchTarget>),
}

impl DispatchSpec {
    /// View every target in declared order.
    #[must_use]
    pub fn targets(&self) -> Vec<&DispatchTarget> {
        match self {
            Self::Single(t) => vec![t],
            Self::Many(ts) => ts.iter().collect(),
        }
    }

    /// Parse a raw JSON value into a [`DispatchSpec`] per the validation
    /// rules of spec §4.1 rule 7: `null`, a `(tag, options)` object, or an
    /// array of such objects. Anything else fails with `invalid dispatch
    /// config`.
    pub fn from_json(value: &Value) -> Result<Option<Self>, SignalError> {
        match value {
            Value::Null => Ok(None),
            Value::Object(_) => {
                let target: DispatchTarget = serde_json::from_value(value.clone())
                    .map_err(|_| SignalError::parse("invalid dispatch config"))?;
                if target.adapter.is_empty() {
                    return Err(SignalError::parse("invalid dispatch config"));
                }
                Ok(Some(Self::Single(target)))
            }
            Value::Array(items) => {
                let mut targets = Vec::with_capacity(items.len());
                for item in items {
                    let target: DispatchTarget = serde_json::from_value(item.clone())
                        .map_err(|_| SignalError::parse("invalid dispatch config"))?;
                    if target.adapter.is_empty() {
                        return Err(SignalError::parse("invalid dispatch config"));
                    }
                    targets.push(target);
                }
                Ok(Some(Self::Many(targets)))
            }
            _ => Err(SignalError::parse("invalid dispatch config")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_absent() {
        assert_eq!(DispatchSpec::from_json(&Value::Null).unwrap(), None);
    }

    #[test]
    fn single_object_parses() {
        let v = json!({"adapter": "console", "options": {}});
        let spec = DispatchSpec::from_json(&v).unwrap().unwrap();
        assert_eq!(spec.targets().len(), 1);
        assert_eq!(spec.targets()[0].adapter, "console");
    }

    #[test]
    fn sequence_parses_in_order() {
        let v = json!([
            {"adapter": "console", "options": {}},
            {"adapter": "logger", "options": {"level": "info"}}
        ]);
        let spec = DispatchSpec::from_json(&v).unwrap().unwrap();
        let targets = spec.targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].adapter, "console");
        assert_eq!(targets[1].adapter, "logger");
    }

    #[test]
    fn string_value_rejected() {
        assert!(DispatchSpec::from_json(&json!("console")).is_err());
    }

    #[test]
    fn empty_adapter_tag_rejected() {
        let v = json!({"adapter": "", "options": {}});
        assert!(DispatchSpec::from_json(&v).is_err());
    }
}
