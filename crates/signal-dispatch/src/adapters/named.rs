// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolve-then-deliver to a symbolically named process.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use signal_core::{ErrorKind, Signal, SignalError};

use crate::adapter::Adapter;
use crate::collaborators::NamedRegistry;

/// Delivery to a symbolic name, resolved through a [`NamedRegistry`]
/// collaborator. Registered under the tag `"named"`.
pub struct NamedAdapter {
    registry: Arc<dyn NamedRegistry>,
}

impl NamedAdapter {
    /// Build an adapter backed by `registry`.
    #[must_use]
    pub fn new(registry: Arc<dyn NamedRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Adapter for NamedAdapter {
    fn tag(&self) -> &str {
        "named"
    }

    fn validate(&self, options: &Value) -> Result<Value, SignalError> {
        let target = options
            .get("target")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SignalError::new(ErrorKind::DispatchError, "named adapter requires a non-empty \"target\"")
            })?;
        Ok(json!({ "target": target }))
    }

    async fn deliver(&self, _signal: &Signal, options: &Value) -> Result<(), SignalError> {
        let target = options["target"].as_str().unwrap_or_default();
        match self.registry.resolve(target) {
            Some(_endpoint) => Ok(()),
            None => Err(
                SignalError::new(ErrorKind::ProcessNotFound, format!("no process registered for \"{target}\""))
                    .with_context("target", target),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::InMemoryNamedRegistry;

    fn signal() -> Signal {
        Signal::builder("user.created").source("t").build().unwrap()
    }

    #[test]
    fn validate_requires_target() {
        let adapter = NamedAdapter::new(Arc::new(InMemoryNamedRegistry::new()));
        assert!(adapter.validate(&json!({})).is_err());
    }

    #[tokio::test]
    async fn deliver_fails_process_not_found_on_miss() {
        let adapter = NamedAdapter::new(Arc::new(InMemoryNamedRegistry::new()));
        let options = adapter.validate(&json!({"target": "worker-1"})).unwrap();
        let err = adapter.deliver(&signal(), &options).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ProcessNotFound);
    }

    #[tokio::test]
    async fn deliver_succeeds_when_resolved() {
        let registry = InMemoryNamedRegistry::new();
        registry.register("worker-1", "endpoint://worker-1");
        let adapter = NamedAdapter::new(Arc::new(registry));
        let options = adapter.validate(&json!({"target": "worker-1"})).unwrap();
        adapter.deliver(&signal(), &options).await.unwrap();
    }
}
