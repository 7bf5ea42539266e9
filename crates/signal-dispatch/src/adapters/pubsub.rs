// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fan-out publish to a topic on a broker.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use signal_core::{ErrorKind, Signal, SignalError};

use crate::adapter::Adapter;
use crate::collaborators::PubsubRegistry;

/// Fan-out publish through a [`PubsubRegistry`] collaborator. Registered
/// under the tag `"pubsub"`.
pub struct PubsubAdapter {
    registry: Arc<dyn PubsubRegistry>,
}

impl PubsubAdapter {
    /// Build an adapter backed by `registry`.
    #[must_use]
    pub fn new(registry: Arc<dyn PubsubRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Adapter for PubsubAdapter {
    fn tag(&self) -> &str {
        "pubsub"
    }

    fn validate(&self, options: &Value) -> Result<Value, SignalError> {
        let target = options
            .get("target")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SignalError::new(ErrorKind::DispatchError, "pubsub adapter requires a non-empty \"target\"")
            })?;
        let topic = options
            .get("topic")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SignalError::new(ErrorKind::DispatchError, "pubsub adapter requires a non-empty \"topic\"")
            })?;
        Ok(json!({ "target": target, "topic": topic }))
    }

    async fn deliver(&self, signal: &Signal, options: &Value) -> Result<(), SignalError> {
        let target = options["target"].as_str().unwrap_or_default();
        let topic = options["topic"].as_str().unwrap_or_default();
        if self.registry.publish(target, topic, &signal.id) {
            Ok(())
        } else {
            Err(
                SignalError::new(ErrorKind::DispatchError, format!("no broker registered for \"{target}\""))
                    .with_context("target", target)
                    .with_context("topic", topic),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::InMemoryPubsubRegistry;

    fn signal() -> Signal {
        Signal::builder("user.created").source("t").build().unwrap()
    }

    #[test]
    fn validate_requires_target_and_topic() {
        let adapter = PubsubAdapter::new(Arc::new(InMemoryPubsubRegistry::new()));
        assert!(adapter.validate(&json!({})).is_err());
        assert!(adapter.validate(&json!({"target": "events"})).is_err());
        assert!(adapter.validate(&json!({"target": "events", "topic": "user.created"})).is_ok());
    }

    #[tokio::test]
    async fn deliver_fails_when_broker_unknown() {
        let adapter = PubsubAdapter::new(Arc::new(InMemoryPubsubRegistry::new()));
        let options = adapter.validate(&json!({"target": "events", "topic": "user.created"})).unwrap();
        assert!(adapter.deliver(&signal(), &options).await.is_err());
    }

    #[tokio::test]
    async fn deliver_succeeds_when_broker_known() {
        let registry = InMemoryPubsubRegistry::new();
        registry.register_broker("events");
        let adapter = PubsubAdapter::new(Arc::new(registry));
        let options = adapter.validate(&json!({"target": "events", "topic": "user.created"})).unwrap();
        adapter.deliver(&signal(), &options).await.unwrap();
    }
}
