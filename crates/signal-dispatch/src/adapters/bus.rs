// SPDX-License-Identifier: MIT OR Apache-2.0
//! Enqueue onto a named stream of a message bus.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use signal_core::{ErrorKind, Signal, SignalError};

use crate::adapter::Adapter;
use crate::collaborators::BusRegistry;

const DEFAULT_STREAM: &str = "default";

/// Delivery onto a bus stream, enqueued through a [`BusRegistry`]
/// collaborator. Registered under the tag `"bus"`.
pub struct BusAdapter {
    registry: Arc<dyn BusRegistry>,
}

impl BusAdapter {
    /// Build an adapter backed by `registry`.
    #[must_use]
    pub fn new(registry: Arc<dyn BusRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Adapter for BusAdapter {
    fn tag(&self) -> &str {
        "bus"
    }

    fn validate(&self, options: &Value) -> Result<Value, SignalError> {
        let target = options
            .get("target")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SignalError::new(ErrorKind::DispatchError, "bus adapter requires a non-empty \"target\"")
            })?;
        let stream = options
            .get("stream")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STREAM);
        Ok(json!({ "target": target, "stream": stream }))
    }

    async fn deliver(&self, signal: &Signal, options: &Value) -> Result<(), SignalError> {
        let target = options["target"].as_str().unwrap_or_default();
        let stream = options["stream"].as_str().unwrap_or(DEFAULT_STREAM);
        if self.registry.enqueue(target, stream, &signal.id) {
            Ok(())
        } else {
            Err(
                SignalError::new(ErrorKind::BusNotFound, format!("no bus registered for \"{target}\""))
                    .with_context("target", target)
                    .with_context("stream", stream),
            )
        }
    }
}
