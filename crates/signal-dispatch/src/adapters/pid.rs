// SPDX-License-Identifier: MIT OR Apache-2.0
//! Direct process/endpoint delivery.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use signal_core::{ErrorKind, Signal, SignalError};

use crate::adapter::Adapter;

/// A single recorded `pid` delivery, kept for test inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PidDelivery {
    /// The `target` option the signal was delivered to.
    pub target: String,
    /// `"sync"` or `"async"`.
    pub delivery_mode: String,
    /// `signal.r#type` at delivery time.
    pub signal_type: String,
}

/// Direct delivery to a single endpoint reference. Registered under the
/// tag `"pid"`.
#[derive(Default)]
pub struct PidAdapter {
    deliveries: Mutex<Vec<PidDelivery>>,
}

impl PidAdapter {
    /// A fresh adapter with no recorded deliveries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliveries recorded so far, in delivery order.
    #[must_use]
    pub fn deliveries(&self) -> Vec<PidDelivery> {
        self.deliveries.lock().expect("pid adapter lock poisoned").clone()
    }
}

#[async_trait]
impl Adapter for PidAdapter {
    fn tag(&self) -> &str {
        "pid"
    }

    fn validate(&self, options: &Value) -> Result<Value, SignalError> {
        let target = options
            .get("target")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SignalError::new(ErrorKind::DispatchError, "pid adapter requires a non-empty \"target\"")
            })?;

        let delivery_mode = match options.get("delivery_mode") {
            None => "sync",
            Some(Value::String(s)) if s == "sync" || s == "async" => s.as_str(),
            Some(other) => {
                return Err(SignalError::new(
                    ErrorKind::DispatchError,
                    format!("pid adapter: delivery_mode must be \"sync\" or \"async\", got {other}"),
                ));
            }
        };

        Ok(json!({ "target": target, "delivery_mode": delivery_mode }))
    }

    async fn deliver(&self, signal: &Signal, options: &Value) -> Result<(), SignalError> {
        let target = options["target"].as_str().unwrap_or_default().to_string();
        let delivery_mode = options["delivery_mode"].as_str().unwrap_or("sync").to_string();
        self.deliveries
            .lock()
            .expect("pid adapter lock poisoned")
            .push(PidDelivery {
                target,
                delivery_mode,
                signal_type: signal.r#type.clone(),
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal() -> Signal {
        Signal::builder("user.created").source("t").build().unwrap()
    }

    #[test]
    fn validate_requires_target() {
        let adapter = PidAdapter::new();
        assert!(adapter.validate(&json!({})).is_err());
        assert!(adapter.validate(&json!({"target": ""})).is_err());
    }

    #[test]
    fn validate_defaults_delivery_mode_to_sync() {
        let adapter = PidAdapter::new();
        let normalized = adapter.validate(&json!({"target": "ep://1"})).unwrap();
        assert_eq!(normalized["delivery_mode"], "sync");
    }

    #[test]
    fn validate_rejects_unknown_delivery_mode() {
        let adapter = PidAdapter::new();
        assert!(
            adapter
                .validate(&json!({"target": "ep://1", "delivery_mode": "eventually"}))
                .is_err()
        );
    }

    #[tokio::test]
    async fn deliver_records_delivery() {
        let adapter = PidAdapter::new();
        let options = adapter.validate(&json!({"target": "ep://1"})).unwrap();
        adapter.deliver(&signal(), &options).await.unwrap();
        let deliveries = adapter.deliveries();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].target, "ep://1");
        assert_eq!(deliveries[0].delivery_mode, "sync");
        assert_eq!(deliveries[0].signal_type, "user.created");
    }
}
