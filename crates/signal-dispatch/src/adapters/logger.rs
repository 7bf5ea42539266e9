// SPDX-License-Identifier: MIT OR Apache-2.0
//! Format and emit via a [`LogSink`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use signal_core::{ErrorKind, Signal, SignalError};

use crate::adapter::Adapter;
use crate::collaborators::LogSink;

const DEFAULT_LEVEL: &str = "info";
const VALID_LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

/// Emits a one-line summary of the signal through a [`LogSink`].
/// Registered under the tag `"logger"`.
pub struct LoggerAdapter {
    sink: Arc<dyn LogSink>,
}

impl LoggerAdapter {
    /// Build an adapter backed by `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Adapter for LoggerAdapter {
    fn tag(&self) -> &str {
        "logger"
    }

    fn validate(&self, options: &Value) -> Result<Value, SignalError> {
        let level = match options.get("level") {
            None => DEFAULT_LEVEL,
            Some(Value::String(s)) if VALID_LEVELS.contains(&s.as_str()) => s.as_str(),
            Some(other) => {
                return Err(SignalError::new(
                    ErrorKind::DispatchError,
                    format!("logger adapter: level must be one of {VALID_LEVELS:?}, got {other}"),
                ));
            }
        };
        Ok(json!({ "level": level }))
    }

    async fn deliver(&self, signal: &Signal, options: &Value) -> Result<(), SignalError> {
        let level = options["level"].as_str().unwrap_or(DEFAULT_LEVEL);
        let message = format!(
            "signal {} type={} source={}",
            signal.id, signal.r#type, signal.source
        );
        self.sink.log(level, &message);
        Ok(())
    }
}
