// SPDX-License-Identifier: MIT OR Apache-2.0
//! Human-readable console output.

use async_trait::async_trait;
use serde_json::{json, Value};
use signal_core::{Signal, SignalError};

use crate::adapter::Adapter;

/// Prints a human-readable line to stdout. Takes no options. Registered
/// under the tag `"console"`.
#[derive(Default)]
pub struct ConsoleAdapter;

impl ConsoleAdapter {
    /// A fresh console adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Adapter for ConsoleAdapter {
    fn tag(&self) -> &str {
        "console"
    }

    fn validate(&self, _options: &Value) -> Result<Value, SignalError> {
        Ok(json!({}))
    }

    async fn deliver(&self, signal: &Signal, _options: &Value) -> Result<(), SignalError> {
        println!("[signal] {} {} from {}", signal.time.as_deref().unwrap_or("?"), signal.r#type, signal.source);
        Ok(())
    }
}
