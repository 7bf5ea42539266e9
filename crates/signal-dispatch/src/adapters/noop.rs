// SPDX-License-Identifier: MIT OR Apache-2.0
//! Discards every signal. Used in testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use signal_core::{Signal, SignalError};

use crate::adapter::Adapter;

/// Accepts any options and discards every signal. Registered under the
/// tag `"noop"`.
#[derive(Default)]
pub struct NoopAdapter {
    delivered: AtomicUsize,
}

impl NoopAdapter {
    /// A fresh adapter with a zeroed delivery counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of signals discarded so far.
    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.delivered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Adapter for NoopAdapter {
    fn tag(&self) -> &str {
        "noop"
    }

    fn validate(&self, options: &Value) -> Result<Value, SignalError> {
        Ok(options.clone())
    }

    async fn deliver(&self, _signal: &Signal, _options: &Value) -> Result<(), SignalError> {
        self.delivered.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
