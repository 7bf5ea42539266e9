// SPDX-License-Identifier: MIT OR Apache-2.0
//! [`AdapterRegistry`]: process-wide, append-only storage of adapters by
//! tag.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use signal_core::{ErrorKind, SignalError};

use crate::adapter::Adapter;
use crate::adapters::{
    BusAdapter, ConsoleAdapter, LoggerAdapter, NamedAdapter, NoopAdapter, PidAdapter, PubsubAdapter,
};
use crate::collaborators::{InMemoryBusRegistry, InMemoryNamedRegistry, InMemoryPubsubRegistry, TracingLogSink};

/// A registry of [`Adapter`]s keyed by tag.
///
/// Intended to be long-lived and shared (typically behind an `Arc`):
/// registration is append-only — later registrations under an existing
/// tag replace the previous adapter, but there is no removal operation,
/// matching the substrate's "single initialization, then append-only"
/// contract for process-wide dispatch state.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: RwLock<HashMap<String, Arc<dyn Adapter>>>,
}

impl AdapterRegistry {
    /// An empty registry with no adapters registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the seven built-in adapters (`pid`,
    /// `named`, `bus`, `pubsub`, `logger`, `console`, `noop`), backed by
    /// in-memory reference collaborators.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(PidAdapter::new()));
        registry.register(Arc::new(NamedAdapter::new(Arc::new(
            InMemoryNamedRegistry::new(),
        ))));
        registry.register(Arc::new(BusAdapter::new(Arc::new(InMemoryBusRegistry::new()))));
        registry.register(Arc::new(PubsubAdapter::new(Arc::new(
            InMemoryPubsubRegistry::new(),
        ))));
        registry.register(Arc::new(LoggerAdapter::new(Arc::new(TracingLogSink))));
        registry.register(Arc::new(ConsoleAdapter::new()));
        registry.register(Arc::new(NoopAdapter::new()));
        registry
    }

    /// Register `adapter` under its own [`Adapter::tag`]. Replaces any
    /// adapter previously registered under the same tag.
    pub fn register(&self, adapter: Arc<dyn Adapter>) {
        let tag = adapter.tag().to_string();
        tracing::info!(tag = %tag, "registering adapter");
        self.adapters
            .write()
            .expect("adapter registry lock poisoned")
            .insert(tag, adapter);
    }

    /// Look up the adapter registered under `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<Arc<dyn Adapter>> {
        self.adapters
            .read()
            .expect("adapter registry lock poisoned")
            .get(tag)
            .cloned()
    }

    /// Look up the adapter registered under `tag`, failing with
    /// `ErrorKind::DispatchError` if none is registered.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError`] if no adapter is registered under `tag`.
    pub fn require(&self, tag: &str) -> Result<Arc<dyn Adapter>, SignalError> {
        self.get(tag).ok_or_else(|| {
            SignalError::new(ErrorKind::DispatchError, format!("no adapter registered for tag \"{tag}\""))
                .with_context("tag", tag)
        })
    }

    /// Number of adapters currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.read().expect("adapter registry lock poisoned").len()
    }

    /// Whether the registry has no adapters registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
