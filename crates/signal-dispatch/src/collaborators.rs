// SPDX-License-Identifier: MIT OR Apache-2.0
//! Narrow collaborator interfaces standing in for the concrete transports
//! a real deployment would plug in behind `named`, `bus`, `pubsub`, and
//! `logger` targets. The transports themselves are out of scope; these
//! traits are the seam, with in-memory reference implementations for
//! tests and for use as a starting point.

use std::collections::HashMap;
use std::sync::RwLock;

/// Resolves a symbolic process name to an endpoint reference, for the
/// `named` adapter.
pub trait NamedRegistry: Send + Sync {
    /// Resolve `name`, returning the endpoint reference it maps to, if
    /// registered.
    fn resolve(&self, name: &str) -> Option<String>;
}

/// An in-memory [`NamedRegistry`] usable in tests and as a reference
/// implementation.
#[derive(Default)]
pub struct InMemoryNamedRegistry {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryNamedRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as resolving to `endpoint`.
    pub fn register(&self, name: impl Into<String>, endpoint: impl Into<String>) {
        self.entries
            .write()
            .expect("named registry lock poisoned")
            .insert(name.into(), endpoint.into());
    }
}

impl NamedRegistry for InMemoryNamedRegistry {
    fn resolve(&self, name: &str) -> Option<String> {
        self.entries
            .read()
            .expect("named registry lock poisoned")
            .get(name)
            .cloned()
    }
}

/// Enqueues a signal onto a named stream of a message bus, for the `bus`
/// adapter.
pub trait BusRegistry: Send + Sync {
    /// Enqueue `payload` (the encoded signal) onto `stream` of `bus`.
    /// Returns `false` if `bus` is not a recognized bus reference.
    fn enqueue(&self, bus: &str, stream: &str, payload: &str) -> bool;
}

/// An in-memory [`BusRegistry`] usable in tests and as a reference
/// implementation. Enqueued payloads are retained per `(bus, stream)` for
/// inspection.
#[derive(Default)]
pub struct InMemoryBusRegistry {
    known_buses: RwLock<HashMap<String, Vec<(String, String)>>>,
}

impl InMemoryBusRegistry {
    /// An empty registry with no known buses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bus` as a recognized bus reference with no queued
    /// entries.
    pub fn register_bus(&self, bus: impl Into<String>) {
        self.known_buses
            .write()
            .expect("bus registry lock poisoned")
            .entry(bus.into())
            .or_default();
    }

    /// Entries enqueued onto `bus`, as `(stream, payload)` pairs in
    /// enqueue order.
    #[must_use]
    pub fn entries(&self, bus: &str) -> Vec<(String, String)> {
        self.known_buses
            .read()
            .expect("bus registry lock poisoned")
            .get(bus)
            .cloned()
            .unwrap_or_default()
    }
}

impl BusRegistry for InMemoryBusRegistry {
    fn enqueue(&self, bus: &str, stream: &str, payload: &str) -> bool {
        let mut buses = self.known_buses.write().expect("bus registry lock poisoned");
        match buses.get_mut(bus) {
            Some(entries) => {
                entries.push((stream.to_string(), payload.to_string()));
                true
            }
            None => false,
        }
    }
}

/// Publishes a signal to a topic on a broker, for the `pubsub` adapter.
pub trait PubsubRegistry: Send + Sync {
    /// Publish `payload` to `topic` on `broker`. Returns `false` if
    /// `broker` is not a recognized broker reference.
    fn publish(&self, broker: &str, topic: &str, payload: &str) -> bool;
}

/// An in-memory [`PubsubRegistry`] usable in tests and as a reference
/// implementation.
#[derive(Default)]
pub struct InMemoryPubsubRegistry {
    known_brokers: RwLock<HashMap<String, Vec<(String, String)>>>,
}

impl InMemoryPubsubRegistry {
    /// An empty registry with no known brokers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `broker` as a recognized broker reference.
    pub fn register_broker(&self, broker: impl Into<String>) {
        self.known_brokers
            .write()
            .expect("pubsub registry lock poisoned")
            .entry(broker.into())
            .or_default();
    }

    /// Entries published to `broker`, as `(topic, payload)` pairs in
    /// publish order.
    #[must_use]
    pub fn entries(&self, broker: &str) -> Vec<(String, String)> {
        self.known_brokers
            .read()
            .expect("pubsub registry lock poisoned")
            .get(broker)
            .cloned()
            .unwrap_or_default()
    }
}

impl PubsubRegistry for InMemoryPubsubRegistry {
    fn publish(&self, broker: &str, topic: &str, payload: &str) -> bool {
        let mut brokers = self.known_brokers.write().expect("pubsub registry lock poisoned");
        match brokers.get_mut(broker) {
            Some(entries) => {
                entries.push((topic.to_string(), payload.to_string()));
                true
            }
            None => false,
        }
    }
}

/// A log sink for the `logger` adapter.
pub trait LogSink: Send + Sync {
    /// Emit `message` at `level` (one of `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    fn log(&self, level: &str, message: &str);
}

/// A [`LogSink`] that emits through `tracing`, matching how the rest of
/// this substrate reports diagnostics.
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, level: &str, message: &str) {
        match level {
            "debug" => tracing::debug!(target: "signal_dispatch::logger", "{message}"),
            "warn" => tracing::warn!(target: "signal_dispatch::logger", "{message}"),
            "error" => tracing::error!(target: "signal_dispatch::logger", "{message}"),
            _ => tracing::info!(target: "signal_dispatch::logger", "{message}"),
        }
    }
}
