// SPDX-License-Identifier: MIT OR Apache-2.0
//! The [`Adapter`] trait: the contract every dispatch destination,
//! built-in or custom, must satisfy.

use async_trait::async_trait;
use serde_json::Value;
use signal_core::{Signal, SignalError};

/// A dispatch destination. Implementations are looked up by tag in an
/// [`crate::AdapterRegistry`] and invoked once per target in a
/// `DispatchSpec`.
///
/// `validate` runs at registration time (and again whenever a signal
/// attaches a dispatch spec) to reject unknown or ill-typed options early;
/// `deliver` runs per signal, per target, against the options `validate`
/// already normalized.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// The tag this adapter is registered under (e.g. `"console"`).
    fn tag(&self) -> &str;

    /// Validate and normalize `options`, rejecting unknown or ill-typed
    /// keys.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError`] (kind `DispatchError`) describing the first
    /// validation failure.
    fn validate(&self, options: &Value) -> Result<Value, SignalError>;

    /// Deliver `signal` using the already-validated `options`.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError`] on delivery failure. The kind depends on
    /// the adapter: `ProcessNotFound` for an unresolved `named` target,
    /// `BusNotFound` for an unresolved `bus` target, `DispatchError`
    /// otherwise.
    async fn deliver(&self, signal: &Signal, options: &Value) -> Result<(), SignalError>;
}
