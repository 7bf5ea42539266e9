// SPDX-License-Identifier: MIT OR Apache-2.0
//! [`Dispatcher`]: binds a `DispatchSpec` to the adapter registry and
//! aggregates best-effort fan-out results.

use std::sync::Arc;

use serde_json::Value;
use signal_core::{DispatchSpec, ErrorKind, Signal, SignalError};

use crate::registry::AdapterRegistry;

/// The outcome of delivering to one target within a `DispatchSpec`.
#[derive(Debug, Clone)]
pub struct TargetFailure {
    /// The adapter tag the failing target was addressed to.
    pub tag: String,
    /// The failure message.
    pub message: String,
}

/// Configuration knobs for a [`Dispatcher`], mirroring [`crate::Adapter`]'s
/// per-target options but at the fan-out level.
///
/// Neither knob is enforced by any built-in adapter; `default_timeout_ms`
/// is a hint an adapter implementation may read out of an option bag it
/// was not itself given (the dispatcher does not impose timeouts, per the
/// substrate's concurrency contract), and `max_targets` bounds how wide a
/// single `DispatchSpec` fan-out is allowed to be before
/// [`Dispatcher::dispatch`] refuses to attempt it at all.
#[derive(Debug, Clone, Copy)]
pub struct DispatchConfig {
    /// Advisory delivery timeout, in milliseconds, that adapters may
    /// consult. `None` means no default is suggested.
    pub default_timeout_ms: Option<u64>,
    /// Maximum number of targets a single `DispatchSpec` may name. `None`
    /// means unbounded.
    pub max_targets: Option<usize>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: None,
            max_targets: None,
        }
    }
}

/// Delivers signals to the targets named in a `DispatchSpec`, resolving
/// each through an [`AdapterRegistry`].
///
/// Delivery is best-effort fan-out: one target failing does not prevent
/// the others from being attempted. [`Dispatcher::dispatch`] succeeds iff
/// every target succeeds; otherwise it returns a structured error
/// enumerating each failure. Ordering across distinct targets is not a
/// guarantee callers may rely on.
pub struct Dispatcher {
    registry: Arc<AdapterRegistry>,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Build a dispatcher backed by `registry`, with a default
    /// [`DispatchConfig`] (no timeout hint, no target limit).
    #[must_use]
    pub fn new(registry: Arc<AdapterRegistry>) -> Self {
        Self::with_config(registry, DispatchConfig::default())
    }

    /// Build a dispatcher backed by `registry` with an explicit
    /// [`DispatchConfig`].
    #[must_use]
    pub fn with_config(registry: Arc<AdapterRegistry>, config: DispatchConfig) -> Self {
        Self { registry, config }
    }

    /// Deliver `signal` to every target in `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError`] (kind `DispatchError`) if `spec` names more
    /// targets than [`DispatchConfig::max_targets`] allows, or if one or
    /// more targets failed; in the latter case the context key
    /// `"failures"` carries the per-target `(tag, message)` list.
    pub async fn dispatch(&self, signal: &Signal, spec: &DispatchSpec) -> Result<(), SignalError> {
        let targets = spec.targets();
        if self.config.max_targets.is_some_and(|max| targets.len() > max) {
            let max = self.config.max_targets.unwrap();
            return Err(SignalError::new(
                ErrorKind::DispatchError,
                format!("dispatch spec names {} targets, exceeding the configured limit of {max}", targets.len()),
            )
            .with_context("target_count", targets.len())
            .with_context("max_targets", max));
        }

        let mut failures = Vec::new();

        for target in targets {
            let options_value = serde_json::to_value(&target.options).unwrap_or(Value::Null);
            let outcome = self.deliver_one(&target.adapter, signal, &options_value).await;
            if let Err(message) = outcome {
                tracing::warn!(
                    adapter = %target.adapter,
                    signal_type = %signal.r#type,
                    error = %message,
                    "dispatch target delivery failed"
                );
                failures.push(TargetFailure {
                    tag: target.adapter.clone(),
                    message,
                });
            }
        }

        if failures.is_empty() {
            return Ok(());
        }

        let failures_json: Vec<Value> = failures
            .iter()
            .map(|f| serde_json::json!({"tag": f.tag, "message": f.message}))
            .collect();
        Err(
            SignalError::new(ErrorKind::DispatchError, "one or more dispatch targets failed")
                .with_context("failures", failures_json)
                .with_context("failure_count", failures.len()),
        )
    }

    async fn deliver_one(&self, tag: &str, signal: &Signal, options: &Value) -> Result<(), String> {
        let adapter = self.registry.require(tag).map_err(|e| e.message)?;
        let normalized = adapter.validate(options).map_err(|e| e.message)?;
        adapter.deliver(signal, &normalized).await.map_err(|e| e.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_core::DispatchTarget;

    fn signal() -> Signal {
        Signal::builder("user.created").source("t").build().unwrap()
    }

    #[tokio::test]
    async fn dispatch_succeeds_when_every_target_succeeds() {
        let dispatcher = Dispatcher::new(Arc::new(AdapterRegistry::with_builtins()));
        let spec = DispatchSpec::Many(vec![
            DispatchTarget::new("console"),
            DispatchTarget::new("noop"),
        ]);
        dispatcher.dispatch(&signal(), &spec).await.unwrap();
    }

    #[tokio::test]
    async fn dispatch_rejects_specs_over_the_configured_target_limit() {
        let dispatcher = Dispatcher::with_config(
            Arc::new(AdapterRegistry::with_builtins()),
            DispatchConfig {
                default_timeout_ms: None,
                max_targets: Some(1),
            },
        );
        let spec = DispatchSpec::Many(vec![
            DispatchTarget::new("console"),
            DispatchTarget::new("noop"),
        ]);
        let err = dispatcher.dispatch(&signal(), &spec).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::DispatchError);
        assert_eq!(err.context["target_count"], serde_json::json!(2));
    }

    #[tokio::test]
    async fn dispatch_fails_when_adapter_unregistered() {
        let dispatcher = Dispatcher::new(Arc::new(AdapterRegistry::new()));
        let spec = DispatchSpec::Single(DispatchTarget::new("console"));
        let err = dispatcher.dispatch(&signal(), &spec).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::DispatchError);
    }

    #[tokio::test]
    async fn dispatch_is_best_effort_one_failure_does_not_block_others() {
        let registry = AdapterRegistry::new();
        registry.register(Arc::new(crate::adapters::NoopAdapter::new()));
        let dispatcher = Dispatcher::new(Arc::new(registry));
        let spec = DispatchSpec::Many(vec![
            DispatchTarget::new("missing_adapter"),
            DispatchTarget::new("noop"),
        ]);
        let err = dispatcher.dispatch(&signal(), &spec).await.unwrap_err();
        assert_eq!(err.context["failure_count"], serde_json::json!(1));
    }

    #[tokio::test]
    async fn dispatch_fails_named_target_with_process_not_found() {
        let dispatcher = Dispatcher::new(Arc::new(AdapterRegistry::with_builtins()));
        let spec = DispatchSpec::Single(
            DispatchTarget::new("named").option("target", serde_json::json!("worker-1")),
        );
        let err = dispatcher.dispatch(&signal(), &spec).await.unwrap_err();
        let failures = err.context["failures"].as_array().unwrap();
        assert!(failures[0]["message"].as_str().unwrap().contains("worker-1"));
    }
}
