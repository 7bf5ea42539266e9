// SPDX-License-Identifier: MIT OR Apache-2.0
//! [`Route`]: a compiled pattern bound to a guard, a handler, and a
//! priority, plus the builder used to construct one.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use signal_core::{Signal, SignalError};

use crate::pattern::Pattern;

/// Minimum allowed [`Route`] priority.
pub const MIN_PRIORITY: i32 = -100;
/// Maximum allowed [`Route`] priority.
pub const MAX_PRIORITY: i32 = 100;

/// A route's handler payload: either an opaque instruction for an external
/// collaborator to execute, a single dispatch target, or an ordered group
/// of dispatch targets.
///
/// `DispatchGroup` is flattened into individual `Dispatch` entries, in
/// their declared order, at the point the owning route is matched — see
/// [`crate::Router::route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// An opaque action for an external collaborator to execute.
    Instruction {
        /// The action identifier.
        action: String,
        /// Action arguments, as an opaque JSON value.
        args: Value,
    },
    /// A single dispatch target: an adapter tag plus its options.
    Dispatch {
        /// The adapter tag (e.g. `"console"`, `"bus"`).
        tag: String,
        /// Adapter-specific options.
        options: Value,
    },
    /// An ordered sequence of dispatch targets contributed together.
    DispatchGroup {
        /// The `(tag, options)` pairs, in declared order.
        items: Vec<(String, Value)>,
    },
}

/// A pure predicate evaluated against a [`Signal`] after a route's pattern
/// structurally matches. Guards must be total (never panic) and must not
/// block; see the router's concurrency contract.
#[derive(Clone)]
pub struct Guard(Arc<dyn Fn(&Signal) -> bool + Send + Sync>);

impl Guard {
    /// Wrap a closure as a [`Guard`].
    #[must_use]
    pub fn new(f: impl Fn(&Signal) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluate the guard against `signal`.
    #[must_use]
    pub fn evaluate(&self, signal: &Signal) -> bool {
        (self.0)(signal)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(<predicate>)")
    }
}

/// A compiled routing entry: `(pattern, guard?, handler, priority,
/// insertion_index)`.
#[derive(Debug, Clone)]
pub struct Route {
    pub(crate) pattern: Pattern,
    pub(crate) guard: Option<Guard>,
    /// The handler this route contributes when matched.
    pub handler: Handler,
    /// `-100 ..= 100`; higher is evaluated first.
    pub priority: i32,
    /// Monotonic sequence number assigned at registration; the stable
    /// tie-break for routes of identical priority and specificity.
    pub insertion_index: u64,
}

impl Route {
    /// The original pattern string this route was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern.source
    }

    /// Start building a route for `pattern` with the given `handler`.
    #[must_use]
    pub fn builder(pattern: impl Into<String>, handler: Handler) -> RouteBuilder {
        RouteBuilder::new(pattern, handler)
    }
}

/// Fluent builder for [`Route`], modeled on the substrate's envelope
/// builder: validation runs once, at `build()`, and short-circuits on the
/// first failure.
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    pattern: String,
    handler: Handler,
    guard: Option<Guard>,
    priority: i32,
}

impl RouteBuilder {
    /// Create a builder for `pattern` with the given `handler`. Priority
    /// defaults to `0`.
    #[must_use]
    pub fn new(pattern: impl Into<String>, handler: Handler) -> Self {
        Self {
            pattern: pattern.into(),
            handler,
            guard: None,
            priority: 0,
        }
    }

    /// Attach a guard predicate, evaluated after structural match.
    #[must_use]
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Set the priority. Must fall within `[-100, 100]`; out-of-range
    /// values are rejected by [`Self::build`].
    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Compile the pattern and validate the priority, producing a `Route`
    /// with `insertion_index` left at `0` — [`crate::Router::add`]
    /// assigns the real sequence number at registration.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError`] (kind `RoutingError`) if the pattern fails
    /// compilation or the priority falls outside `[-100, 100]`.
    pub fn build(self) -> Result<Route, SignalError> {
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&self.priority) {
            return Err(SignalError::routing(format!(
                "priority {} out of range [{MIN_PRIORITY}, {MAX_PRIORITY}]",
                self.priority
            )));
        }
        let pattern = Pattern::compile(&self.pattern)?;
        Ok(Route {
            pattern,
            guard: self.guard,
            handler: self.handler,
            priority: self.priority,
            insertion_index: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instruction() -> Handler {
        Handler::Instruction {
            action: "noop".into(),
            args: Value::Null,
        }
    }

    #[test]
    fn builds_default_priority_zero() {
        let route = Route::builder("user.created", instruction()).build().unwrap();
        assert_eq!(route.priority, 0);
        assert_eq!(route.pattern(), "user.created");
    }

    #[test]
    fn rejects_priority_above_max() {
        assert!(
            Route::builder("user.created", instruction())
                .priority(101)
                .build()
                .is_err()
        );
    }

    #[test]
    fn rejects_priority_below_min() {
        assert!(
            Route::builder("user.created", instruction())
                .priority(-101)
                .build()
                .is_err()
        );
    }

    #[test]
    fn accepts_boundary_priorities() {
        assert!(
            Route::builder("user.created", instruction())
                .priority(100)
                .build()
                .is_ok()
        );
        assert!(
            Route::builder("user.created", instruction())
                .priority(-100)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn invalid_pattern_rejected_at_build() {
        assert!(Route::builder("user..created", instruction()).build().is_err());
    }

    #[test]
    fn guard_evaluates_against_signal() {
        let guard = Guard::new(|s: &Signal| s.data.is_some());
        let with_data = Signal::builder("x").source("y").data(serde_json::json!({})).build().unwrap();
        let without_data = Signal::builder("x").source("y").build().unwrap();
        assert!(guard.evaluate(&with_data));
        assert!(!guard.evaluate(&without_data));
    }
}
