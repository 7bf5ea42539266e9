// SPDX-License-Identifier: MIT OR Apache-2.0
//! The persistent routing trie and the [`Router`] built on top of it.
//!
//! `Router` is value-typed: [`Router::add`] and [`Router::remove`] return a
//! new `Router` sharing untouched subtrees with the original via `Arc`, so
//! [`Router::route`] never needs to lock — any number of threads may call
//! it concurrently against the same `Router` value.

use std::collections::{BTreeMap, VecDeque};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use signal_core::{Signal, SignalError};

use crate::pattern::{validate_type_segments, Pattern, SegmentMatcher};
use crate::route::{Handler, Route};

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct Node {
    literals: BTreeMap<String, Arc<Node>>,
    single: Option<Arc<Node>>,
    multi: Option<Arc<Node>>,
    routes: Vec<Arc<Route>>,
}

fn insert_route(node: &Arc<Node>, segments: &[SegmentMatcher], idx: usize, route: Arc<Route>) -> Arc<Node> {
    let mut next = (**node).clone();
    if idx == segments.len() {
        next.routes.push(route);
        return Arc::new(next);
    }
    match &segments[idx] {
        SegmentMatcher::Literal(lit) => {
            let child = next.literals.get(lit).cloned().unwrap_or_default();
            next.literals.insert(lit.clone(), insert_route(&child, segments, idx + 1, route));
        }
        SegmentMatcher::Single => {
            let child = next.single.clone().unwrap_or_default();
            next.single = Some(insert_route(&child, segments, idx + 1, route));
        }
        SegmentMatcher::Multi => {
            let child = next.multi.clone().unwrap_or_default();
            next.multi = Some(insert_route(&child, segments, idx + 1, route));
        }
    }
    Arc::new(next)
}

fn remove_routes(
    node: &Arc<Node>,
    segments: &[SegmentMatcher],
    idx: usize,
    handler: Option<&Handler>,
) -> Arc<Node> {
    let mut next = (**node).clone();
    if idx == segments.len() {
        match handler {
            Some(h) => next.routes.retain(|r| &r.handler != h),
            None => next.routes.clear(),
        }
        return Arc::new(next);
    }
    match &segments[idx] {
        SegmentMatcher::Literal(lit) => {
            if let Some(child) = next.literals.get(lit) {
                let updated = remove_routes(child, segments, idx + 1, handler);
                next.literals.insert(lit.clone(), updated);
            }
        }
        SegmentMatcher::Single => {
            if let Some(child) = next.single.clone() {
                next.single = Some(remove_routes(&child, segments, idx + 1, handler));
            }
        }
        SegmentMatcher::Multi => {
            if let Some(child) = next.multi.clone() {
                next.multi = Some(remove_routes(&child, segments, idx + 1, handler));
            }
        }
    }
    Arc::new(next)
}

fn find_terminal<'a>(node: &'a Arc<Node>, segments: &[SegmentMatcher], idx: usize) -> Option<&'a Arc<Node>> {
    if idx == segments.len() {
        return Some(node);
    }
    match &segments[idx] {
        SegmentMatcher::Literal(lit) => node.literals.get(lit).and_then(|c| find_terminal(c, segments, idx + 1)),
        SegmentMatcher::Single => node.single.as_ref().and_then(|c| find_terminal(c, segments, idx + 1)),
        SegmentMatcher::Multi => node.multi.as_ref().and_then(|c| find_terminal(c, segments, idx + 1)),
    }
}

/// Gather every Route reachable from `root` for the given `segments`,
/// following the worklist algorithm: at each `(node, segment_index)`
/// state, enqueue the literal child (advance one), the `*` child (advance
/// one), and the `**` child (advance zero or more, i.e. every position
/// from the current index through the end).
fn collect_candidates(root: &Arc<Node>, segments: &[&str]) -> Vec<Arc<Route>> {
    let n = segments.len();
    let mut worklist: VecDeque<(Arc<Node>, usize)> = VecDeque::new();
    worklist.push_back((Arc::clone(root), 0));
    let mut out = Vec::new();

    while let Some((node, idx)) = worklist.pop_front() {
        if idx == n {
            out.extend(node.routes.iter().cloned());
            continue;
        }
        let seg = segments[idx];
        if let Some(child) = node.literals.get(seg) {
            worklist.push_back((Arc::clone(child), idx + 1));
        }
        if let Some(child) = &node.single {
            worklist.push_back((Arc::clone(child), idx + 1));
        }
        if let Some(child) = &node.multi {
            for advance in idx..=n {
                worklist.push_back((Arc::clone(child), advance));
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// RouterConfig
// ---------------------------------------------------------------------------

/// Configuration knobs resolving the substrate's open questions about
/// router behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterConfig {
    /// When `true`, `add` silently skips a route whose `(pattern, handler,
    /// priority)` already exists at that exact pattern. Defaults to
    /// `false`: duplicates are retained, matching the reference behavior.
    pub dedupe_on_add: bool,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// A persistent trie mapping dotted signal-type patterns to ordered
/// handler lists.
///
/// `Router` is cheap to clone (an `Arc` bump) and safe to share across
/// threads: [`Router::route`] takes `&self` and never blocks or mutates.
#[derive(Debug, Clone)]
pub struct Router {
    root: Arc<Node>,
    next_insertion_index: u64,
    config: RouterConfig,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// An empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Arc::new(Node::default()),
            next_insertion_index: 0,
            config: RouterConfig::default(),
        }
    }

    /// An empty router with the given configuration.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    /// Build a router from an initial batch of routes.
    ///
    /// # Errors
    ///
    /// Propagates nothing beyond what `add` can fail with; `Route`s are
    /// already validated by [`crate::RouteBuilder::build`] before they
    /// reach this call, so this never actually fails, but returns a
    /// `Result` to mirror the substrate's "new" operation signature.
    pub fn with_routes(routes: impl IntoIterator<Item = Route>) -> Result<Self, SignalError> {
        Self::new().add(routes)
    }

    /// Number of distinct routing patterns registered so far (counts
    /// insertions, not terminal nodes).
    #[must_use]
    pub fn route_count(&self) -> u64 {
        self.next_insertion_index
    }

    /// Register one or more routes, returning a new `Router`. The
    /// original `Router` value is unaffected — untouched subtrees are
    /// shared via `Arc`, not copied.
    ///
    /// # Errors
    ///
    /// This implementation never fails: routes are validated when built
    /// via [`crate::RouteBuilder::build`]. The `Result` return mirrors the
    /// substrate's "add" operation, which specifies the same
    /// pattern/priority/guard validation as "new".
    pub fn add(&self, routes: impl IntoIterator<Item = Route>) -> Result<Self, SignalError> {
        let mut root = Arc::clone(&self.root);
        let mut next_index = self.next_insertion_index;

        for mut route in routes {
            if self.config.dedupe_on_add {
                let is_duplicate = find_terminal(&root, &route.pattern.segments, 0)
                    .is_some_and(|terminal| {
                        terminal
                            .routes
                            .iter()
                            .any(|r| r.handler == route.handler && r.priority == route.priority)
                    });
                if is_duplicate {
                    continue;
                }
            }
            route.insertion_index = next_index;
            next_index += 1;
            root = insert_route(&root, &route.pattern.segments, 0, Arc::new(route));
        }

        Ok(Self {
            root,
            next_insertion_index: next_index,
            config: self.config,
        })
    }

    /// Remove routes registered at `pattern`, returning a new `Router`.
    /// When `handler` is given, only routes whose handler equals it are
    /// removed; otherwise every route at that pattern is removed. A
    /// `pattern` that was never registered (or fails to compile) is a
    /// no-op.
    #[must_use]
    pub fn remove(&self, pattern: &str, handler: Option<&Handler>) -> Self {
        let Ok(compiled) = Pattern::compile(pattern) else {
            return self.clone();
        };
        Self {
            root: remove_routes(&self.root, &compiled.segments, 0, handler),
            next_insertion_index: self.next_insertion_index,
            config: self.config,
        }
    }

    /// Route `signal`, returning its ordered, flattened handler list.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError`] (kind `RoutingError`) if `signal.r#type` is
    /// structurally invalid, if a guard panics during evaluation (guards
    /// must be total and non-panicking), or if no route matches.
    pub fn route(&self, signal: &Signal) -> Result<Vec<Handler>, SignalError> {
        let segments = validate_type_segments(&signal.r#type)?;
        let candidates = collect_candidates(&self.root, &segments);

        let mut matched = Vec::with_capacity(candidates.len());
        for route in candidates {
            let passes = match &route.guard {
                None => true,
                Some(guard) => {
                    match std::panic::catch_unwind(AssertUnwindSafe(|| guard.evaluate(signal))) {
                        Ok(result) => result,
                        Err(_) => {
                            tracing::warn!(
                                signal_type = %signal.r#type,
                                "guard predicate panicked during evaluation"
                            );
                            return Err(SignalError::routing(
                                "guard predicate panicked during evaluation",
                            )
                            .with_context("signal_type", &signal.r#type));
                        }
                    }
                }
            };
            if passes {
                matched.push(route);
            }
        }

        if matched.is_empty() {
            tracing::warn!(signal_type = %signal.r#type, "no matching handlers found for signal");
            return Err(SignalError::routing("No matching handlers found for signal")
                .with_context("signal_type", &signal.r#type));
        }

        matched.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.pattern.specificity().cmp(&a.pattern.specificity()))
                .then_with(|| a.insertion_index.cmp(&b.insertion_index))
        });

        let mut handlers = Vec::with_capacity(matched.len());
        for route in matched {
            match &route.handler {
                Handler::DispatchGroup { items } => {
                    for (tag, options) in items {
                        handlers.push(Handler::Dispatch {
                            tag: tag.clone(),
                            options: options.clone(),
                        });
                    }
                }
                other => handlers.push(other.clone()),
            }
        }
        Ok(handlers)
    }
}
