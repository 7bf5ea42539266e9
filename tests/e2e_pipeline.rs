// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end tests wiring envelope construction, routing, and dispatch
//! together: a `Signal` is built, matched against a `Router`, and its
//! resulting handlers are delivered through a `Dispatcher`.

use std::sync::Arc;

use serde_json::{json, Value};
use signal::{
    decode, encode, AdapterRegistry, DispatchSpec, DispatchTarget, Dispatcher, Handler,
    InMemoryNamedRegistry, NamedAdapter, NoopAdapter, Route, Router, Signal,
};

fn router_for_user_events() -> Router {
    Router::with_routes([
        Route::builder(
            "user.*.created",
            Handler::Dispatch {
                tag: "console".into(),
                options: json!({}),
            },
        )
        .priority(10)
        .build()
        .unwrap(),
        Route::builder(
            "user.**",
            Handler::Dispatch {
                tag: "noop".into(),
                options: json!({}),
            },
        )
        .priority(0)
        .build()
        .unwrap(),
    ])
    .unwrap()
}

#[tokio::test]
async fn signal_routes_then_dispatches_to_every_matched_handler() {
    let router = router_for_user_events();
    let signal = Signal::builder("user.42.created")
        .source("svc.users")
        .build()
        .unwrap();

    let handlers = router.route(&signal).unwrap();
    assert_eq!(handlers.len(), 2, "both the literal and the ** route should match");

    let registry = Arc::new(AdapterRegistry::with_builtins());
    let dispatcher = Dispatcher::new(registry);

    let targets: Vec<DispatchTarget> = handlers
        .into_iter()
        .filter_map(|h| match h {
            Handler::Dispatch { tag, options } => Some((tag, options)),
            _ => None,
        })
        .map(|(tag, options)| {
            let mut target = DispatchTarget::new(tag);
            if let Value::Object(map) = options {
                for (k, v) in map {
                    target = target.option(k, v);
                }
            }
            target
        })
        .collect();
    let spec = DispatchSpec::Many(targets);

    dispatcher.dispatch(&signal, &spec).await.unwrap();
}

#[tokio::test]
async fn unmatched_signal_type_fails_routing_before_dispatch_is_attempted() {
    let router = router_for_user_events();
    let signal = Signal::builder("billing.invoice.paid")
        .source("svc.billing")
        .build()
        .unwrap();

    assert!(router.route(&signal).is_err());
}

#[tokio::test]
async fn guard_rejection_falls_through_to_a_lower_priority_catch_all() {
    let router = Router::with_routes([
        Route::builder(
            "order.*.updated",
            Handler::Instruction {
                action: "notify_vip".into(),
                args: Value::Null,
            },
        )
        .guard(signal_router::Guard::new(|s: &Signal| {
            s.data.as_ref().and_then(|d| d.get("vip")).and_then(Value::as_bool).unwrap_or(false)
        }))
        .priority(50)
        .build()
        .unwrap(),
        Route::builder(
            "order.**",
            Handler::Instruction {
                action: "notify_standard".into(),
                args: Value::Null,
            },
        )
        .priority(0)
        .build()
        .unwrap(),
    ])
    .unwrap();

    let signal = Signal::builder("order.7.updated")
        .source("svc.orders")
        .data(json!({"vip": false}))
        .build()
        .unwrap();

    let handlers = router.route(&signal).unwrap();
    assert_eq!(handlers.len(), 1);
    assert!(matches!(
        &handlers[0],
        Handler::Instruction { action, .. } if action == "notify_standard"
    ));
}

#[tokio::test]
async fn dispatch_fan_out_is_best_effort_across_named_and_noop_targets() {
    let named_registry = Arc::new(InMemoryNamedRegistry::new());
    named_registry.register("worker-1", "endpoint://worker-1");

    let adapter_registry = AdapterRegistry::new();
    adapter_registry.register(Arc::new(NamedAdapter::new(named_registry)));
    adapter_registry.register(Arc::new(NoopAdapter::new()));
    let dispatcher = Dispatcher::new(Arc::new(adapter_registry));

    let signal = Signal::builder("user.42.created").source("svc.users").build().unwrap();

    let spec = DispatchSpec::Many(vec![
        DispatchTarget::new("named").option("target", "worker-unknown"),
        DispatchTarget::new("noop"),
    ]);

    let err = dispatcher.dispatch(&signal, &spec).await.unwrap_err();
    let failures = err.context["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1, "only the unresolved named target should fail");
}

#[tokio::test]
async fn encoded_signal_decodes_back_to_an_equivalent_routable_envelope() {
    let original = Signal::builder("user.42.created")
        .source("svc.users")
        .data(json!({"email": "a@example.com"}))
        .build()
        .unwrap();

    let wire = encode(&original).unwrap();
    let decoded = decode(&wire).unwrap();

    let router = router_for_user_events();
    let handlers = router.route(&decoded).unwrap();
    assert_eq!(handlers.len(), 2);
}
