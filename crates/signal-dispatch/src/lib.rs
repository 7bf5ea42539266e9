// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pluggable delivery of [`signal_core::Signal`]s to out-of-process
//! targets.
//!
//! An [`AdapterRegistry`] holds [`Adapter`] implementations by tag; a
//! [`Dispatcher`] resolves the targets named in a signal's `dispatch`
//! extension (or any [`signal_core::DispatchSpec`] supplied directly) and
//! fans delivery out best-effort across them.
//!
//! ```
//! # use std::sync::Arc;
//! # use signal_core::{DispatchSpec, DispatchTarget, Signal};
//! # use signal_dispatch::{AdapterRegistry, Dispatcher};
//! # async fn run() {
//! let registry = Arc::new(AdapterRegistry::with_builtins());
//! let dispatcher = Dispatcher::new(registry);
//! let signal = Signal::builder("user.created").source("svc.users").build().unwrap();
//! let spec = DispatchSpec::Single(DispatchTarget::new("console"));
//! dispatcher.dispatch(&signal, &spec).await.unwrap();
//! # }
//! ```

mod adapter;
mod adapters;
mod collaborators;
mod pipeline;
mod registry;

pub use adapter::Adapter;
pub use adapters::{
    BusAdapter, ConsoleAdapter, LoggerAdapter, NamedAdapter, NoopAdapter, PidAdapter, PidDelivery,
    PubsubAdapter,
};
pub use collaborators::{
    BusRegistry, InMemoryBusRegistry, InMemoryNamedRegistry, InMemoryPubsubRegistry, LogSink,
    NamedRegistry, PubsubRegistry, TracingLogSink,
};
pub use pipeline::{DispatchConfig, Dispatcher, TargetFailure};
pub use registry::AdapterRegistry;
