// SPDX-License-Identifier: MIT OR Apache-2.0
//! The seven built-in adapters.

mod bus;
mod console;
mod logger;
mod named;
mod noop;
mod pid;
mod pubsub;

pub use bus::BusAdapter;
pub use console::ConsoleAdapter;
pub use logger::LoggerAdapter;
pub use named::NamedAdapter;
pub use noop::NoopAdapter;
pub use pid::{PidAdapter, PidDelivery};
pub use pubsub::PubsubAdapter;
