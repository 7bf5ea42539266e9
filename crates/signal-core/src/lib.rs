// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! signal-core
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! The stable contract for the signal messaging substrate: the [`Signal`]
//! envelope, ID/time helpers, the `dispatch` extension, and the shared
//! [`SignalError`] taxonomy.

mod dispatch_spec;
mod envelope;
mod error;
/// UUID v4 generation for signal IDs.
pub mod ids;
/// ISO-8601 timestamp formatting.
pub mod time;

pub use dispatch_spec::{DispatchSpec, DispatchTarget};
pub use envelope::{Signal, SignalBuilder, SPECVERSION};
pub use error::{ErrorKind, SignalError};
