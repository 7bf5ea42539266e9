// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! signal
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use signal_core::{
    DispatchSpec, DispatchTarget, ErrorKind, Signal, SignalBuilder, SignalError,
};
pub use signal_codec::{decode, decode_many, encode, encode_many, CodecError};
pub use signal_dispatch::{
    Adapter, AdapterRegistry, BusAdapter, BusRegistry, ConsoleAdapter, DispatchConfig, Dispatcher,
    InMemoryBusRegistry, InMemoryNamedRegistry, InMemoryPubsubRegistry, LogSink, LoggerAdapter,
    NamedAdapter, NamedRegistry, NoopAdapter, PidAdapter, PidDelivery, PubsubAdapter,
    PubsubRegistry, TargetFailure, TracingLogSink,
};
pub use signal_router::{
    validate_type_segments, Guard, Handler, Route, RouteBuilder, Router, RouterConfig,
    SegmentMatcher, MAX_PRIORITY, MIN_PRIORITY,
};
