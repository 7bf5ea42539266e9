// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! signal-router
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! # Examples
//!
//! ```
//! use signal_core::Signal;
//! use signal_router::{Handler, Route, Router};
//! use serde_json::Value;
//!
//! let router = Router::with_routes([
//!     Route::builder("user.*.updated", Handler::Instruction {
//!         action: "notify".into(),
//!         args: Value::Null,
//!     }).build().unwrap(),
//! ]).unwrap();
//!
//! let signal = Signal::builder("user.42.updated").source("svc.users").build().unwrap();
//! let handlers = router.route(&signal).unwrap();
//! assert_eq!(handlers.len(), 1);
//! ```

mod pattern;
mod route;
mod trie;

pub use pattern::{validate_type_segments, SegmentMatcher};
pub use route::{Guard, Handler, Route, RouteBuilder, MAX_PRIORITY, MIN_PRIORITY};
pub use trie::{Router, RouterConfig};
