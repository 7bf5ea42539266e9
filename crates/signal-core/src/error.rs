// SPDX-License-Identifier: MIT OR Apache-2.0
//! Unified error taxonomy for the signal messaging substrate.
//!
//! Every error carries a stable [`ErrorKind`] (a machine-readable tag), a
//! human-readable message, an optional cause, and arbitrary key-value
//! context. Construct one via [`SignalError::new`] and the builder methods.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Machine-readable error kind, per spec §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Envelope construction or validation failed.
    ParseError,
    /// Invalid pattern, invalid priority, invalid signal type, guard
    /// failure, or no matching handler.
    RoutingError,
    /// A named/direct dispatch target could not be resolved.
    ProcessNotFound,
    /// A bus dispatch target could not be resolved.
    BusNotFound,
    /// Adapter-specific delivery failure.
    DispatchError,
}

impl ErrorKind {
    /// Stable `&'static str` representation (e.g. `"PARSE_ERROR"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "PARSE_ERROR",
            Self::RoutingError => "ROUTING_ERROR",
            Self::ProcessNotFound => "PROCESS_NOT_FOUND",
            Self::BusNotFound => "BUS_NOT_FOUND",
            Self::DispatchError => "DISPATCH_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SignalError
// ---------------------------------------------------------------------------

/// Unified error for the signal messaging substrate.
///
/// # Examples
///
/// ```
/// use signal_core::{ErrorKind, SignalError};
///
/// let err = SignalError::new(ErrorKind::RoutingError, "No matching handlers found for signal")
///     .with_context("signal_type", "user.created");
/// assert_eq!(err.kind, ErrorKind::RoutingError);
/// ```
#[derive(Error)]
#[error("[{kind}] {message}")]
pub struct SignalError {
    /// Machine-readable error kind.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Arbitrary structured context for diagnostics.
    pub context: BTreeMap<String, serde_json::Value>,
}

impl SignalError {
    /// Create a new error with the given kind and message.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            context: BTreeMap::new(),
        }
    }

    /// Shorthand for a [`ErrorKind::ParseError`], prefixing the message with
    /// `parse error: ` as required by spec §4.1.
    #[must_use]
    pub fn parse(detail: impl fmt::Display) -> Self {
        Self::new(ErrorKind::ParseError, format!("parse error: {detail}"))
    }

    /// Shorthand for [`ErrorKind::RoutingError`].
    #[must_use]
    pub fn routing(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::RoutingError, detail)
    }

    /// Attach a key-value pair to the diagnostic context.
    ///
    /// The value is converted via [`serde_json::to_value`]; if serialization
    /// fails, the entry is silently skipped.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Attach an underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Debug for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("SignalError");
        d.field("kind", &self.kind);
        d.field("message", &self.message);
        if let Some(ref src) = self.source {
            d.field("source", &src.to_string());
        }
        if !self.context.is_empty() {
            d.field("context", &self.context);
        }
        d.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = SignalError::new(ErrorKind::BusNotFound, "no such bus");
        assert_eq!(err.to_string(), "[BUS_NOT_FOUND] no such bus");
    }

    #[test]
    fn parse_prefixes_message() {
        let err = SignalError::parse("type is empty");
        assert_eq!(err.message, "parse error: type is empty");
        assert_eq!(err.kind, ErrorKind::ParseError);
    }

    #[test]
    fn context_builder_accumulates() {
        let err = SignalError::routing("no match")
            .with_context("type", "user.created")
            .with_context("candidates", 0);
        assert_eq!(err.context.len(), 2);
        assert_eq!(err.context["type"], serde_json::json!("user.created"));
    }

    #[test]
    fn error_kind_serde_roundtrip() {
        let json = serde_json::to_string(&ErrorKind::ProcessNotFound).unwrap();
        assert_eq!(json, r#""PROCESS_NOT_FOUND""#);
        let back: ErrorKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorKind::ProcessNotFound);
    }
}
