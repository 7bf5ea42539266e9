// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! signal-codec
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! JSON wire format: encode a single [`Signal`] or a homogeneous sequence,
//! decode the same. The `dispatch` extension is never serialized (it is
//! transport-side routing metadata, not part of the CloudEvents payload
//! contract) and always decodes back to `None`.
//!
//! # Examples
//!
//! ```
//! use signal_core::Signal;
//! use signal_codec::{decode, encode};
//!
//! let signal = Signal::builder("user.created").source("svc.users").build().unwrap();
//! let json = encode(&signal).unwrap();
//! let decoded = decode(&json).unwrap();
//! assert_eq!(decoded.id, signal.id);
//! assert!(decoded.dispatch.is_none());
//! ```

use serde_json::{Map, Value};
use signal_core::{Signal, SignalBuilder, SignalError};
use thiserror::Error;

/// Errors arising from JSON encoding/decoding of signals.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value was neither an object nor an array.
    #[error("expected a JSON object or array, got {kind}")]
    UnexpectedTopLevel {
        /// Description of the JSON kind actually found.
        kind: &'static str,
    },

    /// An element failed envelope validation. Carries the index within the
    /// sequence (`0` for a single signal) and the underlying error.
    #[error("element {index}: {source}")]
    InvalidElement {
        /// Zero-based index of the offending element.
        index: usize,
        /// The validation failure.
        #[source]
        source: SignalError,
    },
}

/// Encode a single [`Signal`] as a JSON object.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails (practically never,
/// since every field is already JSON-representable).
pub fn encode(signal: &Signal) -> Result<String, CodecError> {
    Ok(serde_json::to_string(signal)?)
}

/// Encode a sequence of [`Signal`]s as a JSON array.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_many(signals: &[Signal]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(signals)?)
}

/// Decode a JSON string into a single [`Signal`].
///
/// # Errors
///
/// Returns [`CodecError::UnexpectedTopLevel`] if given a JSON array (use
/// [`decode_many`] instead), [`CodecError::Json`] on malformed JSON, or
/// [`CodecError::InvalidElement`] if the decoded fields fail validation.
pub fn decode(json: &str) -> Result<Signal, CodecError> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Object(map) => decode_object(&map, 0),
        Value::Array(_) => Err(CodecError::UnexpectedTopLevel { kind: "array" }),
        other => Err(CodecError::UnexpectedTopLevel { kind: json_kind(&other) }),
    }
}

/// Decode a JSON string into a sequence of [`Signal`]s.
///
/// Accepts either a single object (returned as a one-element vec) or a JSON
/// array. Any element failure aborts the entire decode.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_many(json: &str) -> Result<Vec<Signal>, CodecError> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Object(map) => Ok(vec![decode_object(&map, 0)?]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => decode_object(&map, i),
                other => Err(CodecError::UnexpectedTopLevel { kind: json_kind(&other) }),
            })
            .collect(),
        other => Err(CodecError::UnexpectedTopLevel { kind: json_kind(&other) }),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Re-run the same validation that envelope construction applies, via
/// [`SignalBuilder`], on a decoded JSON object.
fn decode_object(map: &Map<String, Value>, index: usize) -> Result<Signal, CodecError> {
    let signal_type = string_field(map, "type").unwrap_or_default();
    let mut builder = SignalBuilder::new(signal_type);

    if let Some(v) = string_field(map, "specversion") {
        builder = builder.specversion(v);
    }
    if let Some(v) = string_field(map, "id") {
        builder = builder.id(v);
    }
    if let Some(v) = string_field(map, "source") {
        builder = builder.source(v);
    }
    if let Some(v) = string_field(map, "subject") {
        builder = builder.subject(v);
    }
    if let Some(v) = string_field(map, "time") {
        builder = builder.time(v);
    }
    if let Some(v) = string_field(map, "datacontenttype") {
        builder = builder.datacontenttype(v);
    }
    if let Some(v) = string_field(map, "dataschema") {
        builder = builder.dataschema(v);
    }
    if let Some(v) = map.get("data") {
        builder = builder.data(v.clone());
    }

    builder
        .build()
        .map_err(|source| CodecError::InvalidElement { index, source })
}

/// Extract a string-typed field, treating an absent key as `None` and a
/// present-but-empty-string key as `Some("")` so downstream validation can
/// reject it with the correct message.
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_excludes_dispatch() {
        let signal = Signal::builder("user.created")
            .source("svc.users")
            .dispatch(serde_json::json!({"adapter": "console", "options": {}}))
            .build()
            .unwrap();
        let json = encode(&signal).unwrap();
        assert!(!json.contains("dispatch"));
    }

    #[test]
    fn round_trip_preserves_fields_modulo_dispatch() {
        let signal = Signal::builder("user.created")
            .source("svc.users")
            .data(serde_json::json!({"email": "a@b.com"}))
            .dispatch(serde_json::json!({"adapter": "console", "options": {}}))
            .build()
            .unwrap();
        let json = encode(&signal).unwrap();
        let decoded = decode(&json).unwrap();
        assert_eq!(decoded.id, signal.id);
        assert_eq!(decoded.source, signal.source);
        assert_eq!(decoded.r#type, signal.r#type);
        assert_eq!(decoded.data, signal.data);
        assert!(decoded.dispatch.is_none());
    }

    #[test]
    fn decode_array_via_decode_many() {
        let a = Signal::builder("a.b").source("x").build().unwrap();
        let b = Signal::builder("c.d").source("y").build().unwrap();
        let json = encode_many(&[a, b]).unwrap();
        let decoded = decode_many(&json).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].r#type, "a.b");
        assert_eq!(decoded[1].r#type, "c.d");
    }

    #[test]
    fn decode_single_object_via_decode_many_wraps_in_vec() {
        let signal = Signal::builder("a.b").source("x").build().unwrap();
        let json = encode(&signal).unwrap();
        let decoded = decode_many(&json).unwrap();
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn decode_array_via_decode_fails() {
        let a = Signal::builder("a.b").source("x").build().unwrap();
        let json = encode_many(&[a]).unwrap();
        assert!(matches!(
            decode(&json),
            Err(CodecError::UnexpectedTopLevel { kind: "array" })
        ));
    }

    #[test]
    fn one_bad_element_aborts_whole_batch() {
        let good = Signal::builder("a.b").source("x").build().unwrap();
        let good_json = serde_json::to_value(&good).unwrap();
        let mut bad_json = good_json.clone();
        bad_json["source"] = serde_json::json!("");
        let batch = serde_json::json!([good_json, bad_json]);
        let err = decode_many(&batch.to_string()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidElement { index: 1, .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(decode("{not json").is_err());
    }
}
