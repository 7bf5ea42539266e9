// SPDX-License-Identifier: MIT OR Apache-2.0
//! The [`Signal`] envelope: a CloudEvents v1.0.2-compatible record plus the
//! `dispatch` extension field.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dispatch_spec::DispatchSpec;
use crate::error::SignalError;
use crate::{ids, time};

/// CloudEvents spec version this substrate speaks. Always `"1.0.2"`.
pub const SPECVERSION: &str = "1.0.2";

/// Default `datacontenttype` applied when `data` is present and no explicit
/// content type was supplied.
const DEFAULT_DATACONTENTTYPE: &str = "application/json";

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// An immutable, CloudEvents v1.0.2-compatible event envelope.
///
/// Construct one via [`SignalBuilder`], never directly — the builder is
/// responsible for applying defaults and running validation in the order
/// spec'd by the substrate's envelope rules.
///
/// # Examples
///
/// ```
/// use signal_core::Signal;
///
/// let signal = Signal::builder("user.created")
///     .source("svc.users")
///     .build()
///     .unwrap();
/// assert_eq!(signal.specversion, "1.0.2");
/// assert_eq!(signal.r#type, "user.created");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Signal {
    /// Always `"1.0.2"`.
    pub specversion: String,
    /// Unique identifier for this signal. Defaults to a fresh UUID v4.
    pub id: String,
    /// Non-empty, conventional URI-path-shaped identifier of the producer.
    pub source: String,
    /// Non-empty, dotted-lowercase event type (e.g. `"user.profile.updated"`).
    #[serde(rename = "type")]
    pub r#type: String,
    /// Optional subject further scoping the event within its source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// ISO-8601 creation time. Defaults to the construction time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Media type of `data`. Defaults to `"application/json"` when `data`
    /// is present and no explicit value was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacontenttype: Option<String>,
    /// Optional URI identifying the schema that `data` adheres to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataschema: Option<String>,
    /// Arbitrary event payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Dispatch extension: how and where to deliver this signal. Never
    /// serialized onto the wire (transport-side routing metadata, not part
    /// of the CloudEvents payload contract) — always `None` after a
    /// decode round-trip.
    #[serde(skip)]
    pub dispatch: Option<DispatchSpec>,
}

impl Signal {
    /// Start building a [`Signal`] with the given `type`.
    #[must_use]
    pub fn builder(signal_type: impl Into<String>) -> SignalBuilder {
        SignalBuilder::new(signal_type)
    }

    /// Split `self.type` on `.` into its dotted segments.
    #[must_use]
    pub fn type_segments(&self) -> Vec<&str> {
        self.r#type.split('.').collect()
    }
}

// ---------------------------------------------------------------------------
// SignalBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Signal`], modeling the language-neutral "attribute
/// bag keyed by symbols or strings" constructor from the substrate's
/// envelope contract as a statically-typed Rust builder.
///
/// Validation runs in the exact order of the substrate's envelope rules;
/// the first failure short-circuits with a descriptive [`SignalError`].
#[derive(Debug, Default, Clone)]
pub struct SignalBuilder {
    specversion: Option<String>,
    id: Option<String>,
    source: Option<String>,
    r#type: Option<String>,
    subject: Option<String>,
    time: Option<String>,
    datacontenttype: Option<String>,
    dataschema: Option<String>,
    data: Option<Value>,
    dispatch: Option<Value>,
    default_source: Option<String>,
}

impl SignalBuilder {
    /// Create a builder for the given signal `type`.
    #[must_use]
    pub fn new(signal_type: impl Into<String>) -> Self {
        Self {
            r#type: Some(signal_type.into()),
            ..Self::default()
        }
    }

    /// Override `specversion`. Rarely needed; validation requires it to
    /// equal `"1.0.2"`.
    #[must_use]
    pub fn specversion(mut self, value: impl Into<String>) -> Self {
        self.specversion = Some(value.into());
        self
    }

    /// Set an explicit `id`, overriding the auto-generated UUID v4 default.
    #[must_use]
    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = Some(value.into());
        self
    }

    /// Set `source`. If never called, the builder falls back to
    /// [`Self::default_source`], then to validation failure if neither is
    /// set (per spec's caller-derived-`source`-default note: this
    /// implementation never inspects the call stack, only explicit
    /// configuration).
    #[must_use]
    pub fn source(mut self, value: impl Into<String>) -> Self {
        self.source = Some(value.into());
        self
    }

    /// Configure the default `source` used when [`Self::source`] was never
    /// called. Distinct from `source` so callers can set a process-wide
    /// default once (e.g. via [`SignalBuilder::with_default_source`]) and
    /// still override it per-signal.
    #[must_use]
    pub fn default_source(mut self, value: impl Into<String>) -> Self {
        self.default_source = Some(value.into());
        self
    }

    /// Set `subject`.
    #[must_use]
    pub fn subject(mut self, value: impl Into<String>) -> Self {
        self.subject = Some(value.into());
        self
    }

    /// Set `time`, overriding the auto-populated creation timestamp.
    #[must_use]
    pub fn time(mut self, value: impl Into<String>) -> Self {
        self.time = Some(value.into());
        self
    }

    /// Set `datacontenttype`.
    #[must_use]
    pub fn datacontenttype(mut self, value: impl Into<String>) -> Self {
        self.datacontenttype = Some(value.into());
        self
    }

    /// Set `dataschema`.
    #[must_use]
    pub fn dataschema(mut self, value: impl Into<String>) -> Self {
        self.dataschema = Some(value.into());
        self
    }

    /// Set the `data` payload.
    #[must_use]
    pub fn data(mut self, value: impl Into<Value>) -> Self {
        self.data = Some(value.into());
        self
    }

    /// Set the `dispatch` extension from a raw JSON value (a single
    /// `{adapter, options}` object, an array of such objects, or `null`).
    #[must_use]
    pub fn dispatch(mut self, value: impl Into<Value>) -> Self {
        self.dispatch = Some(value.into());
        self
    }

    /// Build the [`Signal`], applying defaults and running validation.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError`] with [`crate::ErrorKind::ParseError`] on the
    /// first validation rule that fails, in the order defined by the
    /// envelope contract.
    pub fn build(self) -> Result<Signal, SignalError> {
        // Rule 1: specversion must equal "1.0.2".
        let specversion = self.specversion.unwrap_or_else(|| SPECVERSION.to_string());
        if specversion != SPECVERSION {
            return Err(SignalError::parse(format!(
                "specversion must be \"{SPECVERSION}\", got \"{specversion}\""
            )));
        }

        // Rule 2: type present and non-empty.
        let r#type = self
            .r#type
            .ok_or_else(|| SignalError::parse("type is required"))?;
        if r#type.is_empty() {
            return Err(SignalError::parse("type must not be empty"));
        }

        // Rule 3: source present and non-empty.
        let source = match self.source.or(self.default_source) {
            Some(s) if s.is_empty() => return Err(SignalError::parse("source must not be empty")),
            Some(s) => s,
            None => return Err(SignalError::parse("source is required")),
        };

        // Rule 4: id either absent (auto-generated) or non-empty.
        let id = match self.id {
            Some(ref s) if s.is_empty() => {
                return Err(SignalError::parse("id must not be empty"));
            }
            Some(s) => s,
            None => ids::new_id(),
        };

        // Rule 5: subject, time, datacontenttype, dataschema — if present,
        // non-empty.
        for (name, value) in [
            ("subject", &self.subject),
            ("time", &self.time),
            ("datacontenttype", &self.datacontenttype),
            ("dataschema", &self.dataschema),
        ] {
            if value.as_deref().is_some_and(str::is_empty) {
                return Err(SignalError::parse(format!("{name} must not be empty")));
            }
        }
        let subject = self.subject;
        let time = self.time.unwrap_or_else(time::now_iso8601);
        let dataschema = self.dataschema;

        // Rule 6: data, if present, must not be an empty string.
        if matches!(&self.data, Some(Value::String(s)) if s.is_empty()) {
            return Err(SignalError::parse("data must not be an empty string"));
        }
        let data = self.data;

        // datacontenttype default: "application/json" iff data present and
        // no explicit content type was supplied.
        let datacontenttype = match (self.datacontenttype, &data) {
            (Some(ct), _) => Some(ct),
            (None, Some(_)) => Some(DEFAULT_DATACONTENTTYPE.to_string()),
            (None, None) => None,
        };

        // Rule 7: dispatch — null, a (tag, options) pair, or a sequence.
        let dispatch = match self.dispatch {
            None => None,
            Some(v) => DispatchSpec::from_json(&v)?,
        };

        Ok(Signal {
            specversion,
            id,
            source,
            r#type,
            subject,
            time: Some(time),
            datacontenttype,
            dataschema,
            data,
            dispatch,
        })
    }

    /// Build the [`Signal`], panicking on any validation failure.
    ///
    /// Intended for call sites that have already validated their inputs
    /// (e.g. test fixtures); production code paths should use
    /// [`Self::build`].
    ///
    /// # Panics
    ///
    /// Panics with the [`SignalError`]'s message if validation fails.
    #[must_use]
    pub fn build_strict(self) -> Signal {
        match self.build() {
            Ok(signal) => signal,
            Err(e) => panic!("{e}"),
        }
    }
}
