// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pattern compilation: turning a dotted pattern string into a sequence of
//! segment matchers, with the validation the router requires at
//! registration time.

use signal_core::SignalError;

/// One segment of a compiled [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentMatcher {
    /// Matches exactly this literal segment.
    Literal(String),
    /// Matches exactly one segment, any value.
    Single,
    /// Matches zero or more remaining segments. At most one per pattern.
    Multi,
}

impl SegmentMatcher {
    /// Specificity rank used for tie-breaking: literal outranks single
    /// outranks multi.
    fn specificity_rank(&self) -> u8 {
        match self {
            Self::Literal(_) => 2,
            Self::Single => 1,
            Self::Multi => 0,
        }
    }
}

/// A compiled route pattern: an ordered sequence of segment matchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub(crate) segments: Vec<SegmentMatcher>,
    /// The original pattern string, kept for display and for `remove`.
    pub(crate) source: String,
}

impl Pattern {
    /// Compile `pattern`, splitting on `.` and validating each segment.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError`] (kind `RoutingError`) if the pattern is
    /// empty, contains an empty segment, contains more than one `**`, or
    /// contains a segment with characters outside `[a-z0-9_*]`.
    pub fn compile(pattern: &str) -> Result<Self, SignalError> {
        let raw_segments: Vec<&str> = pattern.split('.').collect();
        if raw_segments.is_empty() || raw_segments.iter().any(|s| s.is_empty()) {
            return Err(SignalError::routing(format!(
                "invalid pattern \"{pattern}\": empty segment"
            )));
        }

        let mut segments = Vec::with_capacity(raw_segments.len());
        let mut multi_count = 0usize;
        for raw in &raw_segments {
            let matcher = match *raw {
                "**" => {
                    multi_count += 1;
                    SegmentMatcher::Multi
                }
                "*" => SegmentMatcher::Single,
                lit if is_valid_literal(lit) => SegmentMatcher::Literal(lit.to_string()),
                _ => {
                    return Err(SignalError::routing(format!(
                        "invalid pattern \"{pattern}\": segment \"{raw}\" contains characters outside [a-z0-9_*]"
                    )));
                }
            };
            segments.push(matcher);
        }

        if multi_count > 1 {
            return Err(SignalError::routing(format!(
                "invalid pattern \"{pattern}\": at most one ** segment is allowed"
            )));
        }

        Ok(Self {
            segments,
            source: pattern.to_string(),
        })
    }

    /// The specificity vector used for ordering: per-segment ranks,
    /// compared lexicographically (higher first) across candidate routes.
    #[must_use]
    pub(crate) fn specificity(&self) -> Vec<u8> {
        self.segments.iter().map(SegmentMatcher::specificity_rank).collect()
    }
}

fn is_valid_literal(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Validate a signal `type` string for use as a match key (spec §4.3.3): a
/// non-empty sequence of non-empty segments, each matching `[a-z0-9_]+`
/// (no wildcards).
///
/// # Errors
///
/// Returns [`SignalError`] (kind `RoutingError`) on an invalid type.
pub fn validate_type_segments(signal_type: &str) -> Result<Vec<&str>, SignalError> {
    if signal_type.is_empty() {
        return Err(SignalError::routing("signal type must not be empty"));
    }
    let segments: Vec<&str> = signal_type.split('.').collect();
    for seg in &segments {
        if !is_valid_literal(seg) {
            return Err(SignalError::routing(format!(
                "invalid signal type \"{signal_type}\": segment \"{seg}\" is empty or contains invalid characters"
            )));
        }
    }
    Ok(segments)
}
