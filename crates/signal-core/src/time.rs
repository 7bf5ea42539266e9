// SPDX-License-Identifier: MIT OR Apache-2.0
//! ISO-8601 timestamp formatting for signal creation time.

use chrono::{SecondsFormat, Utc};

/// Return the current UTC time formatted as an ISO-8601 / RFC 3339 string
/// with millisecond precision and a `Z` suffix, e.g.
/// `"2026-07-27T12:00:00.000Z"`.
#[must_use]
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
