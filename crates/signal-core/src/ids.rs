// SPDX-License-Identifier: MIT OR Apache-2.0
//! UUID v4 generation for signal IDs.

use uuid::Uuid;

/// Generate a fresh UUID v4 string, suitable for a [`crate::Signal::id`]
/// default.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_not_empty() {
        assert!(!new_id().is_empty());
    }

    #[test]
    fn new_id_is_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn new_id_parses_as_uuid() {
        let id = new_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
