//! Validated message name type.

use super::CapabilityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a message name.
const MAX_NAME_LENGTH: usize = 100;

/// Validated, lowercase alphanumeric-plus-underscores message identifier.
///
/// Message names identify the broadcastable messages of a capability
/// descriptor (e.g. `model_did_change`, `model_did_tick`). They name the
/// message independently of any observer that handles it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageName(String);

impl MessageName {
    /// Creates a validated message name.
    ///
    /// The input is trimmed and lowercased. Only characters in `[a-z0-9_]` are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::EmptyMessageName`] when the value is empty
    /// after trimming, [`CapabilityError::InvalidMessageName`] when it
    /// contains characters outside `[a-z0-9_]`, or
    /// [`CapabilityError::MessageNameTooLong`] when it exceeds 100
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, CapabilityError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(CapabilityError::EmptyMessageName);
        }

        if normalized.len() > MAX_NAME_LENGTH {
            return Err(CapabilityError::MessageNameTooLong(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

        if !is_valid {
            return Err(CapabilityError::InvalidMessageName(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the message name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageName {
    type Error = CapabilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageName> for String {
    fn from(name: MessageName) -> Self {
        name.0
    }
}

impl AsRef<str> for MessageName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for MessageName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MessageName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for MessageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
