//! Dispatch mode of a broadcast message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a message is delivered to the registered observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Every observer implements the message; it is invoked on all of them.
    Required,
    /// Only some observers implement the message; the rest are skipped.
    Optional,
}

impl DispatchMode {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
