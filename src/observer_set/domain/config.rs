//! Serialisable configuration record for a capability descriptor.

use serde::{Deserialize, Serialize};

/// The message partitions a registry is configured with.
///
/// Field names follow the camelCase configuration keys
/// (`requiredMessages`, `optionalMessages`); both default to empty lists.
/// The record is unvalidated. Convert it into a
/// [`CapabilityDescriptor`](super::CapabilityDescriptor) with `try_from` to
/// check the names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CapabilityConfig {
    /// Messages every registered observer implements.
    #[serde(default)]
    pub required_messages: Vec<String>,
    /// Messages only some registered observers implement.
    #[serde(default)]
    pub optional_messages: Vec<String>,
}
