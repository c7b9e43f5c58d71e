//! JSON adapter for capability configuration.
//!
//! Reads and writes the camelCase configuration document:
//!
//! ```json
//! {
//!   "requiredMessages": ["model_did_change"],
//!   "optionalMessages": ["model_did_tick"]
//! }
//! ```

use crate::observer_set::domain::{
    CapabilityConfig, CapabilityDescriptor, CapabilityError, CapabilityResult,
};

/// Parses a configuration document into a validated descriptor.
///
/// # Errors
///
/// Returns [`CapabilityError::InvalidConfiguration`] when the document is not
/// valid JSON or contains unknown keys, or the descriptor validation error
/// for a malformed message list.
pub fn descriptor_from_json(document: &str) -> CapabilityResult<CapabilityDescriptor> {
    let config: CapabilityConfig = serde_json::from_str(document)
        .map_err(|err| CapabilityError::InvalidConfiguration(err.to_string()))?;
    CapabilityDescriptor::try_from(config)
}

/// Renders a descriptor as a configuration document.
///
/// # Errors
///
/// Returns [`CapabilityError::InvalidConfiguration`] when serialisation
/// fails.
pub fn descriptor_to_json(descriptor: &CapabilityDescriptor) -> CapabilityResult<String> {
    serde_json::to_string_pretty(&descriptor.to_config())
        .map_err(|err| CapabilityError::InvalidConfiguration(err.to_string()))
}
