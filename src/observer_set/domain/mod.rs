//! Domain model for capability descriptors and broadcast outcomes.
//!
//! The domain describes which messages a registry broadcasts, how each one is
//! dispatched, and what a finished broadcast reports. It knows nothing about
//! observers or registry storage.

mod capability;
mod config;
mod error;
mod ids;
mod mode;
mod name;
mod summary;

pub use capability::{CapabilityDescriptor, CapabilityDescriptorBuilder, MessageSlot};
pub use config::CapabilityConfig;
pub use error::{CapabilityError, CapabilityResult};
pub use ids::DispatchId;
pub use mode::DispatchMode;
pub use name::MessageName;
pub use summary::DispatchSummary;
