//! Application services for observer membership and broadcast.

mod broadcast;
mod frame;
mod registry;

pub use broadcast::{BroadcastProxy, DispatchError, DispatchResult};
pub use registry::ObserverRegistry;
