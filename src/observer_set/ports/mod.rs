//! Port contracts for observer registration and broadcast.
//!
//! Ports define the interface observers expose to the registry services.

pub mod observer;

#[cfg(test)]
pub use observer::MockObserver;
pub use observer::Observer;
