//! Listener broadcast registry.
//!
//! This module keeps a set of non-owning observer references and broadcasts
//! messages to them while the handlers themselves add and remove observers.
//! Messages are declared up front in a capability descriptor, split into
//! required messages (every observer implements them) and optional messages
//! (observers implement zero or more of them). The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Registry and broadcast services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
