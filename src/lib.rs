//! Observer set: a listener broadcast registry.
//!
//! This crate provides a registry of observers conforming to a declared
//! capability interface, and a broadcast proxy that delivers messages to
//! every registered observer supporting them.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Capability descriptors, message names, and dispatch outcomes
//! - **Ports**: The `Observer` trait observers implement
//! - **Adapters**: Configuration loading
//! - **Services**: The observer registry and its broadcast proxy
//!
//! # Dispatch rules
//!
//! Broadcasts run synchronously on the calling thread. A handler may add or
//! remove observers, or start a nested broadcast:
//!
//! - observers are visited in registration order;
//! - an observer added during a broadcast first hears the next one;
//! - an observer removed before being reached is skipped.
//!
//! # Modules
//!
//! - [`observer_set`]: Registry, broadcast proxy, and capability descriptors

pub mod observer_set;
