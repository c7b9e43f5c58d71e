//! Adapter implementations for loading observer set configuration.

pub mod json;

pub use json::{descriptor_from_json, descriptor_to_json};
