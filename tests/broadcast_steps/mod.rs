//! Step definitions for observer set broadcast scenarios.

pub mod given;
pub mod when;
pub mod world;
