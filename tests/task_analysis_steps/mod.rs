//! Step definitions for task analysis scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
