//! Game systems: self-contained modules that own state and logic.

pub mod build_system;

pub use build_system::{BuildSystem, TickOutcome};
