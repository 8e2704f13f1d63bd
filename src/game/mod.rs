//! Game Module
//!
//! Building-piece placement built on top of the engine's surface hits and
//! input actions.

pub mod builder;
pub mod config;
pub mod systems;

pub use builder::{
    BuildError, Catalog, CatalogEntry, GhostController, GhostInstance, ObjectStyle, ObjectType,
    PlacementDecision, PlacementDirector, PlacementOutcome, PlacementRules, Pose, RemovalOutcome,
    SelectionState, SnapSide, SnapState, SnapZone, SnapZoneTracker, StructureHost, TemplateId,
    ZoneId,
};
pub use config::{BuildConfig, CatalogConfig, ConfigError};
pub use systems::{BuildSystem, TickOutcome};
