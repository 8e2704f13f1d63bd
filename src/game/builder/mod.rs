//! Builder Module
//!
//! Ghost preview, snap-zone tracking and commit/removal decisions for
//! modular building pieces.

pub mod catalog;
pub mod director;
pub mod error;
pub mod ghost;
pub mod rules;
pub mod selection;
pub mod snap;

pub use catalog::{Catalog, CatalogEntry, ObjectStyle, ObjectType, TemplateId};
pub use director::{PlacementDecision, PlacementDirector, PlacementOutcome, RemovalOutcome, StructureHost};
pub use error::BuildError;
pub use ghost::{GhostController, GhostInstance};
pub use rules::{PlacementRules, MAX_SLOPE_DEGREES};
pub use selection::SelectionState;
pub use snap::{Pose, SnapSide, SnapState, SnapZone, SnapZoneTracker, ZoneId, SNAP_RELEASE_DISTANCE};
