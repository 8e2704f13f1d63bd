//! World Module
//!
//! Surface hits reported by the host's geometry queries, their build-side
//! classification, and an in-memory reference scene.

pub mod scene;
pub mod surface;

pub use scene::{PieceShape, PlacedPiece, Scene, SceneCall, ZoneSignal, SNAP_ZONE_DEPTH};
pub use surface::{HitEvent, InstanceId, SurfaceCategory, SurfaceGeometry, SurfaceHit};
