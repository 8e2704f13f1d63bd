//! Surface Hits
//!
//! The single nearest ray/surface intersection the host produces each tick,
//! and its classification into a ground hit or a structure hit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identity of a placed structure instance, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Category of a surface, validated once where hits enter the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceCategory {
    /// Buildable ground
    Floor,
    Foundation,
    Wall,
    Pillar,
    Roof,
    Doorway,
    Door,
    /// Anything the build system does not recognise
    Other,
}

impl SurfaceCategory {
    /// Parse a host tag ("Floor", "Foundation", ...). Unknown tags map to [`SurfaceCategory::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Floor" => Self::Floor,
            "Foundation" => Self::Foundation,
            "Wall" => Self::Wall,
            "Pillar" => Self::Pillar,
            "Roof" => Self::Roof,
            "Doorway" => Self::Doorway,
            "Door" => Self::Door,
            _ => Self::Other,
        }
    }

    /// Host tag for this category.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Floor => "Floor",
            Self::Foundation => "Foundation",
            Self::Wall => "Wall",
            Self::Pillar => "Pillar",
            Self::Roof => "Roof",
            Self::Doorway => "Doorway",
            Self::Door => "Door",
            Self::Other => "Other",
        }
    }

    /// Ground surfaces drive the ghost and placement.
    pub fn is_ground(self) -> bool {
        self == Self::Floor
    }

    /// Placed building pieces.
    pub fn is_structure(self) -> bool {
        !matches!(self, Self::Floor | Self::Other)
    }
}

/// Nearest ray/surface intersection for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// World-space intersection point
    pub point: Vec3,
    /// Surface normal at the intersection
    pub normal: Vec3,
    /// Category of the surface hit
    pub category: SurfaceCategory,
    /// Owning structure instance, if the surface belongs to one
    pub target: Option<InstanceId>,
}

impl SurfaceHit {
    /// A hit on buildable ground.
    pub fn ground(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal,
            category: SurfaceCategory::Floor,
            target: None,
        }
    }

    /// A hit on a placed structure.
    pub fn structure(point: Vec3, normal: Vec3, category: SurfaceCategory, target: InstanceId) -> Self {
        Self {
            point,
            normal,
            category,
            target: Some(target),
        }
    }
}

/// Classified hit, dispatched to at most one handler set per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitEvent {
    /// Ground was hit: ghost follows, placement may commit
    Ground { point: Vec3, normal: Vec3 },
    /// A placed structure was hit: removal may apply
    Object {
        target: InstanceId,
        category: SurfaceCategory,
    },
}

impl HitEvent {
    /// Classify a raw hit. Returns `None` for surfaces neither handler cares about.
    pub fn classify(hit: &SurfaceHit) -> Option<Self> {
        if hit.category.is_ground() {
            return Some(Self::Ground {
                point: hit.point,
                normal: hit.normal,
            });
        }

        if !hit.category.is_structure() {
            return None;
        }

        match hit.target {
            Some(target) => Some(Self::Object {
                target,
                category: hit.category,
            }),
            None => {
                log::debug!("{} hit without an owning instance, ignored", hit.category.tag());
                None
            }
        }
    }
}

/// Supplies one nearest ray/surface intersection per query.
///
/// Implemented by the host's physics/rendering layer. The build loop calls
/// it exactly once per tick.
pub trait SurfaceGeometry {
    fn query_surface_hit(&self) -> Option<SurfaceHit>;
}
