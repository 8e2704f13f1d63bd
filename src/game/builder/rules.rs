//! Placement Rules
//!
//! Pure checks deciding whether a surface accepts a piece and whether a hit
//! structure may be removed.

use glam::Vec3;

use crate::world::SurfaceCategory;

/// Steepest surface (degrees from world up) that still accepts a piece
pub const MAX_SLOPE_DEGREES: f32 = 45.0;

/// Absorbs acos rounding so a normal at exactly the limit is accepted
const SLOPE_EPSILON_DEGREES: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    max_slope_degrees: f32,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            max_slope_degrees: MAX_SLOPE_DEGREES,
        }
    }
}

impl PlacementRules {
    pub fn new(max_slope_degrees: f32) -> Self {
        Self { max_slope_degrees }
    }

    pub fn max_slope_degrees(&self) -> f32 {
        self.max_slope_degrees
    }

    /// Angle between `normal` and world up, in degrees.
    ///
    /// `None` for zero-length or non-finite normals.
    pub fn slope_degrees(normal: Vec3) -> Option<f32> {
        if !normal.is_finite() || normal.length_squared() < 1e-12 {
            return None;
        }
        let cos = (normal.dot(Vec3::Y) / normal.length()).clamp(-1.0, 1.0);
        Some(cos.acos().to_degrees())
    }

    /// Inclusive bound: a surface at exactly the limit is accepted.
    pub fn is_slope_acceptable(&self, normal: Vec3) -> bool {
        Self::slope_degrees(normal)
            .is_some_and(|angle| angle <= self.max_slope_degrees + SLOPE_EPSILON_DEGREES)
    }

    /// Only foundations, roofs, pillars and doorways can be removed.
    pub fn is_removable(category: SurfaceCategory) -> bool {
        matches!(
            category,
            SurfaceCategory::Foundation
                | SurfaceCategory::Roof
                | SurfaceCategory::Pillar
                | SurfaceCategory::Doorway
        )
    }
}
