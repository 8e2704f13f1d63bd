//! Reference Scene
//!
//! In-memory stand-in for the host's physics/rendering layer: a ground plane
//! plus every placed piece as an axis-aligned box. It answers the per-tick
//! surface query, carries out instantiate/destroy requests, exposes snap
//! zones around placed foundations and reports ghost overlap enter/exit
//! signals the way a trigger system would.

use std::collections::HashMap;

use glam::Vec3;

use super::surface::{InstanceId, SurfaceCategory, SurfaceGeometry, SurfaceHit};
use crate::camera::raycast::{ray_aabb_intersection, ray_plane_intersection, Ray};
use crate::game::builder::{
    Catalog, ObjectType, Pose, SnapSide, SnapZone, StructureHost, TemplateId, ZoneId,
};
use crate::game::systems::BuildSystem;

/// Depth of a snap zone's trigger region beyond the piece's side
pub const SNAP_ZONE_DEPTH: f32 = 0.5;

/// Height above the cursor point that [`Scene::aim_at`] casts from
const AIM_HEIGHT: f32 = 50.0;

/// Shape of the piece a final template instantiates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceShape {
    pub category: SurfaceCategory,
    pub scale: Vec3,
}

/// A piece placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPiece {
    pub id: InstanceId,
    pub template: TemplateId,
    pub category: SurfaceCategory,
    pub pose: Pose,
    pub scale: Vec3,
}

impl PlacedPiece {
    pub fn aabb(&self) -> (Vec3, Vec3) {
        let half = self.scale * 0.5;
        (self.pose.position - half, self.pose.position + half)
    }

    /// Snap zones offered by this piece. Only foundations carry zones.
    pub fn snap_zones(&self) -> Vec<SnapZone> {
        if self.category != SurfaceCategory::Foundation {
            return Vec::new();
        }

        let base = self.pose.position - Vec3::Y * (self.scale.y * 0.5);
        SnapSide::ALL
            .iter()
            .map(|&side| SnapZone::new(self.id, side, base + side.offset(self.scale)))
            .collect()
    }

    /// Trigger region of one of this piece's zones.
    fn zone_region(&self, zone: &SnapZone) -> (Vec3, Vec3) {
        let side = zone.side();
        let dir = side.direction();
        let center = Vec3::new(zone.anchor.x, self.pose.position.y, zone.anchor.z)
            + dir * (SNAP_ZONE_DEPTH * 0.5);

        let half = match side {
            SnapSide::Front | SnapSide::Back => Vec3::new(
                self.scale.x * 0.5,
                self.scale.y * 0.5,
                SNAP_ZONE_DEPTH * 0.5,
            ),
            SnapSide::Left | SnapSide::Right => Vec3::new(
                SNAP_ZONE_DEPTH * 0.5,
                self.scale.y * 0.5,
                self.scale.z * 0.5,
            ),
        };
        (center - half, center + half)
    }
}

/// Host call recorded by the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    Instantiate {
        template: TemplateId,
        pose: Pose,
        instance: InstanceId,
    },
    Destroy(InstanceId),
    SelectionChanged {
        index: usize,
        object_type: ObjectType,
    },
}

/// Overlap change between the ghost and a snap zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneSignal {
    Enter(SnapZone),
    Exit(ZoneId),
}

#[derive(Debug, Clone)]
pub struct Scene {
    ground_height: f32,
    ground_normal: Vec3,
    ray: Option<Ray>,
    shapes: HashMap<TemplateId, PieceShape>,
    pieces: Vec<PlacedPiece>,
    next_id: u32,
    /// Zones the ghost overlapped at the last sync
    overlapping: Vec<ZoneId>,
    calls: Vec<SceneCall>,
}

impl Scene {
    /// Empty scene with flat ground at `ground_height`.
    pub fn new(ground_height: f32) -> Self {
        Self {
            ground_height,
            ground_normal: Vec3::Y,
            ray: None,
            shapes: HashMap::new(),
            pieces: Vec::new(),
            next_id: 1,
            overlapping: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Report `normal` for ground hits (tilted terrain for slope checks).
    pub fn set_ground_normal(&mut self, normal: Vec3) {
        self.ground_normal = normal.normalize_or_zero();
    }

    pub fn register_template(&mut self, template: TemplateId, shape: PieceShape) {
        self.shapes.insert(template, shape);
    }

    /// Register the final template of every catalog entry.
    pub fn register_catalog(&mut self, catalog: &Catalog, default_scale: Vec3) {
        for entry in catalog.iter() {
            self.register_template(
                entry.final_template.clone(),
                PieceShape {
                    category: entry.object_type.surface_category(),
                    scale: entry.scale_or(default_scale),
                },
            );
        }
    }

    /// Set the cursor ray for the next query.
    pub fn aim(&mut self, ray: Ray) {
        self.ray = Some(ray);
    }

    /// Aim straight down at `point`.
    pub fn aim_at(&mut self, point: Vec3) {
        self.aim(Ray::looking_down_at(point, AIM_HEIGHT));
    }

    /// Cursor off-screen: queries hit nothing.
    pub fn clear_aim(&mut self) {
        self.ray = None;
    }

    pub fn pieces(&self) -> &[PlacedPiece] {
        &self.pieces
    }

    pub fn piece(&self, id: InstanceId) -> Option<&PlacedPiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Every host call made so far, in order.
    pub fn calls(&self) -> &[SceneCall] {
        &self.calls
    }

    pub fn instantiate_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SceneCall::Instantiate { .. }))
            .count()
    }

    pub fn destroy_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SceneCall::Destroy(_)))
            .count()
    }

    /// All snap zones currently offered by placed pieces.
    pub fn snap_zones(&self) -> Vec<SnapZone> {
        self.pieces.iter().flat_map(PlacedPiece::snap_zones).collect()
    }

    /// Diff the ghost box against every zone region and return the enter/exit
    /// signals since the last call. Exits come before enters.
    pub fn update_ghost_overlaps(&mut self, ghost_pose: Pose, ghost_scale: Vec3) -> Vec<ZoneSignal> {
        let half = ghost_scale * 0.5;
        let ghost_min = ghost_pose.position - half;
        let ghost_max = ghost_pose.position + half;

        let mut now = Vec::new();
        for piece in &self.pieces {
            for zone in piece.snap_zones() {
                let (min, max) = piece.zone_region(&zone);
                if boxes_overlap(ghost_min, ghost_max, min, max) {
                    now.push(zone);
                }
            }
        }

        let mut signals: Vec<ZoneSignal> = self
            .overlapping
            .iter()
            .filter(|id| !now.iter().any(|z| z.id == **id))
            .map(|id| ZoneSignal::Exit(*id))
            .collect();
        signals.extend(
            now.iter()
                .filter(|z| !self.overlapping.contains(&z.id))
                .map(|z| ZoneSignal::Enter(*z)),
        );

        self.overlapping = now.iter().map(|z| z.id).collect();
        signals
    }

    /// Feed the active ghost's overlap changes into `system`.
    pub fn sync_ghost(&mut self, system: &mut BuildSystem) -> Vec<ZoneSignal> {
        let Some((pose, scale)) = system.ghost().map(|g| (g.pose, g.scale)) else {
            self.overlapping.clear();
            return Vec::new();
        };

        let signals = self.update_ghost_overlaps(pose, scale);
        for signal in &signals {
            match *signal {
                ZoneSignal::Enter(zone) => system.on_zone_overlap_enter(zone),
                ZoneSignal::Exit(id) => system.on_zone_overlap_exit(id),
            }
        }
        signals
    }
}

impl SurfaceGeometry for Scene {
    fn query_surface_hit(&self) -> Option<SurfaceHit> {
        let ray = self.ray?;

        let mut best = ray_plane_intersection(&ray, self.ground_height)
            .map(|t| (t, SurfaceHit::ground(ray.at(t), self.ground_normal)));

        for piece in &self.pieces {
            let (min, max) = piece.aabb();
            if let Some((t, normal)) = ray_aabb_intersection(&ray, min, max)
                && best.as_ref().is_none_or(|(best_t, _)| t < *best_t)
            {
                best = Some((
                    t,
                    SurfaceHit::structure(ray.at(t), normal, piece.category, piece.id),
                ));
            }
        }

        best.map(|(_, hit)| hit)
    }
}

impl StructureHost for Scene {
    fn request_instantiate(&mut self, template: &TemplateId, pose: Pose) -> InstanceId {
        let shape = self.shapes.get(template).copied().unwrap_or_else(|| {
            log::warn!("template '{}' not registered, placing as untagged unit box", template);
            PieceShape {
                category: SurfaceCategory::Other,
                scale: Vec3::ONE,
            }
        });

        let id = InstanceId(self.next_id);
        self.next_id += 1;

        self.pieces.push(PlacedPiece {
            id,
            template: template.clone(),
            category: shape.category,
            pose,
            scale: shape.scale,
        });
        self.calls.push(SceneCall::Instantiate {
            template: template.clone(),
            pose,
            instance: id,
        });
        id
    }

    fn request_destroy(&mut self, instance: InstanceId) {
        self.pieces.retain(|p| p.id != instance);
        self.calls.push(SceneCall::Destroy(instance));
    }

    fn notify_selection_changed(&mut self, index: usize, object_type: ObjectType) {
        self.calls.push(SceneCall::SelectionChanged { index, object_type });
    }
}

fn boxes_overlap(a_min: Vec3, a_max: Vec3, b_min: Vec3, b_max: Vec3) -> bool {
    a_min.cmplt(b_max).all() && b_min.cmplt(a_max).all()
}
