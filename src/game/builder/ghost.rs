//! Ghost Preview
//!
//! The single live preview of the selected catalog entry. It follows the
//! cursor over ground, or sits at the snapped position while snapped.

use glam::{Quat, Vec3};

use super::catalog::{CatalogEntry, ObjectType, TemplateId};
use super::snap::{Pose, SnapZone, SnapZoneTracker, ZoneId};
use crate::game::config::BuildConfig;

/// Preview entity bound to one catalog entry.
#[derive(Debug, Clone)]
pub struct GhostInstance {
    /// Catalog index this ghost previews
    pub entry_index: usize,
    /// Preview template the host renders
    pub template: TemplateId,
    pub object_type: ObjectType,
    pub scale: Vec3,
    /// Pose applied on the last update
    pub pose: Pose,
    /// Inactive ghosts receive no updates or overlap signals
    pub active: bool,
    tracker: SnapZoneTracker,
}

impl GhostInstance {
    pub fn tracker(&self) -> &SnapZoneTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut SnapZoneTracker {
        &mut self.tracker
    }

    pub fn is_snapped(&self) -> bool {
        self.tracker.is_snapped()
    }

    /// Pose a piece would take for `cursor`, with `rotation` applied on top.
    pub fn effective_pose(&self, cursor: Vec3, rotation: Quat) -> Pose {
        let pose = self.tracker.effective_pose(cursor);
        pose.with_rotation(rotation * pose.rotation)
    }
}

/// Owns the ghost for the current selection.
#[derive(Debug, Clone)]
pub struct GhostController {
    vertical_offset: f32,
    release_distance: f32,
    default_scale: Vec3,
    ghost: Option<GhostInstance>,
}

impl GhostController {
    pub fn new(config: &BuildConfig) -> Self {
        Self {
            vertical_offset: config.vertical_offset,
            release_distance: config.snap_release_distance,
            default_scale: config.default_scale,
            ghost: None,
        }
    }

    /// Create the ghost for `entry`, replacing any previous one.
    ///
    /// The new ghost starts where the old one was so it does not flash at the origin.
    pub fn on_selection_activated(&mut self, index: usize, entry: &CatalogEntry) {
        let scale = entry.scale_or(self.default_scale);
        let pose = self.ghost.as_ref().map(|g| g.pose).unwrap_or_default();

        self.ghost = Some(GhostInstance {
            entry_index: index,
            template: entry.preview.clone(),
            object_type: entry.object_type,
            scale,
            pose,
            active: true,
            tracker: SnapZoneTracker::new(scale, self.vertical_offset, self.release_distance),
        });

        log::debug!("ghost '{}' activated for entry {}", entry.preview, index);
    }

    /// Mark the current ghost inactive. The host decides whether to hide,
    /// destroy or reuse its preview.
    pub fn on_selection_deactivated(&mut self) {
        if let Some(ghost) = self.ghost.as_mut() {
            ghost.active = false;
            ghost.tracker.clear();
            log::debug!("ghost '{}' deactivated", ghost.template);
        }
    }

    /// Per-tick ground update: run the staleness guard, then move the ghost
    /// straight to its effective pose. Returns the applied pose.
    pub fn update(&mut self, cursor: Vec3, rotation: Quat) -> Option<Pose> {
        let ghost = self.active_ghost_mut()?;
        ghost.tracker.refresh(cursor);
        ghost.pose = ghost.effective_pose(cursor, rotation);
        Some(ghost.pose)
    }

    /// Tick without a ground update.
    pub fn advance_tick(&mut self) {
        if let Some(ghost) = self.active_ghost_mut() {
            ghost.tracker.advance_tick();
        }
    }

    pub fn on_zone_overlap_enter(&mut self, zone: SnapZone) {
        if let Some(ghost) = self.active_ghost_mut() {
            ghost.tracker.on_zone_enter(zone);
        }
    }

    pub fn on_zone_overlap_exit(&mut self, id: ZoneId) {
        if let Some(ghost) = self.active_ghost_mut() {
            ghost.tracker.on_zone_exit(id);
        }
    }

    /// The ghost, active or not.
    pub fn ghost(&self) -> Option<&GhostInstance> {
        self.ghost.as_ref()
    }

    pub fn active_ghost(&self) -> Option<&GhostInstance> {
        self.ghost.as_ref().filter(|g| g.active)
    }

    pub fn active_ghost_mut(&mut self) -> Option<&mut GhostInstance> {
        self.ghost.as_mut().filter(|g| g.active)
    }
}
