//! Placement Director
//!
//! Turns one classified hit plus this tick's actions into a commit or a
//! removal, consulting [`PlacementRules`] and the ghost's snap state.

use glam::{Quat, Vec3};

use super::catalog::{Catalog, ObjectType, TemplateId};
use super::error::BuildError;
use super::ghost::GhostInstance;
use super::rules::PlacementRules;
use super::snap::Pose;
use crate::input::ActionState;
use crate::world::{InstanceId, SurfaceCategory};

/// Outbound effects requested from the host's scene layer.
pub trait StructureHost {
    /// Create a final piece from `template` and return its identity.
    fn request_instantiate(&mut self, template: &TemplateId, pose: Pose) -> InstanceId;

    /// Destroy a placed piece.
    fn request_destroy(&mut self, instance: InstanceId);

    /// Selection changed; hosts without UI can ignore it.
    fn notify_selection_changed(&mut self, _index: usize, _object_type: ObjectType) {}
}

/// Per-tick placement decision. Never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementDecision {
    /// Surface accepts a piece this tick
    pub allowed: bool,
    pub pose: Pose,
    /// Pose comes from a snap zone rather than the cursor
    pub snapped: bool,
}

/// Result of a ground hit.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    /// Surface too steep; nothing happens this tick
    InvalidSurface,
    /// No commit was triggered
    Idle,
    /// Commit triggered with no active ghost
    NoSelection,
    /// A final piece was requested
    Placed {
        instance: InstanceId,
        index: usize,
        pose: Pose,
        snapped: bool,
        remaining: u32,
    },
}

/// Result of a structure hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Category can never be removed
    NotRemovable,
    /// Removable, but no remove action this tick
    Idle,
    Removed(InstanceId),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementDirector {
    rules: PlacementRules,
}

impl PlacementDirector {
    pub fn new(rules: PlacementRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PlacementRules {
        &self.rules
    }

    /// Decide where a piece would go for this ground hit and whether it may.
    pub fn decide(
        &self,
        point: Vec3,
        normal: Vec3,
        rotation: Quat,
        ghost: Option<&GhostInstance>,
    ) -> PlacementDecision {
        let allowed = self.rules.is_slope_acceptable(normal);
        match ghost {
            Some(ghost) => PlacementDecision {
                allowed,
                pose: ghost.effective_pose(point, rotation),
                snapped: ghost.is_snapped(),
            },
            None => PlacementDecision {
                allowed,
                pose: Pose::new(point).with_rotation(rotation),
                snapped: false,
            },
        }
    }

    /// Ground hit: commit the selected entry when the primary action began
    /// this tick and the surface is flat enough.
    ///
    /// Depleted entries report [`BuildError::DepletedCatalogEntry`] and
    /// nothing is instantiated.
    pub fn on_ground_hit(
        &self,
        point: Vec3,
        normal: Vec3,
        rotation: Quat,
        actions: ActionState,
        ghost: Option<&GhostInstance>,
        catalog: &mut Catalog,
        host: &mut dyn StructureHost,
    ) -> Result<PlacementOutcome, BuildError> {
        let decision = self.decide(point, normal, rotation, ghost);
        self.commit(&decision, actions, ghost, catalog, host)
    }

    /// Act on a decision already made for this tick's ground hit.
    pub fn commit(
        &self,
        decision: &PlacementDecision,
        actions: ActionState,
        ghost: Option<&GhostInstance>,
        catalog: &mut Catalog,
        host: &mut dyn StructureHost,
    ) -> Result<PlacementOutcome, BuildError> {
        if !decision.allowed {
            return Ok(PlacementOutcome::InvalidSurface);
        }

        if !actions.primary {
            return Ok(PlacementOutcome::Idle);
        }

        let Some(ghost) = ghost else {
            log::debug!("commit ignored: nothing selected");
            return Ok(PlacementOutcome::NoSelection);
        };

        let index = ghost.entry_index;
        let remaining = catalog.consume(index).inspect_err(|_| {
            log::warn!("commit ignored: catalog entry {} is depleted", index);
        })?;
        let template = catalog.entry(index)?.final_template.clone();

        let instance = host.request_instantiate(&template, decision.pose);
        log::info!(
            "placed '{}' as {} at ({:.2}, {:.2}, {:.2}){}, {} left",
            template,
            instance,
            decision.pose.position.x,
            decision.pose.position.y,
            decision.pose.position.z,
            if decision.snapped { " [snapped]" } else { "" },
            remaining
        );

        Ok(PlacementOutcome::Placed {
            instance,
            index,
            pose: decision.pose,
            snapped: decision.snapped,
            remaining,
        })
    }

    /// Structure hit: destroy the target when it is removable and the
    /// secondary action began this tick.
    pub fn on_object_hit(
        &self,
        target: InstanceId,
        category: SurfaceCategory,
        actions: ActionState,
        host: &mut dyn StructureHost,
    ) -> RemovalOutcome {
        if !PlacementRules::is_removable(category) {
            return RemovalOutcome::NotRemovable;
        }

        if !actions.secondary {
            return RemovalOutcome::Idle;
        }

        host.request_destroy(target);
        log::info!("removed {} {}", category.tag(), target);
        RemovalOutcome::Removed(target)
    }
}
