//! Build loop.
//!
//! Owns the catalog, selection, ghost and director, and runs one placement
//! cycle per tick from a single surface query. Replaces the global event
//! broadcaster with plain method calls: the host holds one `BuildSystem` and
//! passes hits and actions in.

use glam::Quat;

use crate::game::builder::{
    BuildError, Catalog, GhostController, GhostInstance, PlacementDecision, PlacementDirector,
    PlacementOutcome, PlacementRules, Pose, RemovalOutcome, SelectionState, SnapZone,
    StructureHost, ZoneId,
};
use crate::game::config::BuildConfig;
use crate::input::ActionState;
use crate::world::{HitEvent, SurfaceGeometry, SurfaceHit};

/// What one tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// System switched off; the hit was not consumed
    Disabled,
    /// The ray hit nothing
    NoHit,
    /// The surface is neither ground nor a placed piece
    Ignored,
    /// Ground hit: ghost updated, placement evaluated
    Ground {
        decision: PlacementDecision,
        placement: PlacementOutcome,
    },
    /// Placed piece hit: removal evaluated
    Object(RemovalOutcome),
}

pub struct BuildSystem {
    catalog: Catalog,
    selection: SelectionState,
    ghosts: GhostController,
    director: PlacementDirector,
    rotation: Quat,
    enabled: bool,
}

impl BuildSystem {
    /// Create the build system and activate `config.initial_selection`.
    pub fn new(
        config: &BuildConfig,
        catalog: Catalog,
        host: &mut dyn StructureHost,
    ) -> Result<Self, BuildError> {
        let mut system = Self {
            catalog,
            selection: SelectionState::new(),
            ghosts: GhostController::new(config),
            director: PlacementDirector::new(PlacementRules::new(config.max_slope_degrees)),
            rotation: Quat::IDENTITY,
            enabled: true,
        };
        system.select(config.initial_selection, host)?;
        Ok(system)
    }

    /// Run one cycle: query the surface once and dispatch the classified hit.
    pub fn tick<W>(&mut self, world: &mut W, actions: ActionState) -> Result<TickOutcome, BuildError>
    where
        W: SurfaceGeometry + StructureHost,
    {
        if !self.enabled {
            return Ok(TickOutcome::Disabled);
        }
        let hit = world.query_surface_hit();
        self.tick_with_hit(hit, actions, world)
    }

    /// Run one cycle from a hit the host already queried.
    ///
    /// Ground hits update the ghost first, then the director evaluates the
    /// commit against the refreshed snap state. Structure hits only reach
    /// the director. Every tick advances the ghost's snap tick exactly once.
    pub fn tick_with_hit(
        &mut self,
        hit: Option<SurfaceHit>,
        actions: ActionState,
        host: &mut dyn StructureHost,
    ) -> Result<TickOutcome, BuildError> {
        if !self.enabled {
            return Ok(TickOutcome::Disabled);
        }

        let Some(hit) = hit else {
            self.ghosts.advance_tick();
            return Ok(TickOutcome::NoHit);
        };

        match HitEvent::classify(&hit) {
            None => {
                self.ghosts.advance_tick();
                Ok(TickOutcome::Ignored)
            }
            Some(HitEvent::Ground { point, normal }) => {
                self.ghosts.update(point, self.rotation);

                let ghost = self.ghosts.active_ghost();
                let decision = self.director.decide(point, normal, self.rotation, ghost);
                let placement = self
                    .director
                    .commit(&decision, actions, ghost, &mut self.catalog, host)?;

                Ok(TickOutcome::Ground {
                    decision,
                    placement,
                })
            }
            Some(HitEvent::Object { target, category }) => {
                self.ghosts.advance_tick();
                Ok(TickOutcome::Object(
                    self.director.on_object_hit(target, category, actions, host),
                ))
            }
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select(&mut self, index: usize, host: &mut dyn StructureHost) -> Result<(), BuildError> {
        self.selection
            .set_selection(index, &self.catalog, &mut self.ghosts, host)
    }

    pub fn select_next(&mut self, host: &mut dyn StructureHost) -> Result<(), BuildError> {
        self.selection
            .select_next(&self.catalog, &mut self.ghosts, host)
    }

    pub fn select_previous(&mut self, host: &mut dyn StructureHost) -> Result<(), BuildError> {
        self.selection
            .select_previous(&self.catalog, &mut self.ghosts, host)
    }

    // ------------------------------------------------------------------
    // Trigger layer signals
    // ------------------------------------------------------------------

    pub fn on_zone_overlap_enter(&mut self, zone: SnapZone) {
        self.ghosts.on_zone_overlap_enter(zone);
    }

    pub fn on_zone_overlap_exit(&mut self, id: ZoneId) {
        self.ghosts.on_zone_overlap_exit(id);
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Switch the whole system on or off. While off, ticks do nothing.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::info!("build system {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Rotation applied on top of the effective pose for ghost and commits.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn ghost(&self) -> Option<&GhostInstance> {
        self.ghosts.active_ghost()
    }

    /// Pose the host should render the ghost at.
    pub fn ghost_pose(&self) -> Option<Pose> {
        self.ghost().map(|g| g.pose)
    }

    pub fn director(&self) -> &PlacementDirector {
        &self.director
    }
}
