//! Snap Zone Tracking
//!
//! Each ghost owns one [`SnapZoneTracker`]. Overlap signals from the host's
//! trigger layer move it between FREE and SNAPPED; while snapped the ghost
//! is pinned next to the zone's anchor instead of following the cursor.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::world::InstanceId;

/// Cursor distance from the snapped position that releases a stale snap
pub const SNAP_RELEASE_DISTANCE: f32 = 1.0;

/// Side of a placed piece a snap zone is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SnapSide {
    Front,
    Back,
    Left,
    Right,
}

impl SnapSide {
    pub const ALL: [SnapSide; 4] = [Self::Front, Self::Back, Self::Left, Self::Right];

    /// Outward unit direction of this side.
    pub fn direction(self) -> Vec3 {
        match self {
            Self::Front => Vec3::Z,
            Self::Back => Vec3::NEG_Z,
            Self::Left => Vec3::NEG_X,
            Self::Right => Vec3::X,
        }
    }

    /// Offset from the anchor to the centre of a piece of `scale` snapped on this side.
    ///
    /// FRONT/BACK move along Z by half the Z-scale, LEFT/RIGHT along X by half the X-scale.
    pub fn offset(self, scale: Vec3) -> Vec3 {
        match self {
            Self::Front | Self::Back => self.direction() * (scale.z * 0.5),
            Self::Left | Self::Right => self.direction() * (scale.x * 0.5),
        }
    }

    /// Parse a trigger tag ("SnapZoneLeft", ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SnapZoneFront" => Some(Self::Front),
            "SnapZoneBack" => Some(Self::Back),
            "SnapZoneLeft" => Some(Self::Left),
            "SnapZoneRight" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Identity of a snap zone: the placed piece it belongs to and its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneId {
    pub owner: InstanceId,
    pub side: SnapSide,
}

/// Attachment zone on a placed piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapZone {
    pub id: ZoneId,
    /// World position the snapped piece is offset from
    pub anchor: Vec3,
}

impl SnapZone {
    pub fn new(owner: InstanceId, side: SnapSide, anchor: Vec3) -> Self {
        Self {
            id: ZoneId { owner, side },
            anchor,
        }
    }

    pub fn side(&self) -> SnapSide {
        self.id.side
    }
}

/// Position and orientation of a ghost or committed piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Pose {
    /// Pose at `position` with identity rotation.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Snap state of one ghost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapState {
    Free,
    Snapped {
        zone: SnapZone,
        /// Last snapped position, used by the staleness check
        position: Vec3,
    },
}

#[derive(Debug, Clone, Copy)]
struct Overlap {
    zone: SnapZone,
    entered_tick: u64,
}

impl Overlap {
    fn id(&self) -> ZoneId {
        self.zone.id
    }
}

/// Per-ghost FREE/SNAPPED state machine.
///
/// Zones entered on a later tick win over earlier ones. Zones entered on the
/// same tick are ordered by anchor distance to the last known cursor point,
/// nearest first. Exiting the current zone falls back to the most recent
/// zone still overlapped.
#[derive(Debug, Clone)]
pub struct SnapZoneTracker {
    scale: Vec3,
    vertical_offset: f32,
    release_distance: f32,
    /// Zones currently overlapped, in enter order
    overlaps: Vec<Overlap>,
    state: SnapState,
    tick: u64,
    last_cursor: Option<Vec3>,
}

impl SnapZoneTracker {
    /// `scale` is the ghost's scale, `vertical_offset` half the piece height.
    pub fn new(scale: Vec3, vertical_offset: f32, release_distance: f32) -> Self {
        Self {
            scale,
            vertical_offset,
            release_distance,
            overlaps: Vec::new(),
            state: SnapState::Free,
            tick: 0,
            last_cursor: None,
        }
    }

    pub fn state(&self) -> SnapState {
        self.state
    }

    pub fn is_snapped(&self) -> bool {
        matches!(self.state, SnapState::Snapped { .. })
    }

    pub fn current_zone(&self) -> Option<SnapZone> {
        match self.state {
            SnapState::Snapped { zone, .. } => Some(zone),
            SnapState::Free => None,
        }
    }

    /// Number of zones the ghost currently overlaps.
    pub fn overlap_count(&self) -> usize {
        self.overlaps.len()
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Overlap-enter signal from the trigger layer.
    pub fn on_zone_enter(&mut self, zone: SnapZone) {
        self.overlaps.retain(|o| o.id() != zone.id);
        self.overlaps.push(Overlap {
            zone,
            entered_tick: self.tick,
        });
        log::debug!(
            "snap zone {:?} of {} entered (anchor {:?})",
            zone.side(),
            zone.id.owner,
            zone.anchor
        );
        self.resolve();
    }

    /// Overlap-exit signal from the trigger layer. Unknown zones are ignored.
    pub fn on_zone_exit(&mut self, id: ZoneId) {
        let before = self.overlaps.len();
        self.overlaps.retain(|o| o.id() != id);
        if self.overlaps.len() == before {
            return;
        }

        log::debug!("snap zone {:?} of {} exited", id.side, id.owner);
        if self.current_zone().is_some_and(|zone| zone.id == id) {
            self.resolve();
        }
    }

    /// Per-tick staleness guard, called with the live cursor point.
    ///
    /// Releases the snap (and forgets every tracked overlap) when the cursor
    /// is further than the release distance from the last snapped position;
    /// only a fresh enter signal snaps again.
    pub fn refresh(&mut self, cursor: Vec3) {
        if let SnapState::Snapped { zone, position } = self.state
            && position.distance(cursor) > self.release_distance
        {
            log::debug!(
                "cursor moved {:.2} away from {:?} snap of {}, releasing",
                position.distance(cursor),
                zone.side(),
                zone.id.owner
            );
            self.clear();
        }

        self.last_cursor = Some(cursor);
        self.advance_tick();
    }

    /// Close the current tick without a ground update (object hit, no hit),
    /// so zones entered on the next tick still rank as later.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// Drop all overlaps and return to FREE.
    pub fn clear(&mut self) {
        self.overlaps.clear();
        self.state = SnapState::Free;
    }

    /// Ghost position when snapped to `zone`.
    pub fn snapped_position(&self, zone: &SnapZone) -> Vec3 {
        zone.anchor + zone.side().offset(self.scale) + Vec3::Y * self.vertical_offset
    }

    /// Snapped pose, if snapped. Rotation stays identity.
    pub fn snapped_pose(&self) -> Option<Pose> {
        match self.state {
            SnapState::Snapped { position, .. } => Some(Pose::new(position)),
            SnapState::Free => None,
        }
    }

    /// Snapped pose when SNAPPED, else the cursor point with Y pinned to the
    /// vertical offset.
    pub fn effective_pose(&self, cursor: Vec3) -> Pose {
        self.snapped_pose().unwrap_or_else(|| {
            Pose::new(Vec3::new(cursor.x, self.vertical_offset, cursor.z))
        })
    }

    fn resolve(&mut self) {
        let Some(latest) = self.overlaps.iter().map(|o| o.entered_tick).max() else {
            self.state = SnapState::Free;
            return;
        };

        let cursor = self.last_cursor;
        let distance = |o: &Overlap| cursor.map_or(0.0, |c| o.zone.anchor.distance(c));

        // Later entries win exact ties, so iterate newest first
        let best = self
            .overlaps
            .iter()
            .rev()
            .filter(|o| o.entered_tick == latest)
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
            .map(|o| o.zone);

        self.state = match best {
            Some(zone) => SnapState::Snapped {
                zone,
                position: self.snapped_position(&zone),
            },
            None => SnapState::Free,
        };
    }
}
