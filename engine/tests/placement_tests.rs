//! Placement Tests - Slope Rule, Snap Tracking and Commit/Removal
//!
//! Exercises the build loop through `BuildSystem::tick_with_hit` with a
//! recording host, so no scene geometry is involved.

use glam::{Quat, Vec3};
use snap_build_engine::game::builder::{
    BuildError, Catalog, CatalogEntry, ObjectStyle, ObjectType, PlacementOutcome, PlacementRules,
    Pose, RemovalOutcome, SnapSide, SnapState, SnapZone, SnapZoneTracker, StructureHost,
    TemplateId, ZoneId,
};
use snap_build_engine::game::config::BuildConfig;
use snap_build_engine::game::systems::{BuildSystem, TickOutcome};
use snap_build_engine::input::ActionState;
use snap_build_engine::world::{InstanceId, SurfaceCategory, SurfaceHit};

#[derive(Default)]
struct Recorder {
    placed: Vec<(TemplateId, Pose)>,
    destroyed: Vec<InstanceId>,
    selections: Vec<(usize, ObjectType)>,
}

impl StructureHost for Recorder {
    fn request_instantiate(&mut self, template: &TemplateId, pose: Pose) -> InstanceId {
        self.placed.push((template.clone(), pose));
        InstanceId(self.placed.len() as u32)
    }

    fn request_destroy(&mut self, instance: InstanceId) {
        self.destroyed.push(instance);
    }

    fn notify_selection_changed(&mut self, index: usize, object_type: ObjectType) {
        self.selections.push((index, object_type));
    }
}

fn foundation_catalog(quantity: u32) -> Catalog {
    Catalog::new(vec![
        CatalogEntry::new("foundation_ghost", "foundation", ObjectType::Foundation, ObjectStyle::Wood, quantity),
        CatalogEntry::new("wall_ghost", "wall", ObjectType::Wall, ObjectStyle::Stone, quantity),
    ])
}

fn build_system(quantity: u32, host: &mut Recorder) -> BuildSystem {
    BuildSystem::new(&BuildConfig::default(), foundation_catalog(quantity), host)
        .expect("initial selection in range")
}

fn tilted(degrees: f32) -> Vec3 {
    let r = degrees.to_radians();
    Vec3::new(r.sin(), r.cos(), 0.0)
}

fn tracker() -> SnapZoneTracker {
    SnapZoneTracker::new(Vec3::new(2.0, 0.5, 2.0), 0.25, 1.0)
}

fn zone(owner: u32, side: SnapSide, anchor: Vec3) -> SnapZone {
    SnapZone::new(InstanceId(owner), side, anchor)
}

// ============================================================================
// Slope Rule
// ============================================================================

#[test]
fn test_slope_accepted_iff_within_limit() {
    let rules = PlacementRules::default();
    for degrees in [0.0, 5.0, 20.0, 30.0, 44.0, 44.9, 45.0, 45.0002, 45.1, 46.0, 60.0, 80.0, 89.0, 90.0] {
        assert_eq!(
            rules.is_slope_acceptable(tilted(degrees)),
            degrees <= 45.0,
            "slope of {} degrees",
            degrees
        );
    }
}

#[test]
fn test_slope_limit_is_configurable() {
    let rules = PlacementRules::new(30.0);
    assert!(rules.is_slope_acceptable(tilted(30.0)));
    assert!(!rules.is_slope_acceptable(tilted(31.0)));
}

#[test]
fn test_vertical_wall_never_instantiates() {
    let mut host = Recorder::default();
    let mut system = build_system(10, &mut host);

    for _ in 0..5 {
        let hit = SurfaceHit::ground(Vec3::new(1.0, 0.0, 1.0), Vec3::X);
        let outcome = system
            .tick_with_hit(Some(hit), ActionState::PRIMARY, &mut host)
            .expect("no error on steep surface");
        assert!(matches!(
            outcome,
            TickOutcome::Ground {
                placement: PlacementOutcome::InvalidSurface,
                ..
            }
        ));
    }

    assert!(host.placed.is_empty());
    assert_eq!(system.catalog().remaining(0), 10);
}

#[test]
fn test_ghost_follows_steep_ground() {
    let mut host = Recorder::default();
    let mut system = build_system(1, &mut host);

    let hit = SurfaceHit::ground(Vec3::new(4.0, 1.0, -2.0), tilted(70.0));
    system
        .tick_with_hit(Some(hit), ActionState::NONE, &mut host)
        .expect("ok");
    assert_eq!(
        system.ghost_pose().map(|p| p.position),
        Some(Vec3::new(4.0, 0.25, -2.0))
    );
}

// ============================================================================
// Commit and Quantity
// ============================================================================

#[test]
fn test_free_commit_uses_cursor_xz_and_offset() {
    let mut host = Recorder::default();
    let mut system = build_system(3, &mut host);

    let hit = SurfaceHit::ground(Vec3::new(-3.5, 0.7, 8.0), Vec3::Y);
    system
        .tick_with_hit(Some(hit), ActionState::PRIMARY, &mut host)
        .expect("placed");

    assert_eq!(host.placed.len(), 1);
    let (template, pose) = &host.placed[0];
    assert_eq!(template.as_str(), "foundation");
    assert_eq!(pose.position, Vec3::new(-3.5, 0.25, 8.0));
    assert_eq!(pose.rotation, Quat::IDENTITY);
}

#[test]
fn test_commits_bounded_by_quantity() {
    for quantity in 0..4u32 {
        for attempts in 0..6usize {
            let mut host = Recorder::default();
            let mut system = build_system(quantity, &mut host);
            let mut depleted = 0;

            for i in 0..attempts {
                let hit = SurfaceHit::ground(Vec3::new(i as f32 * 5.0, 0.0, 0.0), Vec3::Y);
                match system.tick_with_hit(Some(hit), ActionState::PRIMARY, &mut host) {
                    Ok(_) => {}
                    Err(BuildError::DepletedCatalogEntry { index: 0 }) => depleted += 1,
                    Err(other) => panic!("unexpected error {other}"),
                }
            }

            let expected = attempts.min(quantity as usize);
            assert_eq!(host.placed.len(), expected);
            assert_eq!(depleted, attempts - expected);
            assert_eq!(
                system.catalog().remaining(0),
                quantity - expected as u32
            );
        }
    }
}

#[test]
fn test_no_commit_without_primary() {
    let mut host = Recorder::default();
    let mut system = build_system(3, &mut host);

    let hit = SurfaceHit::ground(Vec3::ZERO, Vec3::Y);
    let outcome = system
        .tick_with_hit(Some(hit), ActionState::SECONDARY, &mut host)
        .expect("ok");
    assert!(matches!(
        outcome,
        TickOutcome::Ground {
            placement: PlacementOutcome::Idle,
            ..
        }
    ));
    assert!(host.placed.is_empty());
}

// ============================================================================
// Snapped Placement
// ============================================================================

#[test]
fn test_left_zone_scenario() {
    let mut host = Recorder::default();
    let mut system = build_system(1, &mut host);

    let cursor = Vec3::new(9.3, 0.0, 10.2);
    system
        .tick_with_hit(Some(SurfaceHit::ground(cursor, Vec3::Y)), ActionState::NONE, &mut host)
        .expect("ok");
    system.on_zone_overlap_enter(zone(7, SnapSide::Left, Vec3::new(10.0, 0.0, 10.0)));

    let outcome = system
        .tick_with_hit(Some(SurfaceHit::ground(cursor, Vec3::Y)), ActionState::PRIMARY, &mut host)
        .expect("placed");
    match outcome {
        TickOutcome::Ground {
            placement: PlacementOutcome::Placed { pose, snapped, remaining, .. },
            ..
        } => {
            assert_eq!(pose.position, Vec3::new(9.0, 0.25, 10.0));
            assert!(snapped);
            assert_eq!(remaining, 0);
        }
        other => panic!("expected placement, got {other:?}"),
    }

    let again = system.tick_with_hit(Some(SurfaceHit::ground(cursor, Vec3::Y)), ActionState::PRIMARY, &mut host);
    assert_eq!(again, Err(BuildError::DepletedCatalogEntry { index: 0 }));
    assert_eq!(host.placed.len(), 1);
}

#[test]
fn test_snapped_commit_ignores_cursor_within_release_distance() {
    let mut host = Recorder::default();
    let mut system = build_system(2, &mut host);
    system.on_zone_overlap_enter(zone(1, SnapSide::Front, Vec3::ZERO));

    // Snapped position is (0, 0.25, 1); cursor 0.6 away
    let hit = SurfaceHit::ground(Vec3::new(0.6, 0.25, 1.0), Vec3::Y);
    system
        .tick_with_hit(Some(hit), ActionState::PRIMARY, &mut host)
        .expect("placed");
    assert_eq!(host.placed[0].1.position, Vec3::new(0.0, 0.25, 1.0));
}

#[test]
fn test_stale_snap_releases_before_commit() {
    let mut host = Recorder::default();
    let mut system = build_system(2, &mut host);
    system.on_zone_overlap_enter(zone(1, SnapSide::Right, Vec3::ZERO));

    let hit = SurfaceHit::ground(Vec3::new(5.0, 0.0, 5.0), Vec3::Y);
    system
        .tick_with_hit(Some(hit), ActionState::PRIMARY, &mut host)
        .expect("placed");

    assert_eq!(host.placed[0].1.position, Vec3::new(5.0, 0.25, 5.0));
    assert!(system.ghost().is_some_and(|g| !g.is_snapped()));
}

// ============================================================================
// Snap Zone Tracker Sequences
// ============================================================================

#[test]
fn test_enter_after_object_hit_tick_ranks_later() {
    let mut host = Recorder::default();
    let mut system = build_system(1, &mut host);
    system
        .tick_with_hit(Some(SurfaceHit::ground(Vec3::ZERO, Vec3::Y)), ActionState::NONE, &mut host)
        .expect("ok");

    let near = zone(1, SnapSide::Front, Vec3::new(0.0, 0.0, -0.5));
    let far = zone(2, SnapSide::Right, Vec3::new(-3.0, 0.0, 0.0));
    system.on_zone_overlap_enter(near);

    let wall = SurfaceHit::structure(Vec3::ZERO, Vec3::Z, SurfaceCategory::Wall, InstanceId(9));
    system
        .tick_with_hit(Some(wall), ActionState::NONE, &mut host)
        .expect("ok");
    system.on_zone_overlap_enter(far);

    let current = system.ghost().and_then(|g| g.tracker().current_zone());
    assert_eq!(current, Some(far));
}

#[test]
fn test_enter_after_empty_tick_ranks_later() {
    let mut host = Recorder::default();
    let mut system = build_system(1, &mut host);
    system
        .tick_with_hit(Some(SurfaceHit::ground(Vec3::ZERO, Vec3::Y)), ActionState::NONE, &mut host)
        .expect("ok");

    let near = zone(1, SnapSide::Front, Vec3::new(0.0, 0.0, -0.5));
    let far = zone(2, SnapSide::Right, Vec3::new(-3.0, 0.0, 0.0));
    system.on_zone_overlap_enter(near);
    assert_eq!(
        system.tick_with_hit(None, ActionState::NONE, &mut host),
        Ok(TickOutcome::NoHit)
    );
    system.on_zone_overlap_enter(far);

    let current = system.ghost().and_then(|g| g.tracker().current_zone());
    assert_eq!(current, Some(far));
}

#[test]
fn test_enter_exit_sequence() {
    let mut t = tracker();
    let a = zone(1, SnapSide::Front, Vec3::ZERO);
    let b = zone(2, SnapSide::Back, Vec3::new(0.0, 0.0, 0.5));

    // Cursor stays within release distance of both snapped positions
    let cursor = Vec3::new(0.0, 0.25, 0.5);
    t.refresh(cursor);
    t.on_zone_enter(a);
    assert_eq!(t.current_zone(), Some(a));

    t.refresh(cursor);
    t.on_zone_enter(b);
    assert_eq!(t.current_zone(), Some(b));

    // Exit of a non-current zone keeps the snap
    t.on_zone_exit(a.id);
    assert_eq!(t.current_zone(), Some(b));

    t.on_zone_exit(b.id);
    assert_eq!(t.state(), SnapState::Free);
}

#[test]
fn test_exit_current_falls_back_to_remaining_overlap() {
    let mut t = tracker();
    let a = zone(1, SnapSide::Left, Vec3::ZERO);
    let b = zone(2, SnapSide::Left, Vec3::new(0.0, 0.0, 0.3));

    t.on_zone_enter(a);
    t.refresh(Vec3::new(-0.5, 0.25, 0.0));
    t.on_zone_enter(b);
    t.on_zone_exit(b.id);

    assert_eq!(t.current_zone(), Some(a));
    assert_eq!(
        t.snapped_pose().map(|p| p.position),
        Some(Vec3::new(-1.0, 0.25, 0.0))
    );
}

#[test]
fn test_same_tick_enters_pick_nearest_anchor() {
    let mut t = tracker();
    t.refresh(Vec3::new(4.0, 0.0, 0.0));

    let far = zone(1, SnapSide::Right, Vec3::ZERO);
    let near = zone(2, SnapSide::Left, Vec3::new(5.0, 0.0, 0.0));
    t.on_zone_enter(far);
    t.on_zone_enter(near);
    assert_eq!(t.current_zone(), Some(near));

    // Order of arrival does not matter
    let mut t = tracker();
    t.refresh(Vec3::new(4.0, 0.0, 0.0));
    t.on_zone_enter(near);
    t.on_zone_enter(far);
    assert_eq!(t.current_zone(), Some(near));
}

#[test]
fn test_exit_of_unknown_zone_is_ignored() {
    let mut t = tracker();
    let a = zone(1, SnapSide::Front, Vec3::ZERO);
    t.on_zone_enter(a);
    t.on_zone_exit(ZoneId {
        owner: InstanceId(99),
        side: SnapSide::Front,
    });
    assert_eq!(t.current_zone(), Some(a));
    assert_eq!(t.overlap_count(), 1);
}

#[test]
fn test_staleness_clears_all_overlaps() {
    let mut t = tracker();
    t.on_zone_enter(zone(1, SnapSide::Front, Vec3::ZERO));
    t.on_zone_enter(zone(2, SnapSide::Back, Vec3::ZERO));
    assert_eq!(t.overlap_count(), 2);

    t.refresh(Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(t.state(), SnapState::Free);
    assert_eq!(t.overlap_count(), 0);
}

#[test]
fn test_release_distance_is_exclusive() {
    let mut t = tracker();
    t.on_zone_enter(zone(1, SnapSide::Front, Vec3::ZERO));

    // Snapped at (0, 0.25, 1); exactly 1.0 away stays snapped
    t.refresh(Vec3::new(0.0, 0.25, 2.0));
    assert!(t.is_snapped());

    t.refresh(Vec3::new(0.0, 0.25, 2.01));
    assert!(!t.is_snapped());
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_floor_hit_never_destroys() {
    let mut host = Recorder::default();
    let mut system = build_system(1, &mut host);

    let floor = SurfaceHit {
        point: Vec3::ZERO,
        normal: Vec3::Y,
        category: SurfaceCategory::Floor,
        target: Some(InstanceId(3)),
    };
    for actions in [ActionState::SECONDARY, ActionState::NONE] {
        system
            .tick_with_hit(Some(floor), actions, &mut host)
            .expect("ok");
    }
    assert!(host.destroyed.is_empty());
}

#[test]
fn test_removable_categories() {
    let cases = [
        (SurfaceCategory::Foundation, true),
        (SurfaceCategory::Roof, true),
        (SurfaceCategory::Pillar, true),
        (SurfaceCategory::Doorway, true),
        (SurfaceCategory::Wall, false),
        (SurfaceCategory::Door, false),
    ];

    for (index, (category, removable)) in cases.into_iter().enumerate() {
        let mut host = Recorder::default();
        let mut system = build_system(1, &mut host);
        let target = InstanceId(index as u32 + 1);
        let hit = SurfaceHit::structure(Vec3::ZERO, Vec3::Y, category, target);

        let outcome = system
            .tick_with_hit(Some(hit), ActionState::SECONDARY, &mut host)
            .expect("ok");
        if removable {
            assert_eq!(outcome, TickOutcome::Object(RemovalOutcome::Removed(target)));
            assert_eq!(host.destroyed, vec![target]);
        } else {
            assert_eq!(outcome, TickOutcome::Object(RemovalOutcome::NotRemovable));
            assert!(host.destroyed.is_empty(), "{:?} must not be removed", category);
        }
    }
}

#[test]
fn test_removal_needs_secondary() {
    let mut host = Recorder::default();
    let mut system = build_system(1, &mut host);
    let hit = SurfaceHit::structure(Vec3::ZERO, Vec3::Y, SurfaceCategory::Roof, InstanceId(4));

    let outcome = system
        .tick_with_hit(Some(hit), ActionState::PRIMARY, &mut host)
        .expect("ok");
    assert_eq!(outcome, TickOutcome::Object(RemovalOutcome::Idle));
    assert!(host.destroyed.is_empty());
    assert!(host.placed.is_empty());
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_out_of_range_selection_keeps_state() {
    let mut host = Recorder::default();
    let mut system = build_system(1, &mut host);
    system.on_zone_overlap_enter(zone(1, SnapSide::Front, Vec3::ZERO));

    let result = system.select(2, &mut host);
    assert_eq!(result, Err(BuildError::OutOfRangeSelection { index: 2, len: 2 }));
    assert_eq!(system.selection().current(), Some(0));
    assert!(system.ghost().is_some_and(|g| g.is_snapped()));
}

#[test]
fn test_selection_notifies_host() {
    let mut host = Recorder::default();
    let mut system = build_system(1, &mut host);
    system.select_next(&mut host).expect("in range");
    system.select_next(&mut host).expect("in range");
    system.select_previous(&mut host).expect("in range");

    assert_eq!(
        host.selections,
        vec![
            (0, ObjectType::Foundation),
            (1, ObjectType::Wall),
            (0, ObjectType::Foundation),
            (1, ObjectType::Wall),
        ]
    );
}
