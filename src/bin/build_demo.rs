//! Build Demo - Scripted Placement Session
//!
//! Drives the build system against the in-memory scene for a handful of
//! frames: place a foundation, snap a second one to its side, try a steep
//! slope, then remove the first piece.
//!
//! Run with: `cargo run --bin build_demo [catalog.json]`
//! Set `RUST_LOG=debug` to see snap enter/exit traffic.

use std::error::Error;
use std::path::Path;

use glam::Vec3;

use snap_build_engine::game::config::CatalogConfig;
use snap_build_engine::game::systems::{BuildSystem, TickOutcome};
use snap_build_engine::input::ActionButtons;
use snap_build_engine::world::Scene;

const BUILTIN_CATALOG: &str = include_str!("../../assets/build_catalog.json");

struct Session {
    scene: Scene,
    system: BuildSystem,
    buttons: ActionButtons,
    frame: u32,
}

impl Session {
    /// One frame: aim, read buttons, tick, then let the scene report ghost
    /// overlaps for the next frame.
    fn frame(&mut self, cursor: Vec3, primary: bool, secondary: bool) -> Result<TickOutcome, Box<dyn Error>> {
        self.frame += 1;
        self.scene.aim_at(cursor);
        let actions = self.buttons.update(primary, secondary);
        let outcome = self.system.tick(&mut self.scene, actions)?;
        self.scene.sync_ghost(&mut self.system);

        log::debug!("frame {}: {:?}", self.frame, outcome);
        Ok(outcome)
    }

    /// Press and release the primary button at `cursor`.
    fn click_primary(&mut self, cursor: Vec3) -> Result<TickOutcome, Box<dyn Error>> {
        let outcome = self.frame(cursor, true, false)?;
        self.frame(cursor, false, false)?;
        Ok(outcome)
    }

    fn click_secondary(&mut self, cursor: Vec3) -> Result<TickOutcome, Box<dyn Error>> {
        let outcome = self.frame(cursor, false, true)?;
        self.frame(cursor, false, false)?;
        Ok(outcome)
    }
}

fn load_config() -> Result<CatalogConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading catalog from {}", path);
            Ok(CatalogConfig::load(Path::new(&path))?)
        }
        None => {
            log::info!("using built-in catalog");
            Ok(CatalogConfig::from_json_str(BUILTIN_CATALOG)?)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let mut scene = Scene::new(0.0);
    scene.register_catalog(&config.catalog, config.build.default_scale);
    let system = BuildSystem::new(&config.build, config.catalog, &mut scene)?;

    let mut session = Session {
        scene,
        system,
        buttons: ActionButtons::new(),
        frame: 0,
    };

    println!("===========================================");
    println!("   Snap Build - Scripted Session");
    println!("===========================================");

    // Free placement
    let first = session.click_primary(Vec3::new(0.0, 0.0, 0.0))?;
    println!("place on flat ground:   {:?}", first);

    // Hover beside the first piece until the ghost snaps, then commit
    session.frame(Vec3::new(2.2, 0.0, 0.3), false, false)?;
    let snapped = session.system.ghost().is_some_and(|g| g.is_snapped());
    println!("ghost snapped:          {}", snapped);
    let second = session.click_primary(Vec3::new(2.2, 0.0, 0.3))?;
    println!("place next to it:       {:?}", second);

    // Steep ground rejects the commit
    session
        .scene
        .set_ground_normal(Vec3::new(1.0, 1.0, 0.0).normalize());
    let steep = session.click_primary(Vec3::new(-6.0, 0.0, -6.0))?;
    println!("place on 45 deg slope:  {:?}", steep);
    session
        .scene
        .set_ground_normal(Vec3::new(2.0, 1.0, 0.0).normalize());
    let steeper = session.click_primary(Vec3::new(-6.0, 0.0, 6.0))?;
    println!("place on ~63 deg slope: {:?}", steeper);
    session.scene.set_ground_normal(Vec3::Y);

    // Remove the first foundation by aiming at its top
    let removed = session.click_secondary(Vec3::new(0.2, 0.0, 0.1))?;
    println!("remove first piece:     {:?}", removed);

    // Cycle the selection once
    session.system.select_next(&mut session.scene)?;

    println!();
    println!("pieces in scene: {}", session.scene.pieces().len());
    for piece in session.scene.pieces() {
        println!(
            "  {} '{}' at ({:.2}, {:.2}, {:.2})",
            piece.id,
            piece.template,
            piece.pose.position.x,
            piece.pose.position.y,
            piece.pose.position.z
        );
    }
    if let Some(entry) = session
        .system
        .selection()
        .current()
        .and_then(|i| session.system.catalog().get(i))
    {
        println!(
            "selected: {} {} ({} left)",
            entry.object_style.name(),
            entry.object_type.name(),
            entry.quantity
        );
    }
    println!(
        "host calls: {} instantiate, {} destroy",
        session.scene.instantiate_count(),
        session.scene.destroy_count()
    );

    Ok(())
}
