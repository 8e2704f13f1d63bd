//! Snap Build Engine Library
//!
//! Ghost-preview placement of modular building pieces (foundations, walls,
//! pillars, roofs, doorways) with snap-to-neighbour alignment.
//!
//! # Modules
//!
//! - [`world`] - Surface hits, hit classification and an in-memory reference scene
//! - [`camera`] - Screen-to-world rays and ray/plane, ray/box intersection
//! - [`input`] - Edge-triggered primary/secondary build actions
//! - [`game`] - Catalog, placement rules, snap tracking, ghost preview and the build loop
//!
//! # Example
//!
//! ```ignore
//! use snap_build_engine::game::config::CatalogConfig;
//! use snap_build_engine::game::systems::BuildSystem;
//! use snap_build_engine::input::ActionButtons;
//! use snap_build_engine::world::Scene;
//!
//! let config = CatalogConfig::load("catalog.json".as_ref())?;
//! let mut scene = Scene::new(0.0);
//! let mut system = BuildSystem::new(&config.build, config.catalog, &mut scene)?;
//! let mut buttons = ActionButtons::new();
//!
//! // Once per frame
//! scene.aim_at(cursor_point);
//! let actions = buttons.update(left_down, right_down);
//! let outcome = system.tick(&mut scene, actions)?;
//! ```

pub mod camera;
pub mod input;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use input::{ActionButtons, ActionState};
pub use world::{HitEvent, Scene, SurfaceCategory, SurfaceGeometry, SurfaceHit};
