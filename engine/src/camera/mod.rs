//! Camera Module
//!
//! Provides the ray math used to turn a cursor into a surface query.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod raycast;

pub use raycast::{get_ray_direction, ray_aabb_intersection, ray_plane_intersection, Ray, RaycastConfig};
