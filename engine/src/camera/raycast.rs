//! Raycast Module
//!
//! Provides the cursor ray and the intersection tests the reference scene
//! uses to answer one nearest-surface query per tick.

use glam::Vec3;

/// A world-space ray with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray pointing straight down onto `point` from `height` units above it.
    ///
    /// Handy for hosts that already know the cursor's ground position.
    pub fn looking_down_at(point: Vec3, height: f32) -> Self {
        Self::new(point + Vec3::Y * height, Vec3::NEG_Y)
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Calculate ray direction from screen UV coordinates
///
/// # Arguments
/// * `camera_pos` - Camera position in world space
/// * `camera_target` - Point the camera is looking at
/// * `uv` - Normalized screen coordinates (0-1, 0-1) where (0,0) is bottom-left
/// * `aspect_ratio` - Screen aspect ratio (width / height)
/// * `fov` - Field of view in radians
///
/// # Returns
/// Normalized ray direction in world space
pub fn get_ray_direction(
    camera_pos: Vec3,
    camera_target: Vec3,
    uv: (f32, f32),
    aspect_ratio: f32,
    fov: f32,
) -> Vec3 {
    let ndc = (uv.0 * 2.0 - 1.0, uv.1 * 2.0 - 1.0);
    let half_fov = (fov * 0.5_f32).tan();

    let forward = (camera_target - camera_pos).normalize();

    // Looking straight up or down - use world X as reference
    let (right, up) = if forward.y.abs() > 0.99 {
        let right = Vec3::X;
        let up = right.cross(forward).normalize();
        (right, up)
    } else {
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        (right, up)
    };

    (forward + right * ndc.0 * aspect_ratio * half_fov + up * ndc.1 * half_fov).normalize()
}

/// Intersect a ray with the horizontal plane `y = plane_height`.
///
/// # Returns
/// * `Some(t)` - Distance along the ray to the intersection
/// * `None` - Ray is parallel to the plane or the plane is behind the origin
pub fn ray_plane_intersection(ray: &Ray, plane_height: f32) -> Option<f32> {
    if ray.direction.y.abs() < 0.0001 {
        return None;
    }

    let t = (plane_height - ray.origin.y) / ray.direction.y;
    if t < 0.0 {
        return None;
    }

    Some(t)
}

/// Intersect a ray with an axis-aligned box (slab method).
///
/// # Returns
/// * `Some((t, normal))` - Entry distance and the outward normal of the face hit
/// * `None` - Ray misses the box or the box is behind the origin
pub fn ray_aabb_intersection(ray: &Ray, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];

        if dir.abs() < 1e-8 {
            // Parallel to this slab: must already be inside it
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        // Entering through the min face means the outward normal points negative
        let mut face_sign = -1.0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            face_sign = 1.0;
        }

        if t0 > t_near {
            t_near = t0;
            normal = Vec3::ZERO;
            normal[axis] = face_sign;
        }
        t_far = t_far.min(t1);

        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }

    // Origin inside the box: report the exit point with the ray reversed as normal
    if t_near < 0.0 {
        return Some((t_far, -ray.direction));
    }

    Some((t_near, normal))
}

/// Raycast configuration for convenience
#[derive(Clone, Copy, Debug)]
pub struct RaycastConfig {
    /// Screen aspect ratio (width / height)
    pub aspect_ratio: f32,
    /// Field of view in radians
    pub fov: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            fov: 1.2, // ~69 degrees
        }
    }
}

impl RaycastConfig {
    /// Create a new raycast config with the given aspect ratio
    pub fn with_aspect(aspect_ratio: f32) -> Self {
        Self {
            aspect_ratio,
            ..Default::default()
        }
    }

    /// Build the cursor ray for a screen UV using this config
    pub fn screen_ray(&self, camera_pos: Vec3, camera_target: Vec3, uv: (f32, f32)) -> Ray {
        Ray::new(
            camera_pos,
            get_ray_direction(camera_pos, camera_target, uv, self.aspect_ratio, self.fov),
        )
    }
}
