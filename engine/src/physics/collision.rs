//! Collision detection module
//!
//! Axis-aligned box primitives backing the sandbox world's queries:
//! ray casts, box overlaps and axis sweeps for the character mover.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use block_garage_engine::physics::collision::{Aabb, ray_aabb_intersect};
//! use glam::Vec3;
//!
//! let block = Aabb::from_center(Vec3::ZERO, Vec3::ONE);
//! let origin = Vec3::new(0.0, 0.0, -5.0);
//! if let Some(t) = ray_aabb_intersect(origin, Vec3::Z, block.min, block.max) {
//!     let hit_point = origin + Vec3::Z * t;
//!     log::debug!("hit at distance {t}: {hit_point:?}");
//! }
//! ```

use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Strict overlap test. Boxes that only share a face do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    #[inline]
    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Ray cast against this box; see [`ray_aabb_intersect`].
    pub fn ray_cast(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        ray_aabb_intersect(origin, direction, self.min, self.max)
    }
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// The slab method works by finding the intersection of the ray with each pair of
/// axis-aligned planes that make up the AABB. If the ray enters and exits the AABB
/// at valid times (t_enter < t_exit and t_enter >= 0), there is an intersection.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the entry point (t >= 0)
/// * `None` - No intersection, intersection behind the origin, or the ray
///   starts inside the box (a viewer standing inside its own collider must
///   not hit it)
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero direction components become huge inverse values
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;

    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;

    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;

    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    if t_max >= t_min && t_min >= 0.0 {
        Some(t_min)
    } else {
        None
    }
}

/// Computes the surface normal for a point on an AABB surface.
///
/// Determines which face of the AABB the point is on and returns the outward normal.
///
/// # Arguments
///
/// * `point` - Point on the AABB surface
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// Normalized outward normal vector
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = (aabb_max - aabb_min) * 0.5;
    let local = point - center;

    // Normalize to unit cube space
    let normalized = Vec3::new(
        local.x / half_extents.x,
        local.y / half_extents.y,
        local.z / half_extents.z,
    );

    // Closest face has the highest absolute normalized coordinate
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.x && abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Clamp a move of `mover` by `delta` along `axis` (0 = X, 1 = Y, 2 = Z)
/// so it stops at the first obstacle.
///
/// Obstacles already overlapping the mover are ignored, so a box that starts
/// embedded can still move out.
///
/// # Returns
///
/// The allowed delta along the axis (same sign as `delta`, magnitude never larger).
pub fn sweep_axis<'a>(
    mover: &Aabb,
    axis: usize,
    delta: f32,
    obstacles: impl Iterator<Item = &'a Aabb>,
) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }

    let mut offset = Vec3::ZERO;
    offset[axis] = delta;
    let target = mover.translated(offset);
    let swept = Aabb::new(mover.min.min(target.min), mover.max.max(target.max));

    let mut allowed = delta;
    for obstacle in obstacles {
        if !swept.overlaps(obstacle) || mover.overlaps(obstacle) {
            continue;
        }
        if delta > 0.0 {
            let gap = (obstacle.min[axis] - mover.max[axis]).max(0.0);
            allowed = allowed.min(gap);
        } else {
            let gap = (obstacle.max[axis] - mover.min[axis]).min(0.0);
            allowed = allowed.max(gap);
        }
    }
    allowed
}
