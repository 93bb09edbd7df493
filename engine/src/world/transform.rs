//! Transform Module
//!
//! World-space poses and orientation helpers shared by the placement,
//! locomotion and vehicle systems.
//!
//! ## Conventions
//! - +Y = up
//! - +Z = forward
//! - +X = right
//!
//! Positive yaw turns +Z toward +X. Positive pitch (about local X) tilts
//! the forward axis downward.

use glam::{Mat3, Quat, Vec3};

/// Position and rotation of an object, either in world space or relative to a parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with no rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Local +Z in world space.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Local +X in world space.
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Local +Y in world space.
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Transform a point from this pose's local space into the parent space.
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Compose `self` (parent) with a pose expressed in its local space.
    pub fn mul(&self, local: &Pose) -> Pose {
        Pose {
            position: self.transform_point(local.position),
            rotation: (self.rotation * local.rotation).normalize(),
        }
    }

    /// Express a world pose relative to `self`.
    ///
    /// Inverse of [`Pose::mul`]: `parent.mul(&parent.relative_to(world)) == world`.
    pub fn relative_to(&self, world: &Pose) -> Pose {
        let inv = self.rotation.inverse();
        Pose {
            position: inv * (world.position - self.position),
            rotation: (inv * world.rotation).normalize(),
        }
    }
}

/// Build a rotation whose local +Z points along `forward` and whose local +Y
/// lies as close to `up` as the forward axis allows.
///
/// Returns identity when `forward` is zero. When `forward` and `up` are
/// parallel, world +Y (or +Z if that is parallel too) stands in for `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }

    let mut r = up.cross(f);
    if r.length_squared() < 1e-12 {
        r = Vec3::Y.cross(f);
        if r.length_squared() < 1e-12 {
            r = Vec3::Z.cross(f);
        }
    }
    let r = r.normalize();
    let u = f.cross(r);

    Quat::from_mat3(&Mat3::from_cols(r, u, f)).normalize()
}

/// Yaw-only rotation facing along the horizontal part of `direction`.
///
/// Returns `None` when `direction` has no horizontal component.
pub fn yaw_facing(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < 1e-12 {
        return None;
    }
    Some(look_rotation(flat, Vec3::Y))
}
