//! Raycast Module
//!
//! View rays for aiming: placement targeting and the vehicle prompt both
//! cast from the centre of the viewport along the camera's forward axis.

use glam::Vec3;

use crate::physics::{ObjectId, PhysicsWorld, RayHit};
use crate::world::transform::Pose;

/// A ray with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. `direction` is normalized; a zero direction stays zero.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Nearest hit within `max_distance`.
    pub fn cast<W: PhysicsWorld + ?Sized>(&self, world: &W, max_distance: f32) -> Option<RayHit> {
        world.raycast(self.origin, self.direction, max_distance)
    }
}

/// Ray through the centre of the viewport of a camera at `camera_pose`.
#[inline]
pub fn viewport_center_ray(camera_pose: &Pose) -> Ray {
    Ray::new(camera_pose.position, camera_pose.forward())
}

/// Centre ray of the camera object `camera`, if it exists.
pub fn camera_center_ray<W: PhysicsWorld + ?Sized>(world: &W, camera: ObjectId) -> Option<Ray> {
    world.pose(camera).map(|pose| viewport_center_ray(&pose))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_center_ray_follows_camera_forward() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let ray = viewport_center_ray(&pose);
        assert_eq!(ray.origin, Vec3::new(1.0, 2.0, 3.0));
        assert!((ray.direction - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_ray_direction_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(ray.direction, Vec3::Z);
        assert_eq!(ray.at(2.5), Vec3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn test_pitched_camera_looks_down() {
        let pose = Pose::new(Vec3::ZERO, Quat::from_rotation_x(0.5));
        let ray = viewport_center_ray(&pose);
        assert!(ray.direction.y < 0.0);
        assert!(ray.direction.z > 0.0);
    }
}
