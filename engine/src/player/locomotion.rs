//! First-person locomotion
//!
//! Turns per-frame move/look input and a jump trigger into body yaw, camera
//! pitch and a displacement handed to the world's collision-resolved
//! character mover.
//!
//! # Model
//!
//! - Look: yaw rotates the body about world up; pitch rotates only the camera
//!   child and accumulates, clamped to `±pitch_limit` degrees
//! - Vertical: while grounded and falling, velocity snaps to a small negative
//!   "stick to ground" value; a jump sets it to `sqrt(jump_height * -2 * gravity)`;
//!   gravity integrates every frame
//! - Horizontal: `right * move.x + forward * move.y`
//! - The whole move vector (vertical included) is scaled by `speed * dt`
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut locomotion = LocomotionController::new(LocomotionConfig::default());
//!
//! // Each frame:
//! locomotion.on_frame(&mut world, &rig, &LocomotionInput::from_actions(&frame), dt);
//! ```

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::{ActionFrame, InputAction};
use crate::physics::{ObjectId, PhysicsWorld};
use crate::world::transform::Pose;

/// Locomotion tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Multiplier applied to the whole move vector
    pub speed: f32,
    /// Vertical acceleration (negative = down), m/s^2
    pub gravity: f32,
    pub jump_height: f32,
    /// Degrees per unit of look delta
    pub mouse_sensitivity: f32,
    /// Vertical velocity held while standing on ground
    pub ground_stick_velocity: f32,
    /// Camera pitch limit in degrees (symmetric)
    pub pitch_limit: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: 120.0,
            gravity: -9.8,
            jump_height: 0.5,
            mouse_sensitivity: 0.1,
            ground_stick_velocity: -2.0,
            pitch_limit: 90.0,
        }
    }
}

/// The objects a first-person player is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRig {
    /// Character body; yaws, moves, carries the collider
    pub body: ObjectId,
    /// Camera child of the body; pitches
    pub camera: ObjectId,
}

/// Input for one locomotion frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionInput {
    /// x = strafe right, y = forward
    pub move_axis: Vec2,
    /// Look delta (x = yaw right, y = pitch up)
    pub look: Vec2,
    pub jump: bool,
}

impl LocomotionInput {
    pub fn from_actions(frame: &ActionFrame) -> Self {
        Self {
            move_axis: frame.move_axis(),
            look: frame.look,
            jump: frame.pressed(InputAction::Jump),
        }
    }
}

/// Character controller state carried across frames.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: LocomotionConfig,
    enabled: bool,
    /// Camera pitch in degrees, positive looks down
    pitch: f32,
    vertical_velocity: f32,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            config,
            enabled: true,
            pitch: 0.0,
            vertical_velocity: 0.0,
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Enable or disable all locomotion (disabled while piloting a vehicle).
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.vertical_velocity = 0.0;
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Accumulated camera pitch in degrees (positive looks down).
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Camera rotation relative to the body.
    #[inline]
    pub fn camera_local_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Run one frame. Returns the displacement submitted to the world, or
    /// `None` when disabled or the body is missing.
    pub fn on_frame<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        rig: &PlayerRig,
        input: &LocomotionInput,
        dt: f32,
    ) -> Option<Vec3> {
        if !self.enabled {
            return None;
        }
        let body = world.pose(rig.body)?;

        // Look
        let look = input.look * self.config.mouse_sensitivity;
        let limit = self.config.pitch_limit.abs();
        self.pitch = (self.pitch - look.y).clamp(-limit, limit);
        if let Some(camera) = world.local_pose(rig.camera) {
            world.set_local_pose(
                rig.camera,
                Pose::new(camera.position, self.camera_local_rotation()),
            );
        }
        let rotation = (body.rotation * Quat::from_rotation_y(look.x.to_radians())).normalize();
        world.set_pose(rig.body, Pose::new(body.position, rotation));
        let body = Pose::new(body.position, rotation);

        // Move
        let mut movement = body.right() * input.move_axis.x + body.forward() * input.move_axis.y;

        if world.is_grounded(rig.body) {
            if self.vertical_velocity < 0.0 {
                self.vertical_velocity = self.config.ground_stick_velocity;
            }
            if input.jump {
                self.vertical_velocity = (self.config.jump_height * -2.0 * self.config.gravity).sqrt();
            }
        }

        self.vertical_velocity += self.config.gravity * dt;
        movement.y = self.vertical_velocity;

        let displacement = movement * self.config.speed * dt;
        world.move_character(rig.body, displacement);
        Some(displacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Prefab, SandboxWorld};

    fn rig(world: &mut SandboxWorld, y: f32) -> PlayerRig {
        let body = world.spawn_character("Player", Pose::at(Vec3::new(0.0, y, 0.0)), Vec3::new(0.5, 1.0, 0.5));
        let camera = world.instantiate(&Prefab::empty("Camera"), Pose::at(Vec3::new(0.0, y + 0.8, 0.0)));
        world.set_parent(camera, Some(body));
        PlayerRig { body, camera }
    }

    #[test]
    fn test_defaults() {
        let c = LocomotionConfig::default();
        assert_eq!(c.speed, 120.0);
        assert_eq!(c.gravity, -9.8);
        assert_eq!(c.jump_height, 0.5);
        assert_eq!(c.mouse_sensitivity, 0.1);
    }

    #[test]
    fn test_pitch_accumulates_and_clamps() {
        let mut world = SandboxWorld::new();
        let rig = rig(&mut world, 1.0);
        let mut loco = LocomotionController::default();
        let look_down = LocomotionInput {
            look: Vec2::new(0.0, -100.0),
            ..Default::default()
        };
        loco.on_frame(&mut world, &rig, &look_down, 0.0);
        assert!((loco.pitch() - 10.0).abs() < 1e-4);
        loco.on_frame(&mut world, &rig, &look_down, 0.0);
        assert!((loco.pitch() - 20.0).abs() < 1e-4);

        let way_up = LocomotionInput {
            look: Vec2::new(0.0, 10_000.0),
            ..Default::default()
        };
        loco.on_frame(&mut world, &rig, &way_up, 0.0);
        assert_eq!(loco.pitch(), -90.0);
    }

    #[test]
    fn test_negative_pitch_limit_acts_as_magnitude() {
        let mut world = SandboxWorld::new();
        let rig = rig(&mut world, 1.0);
        let mut loco = LocomotionController::new(LocomotionConfig {
            pitch_limit: -45.0,
            ..Default::default()
        });
        let look_down = LocomotionInput {
            look: Vec2::new(0.0, -1000.0),
            ..Default::default()
        };
        loco.on_frame(&mut world, &rig, &look_down, 0.0);
        assert_eq!(loco.pitch(), 45.0);
    }

    #[test]
    fn test_yaw_turns_body_not_pitch() {
        let mut world = SandboxWorld::new();
        let rig = rig(&mut world, 1.0);
        let mut loco = LocomotionController::default();
        let input = LocomotionInput {
            look: Vec2::new(900.0, 0.0),
            ..Default::default()
        };
        loco.on_frame(&mut world, &rig, &input, 0.0);
        let forward = world.pose(rig.body).unwrap().forward();
        assert!((forward - Vec3::X).length() < 1e-4);
        assert_eq!(loco.pitch(), 0.0);
        // Camera inherits the yaw through its parent
        let cam_forward = world.pose(rig.camera).unwrap().forward();
        assert!((cam_forward - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_forward_move_scaled_by_speed() {
        let mut world = SandboxWorld::new();
        let rig = rig(&mut world, 50.0);
        let mut loco = LocomotionController::default();
        let input = LocomotionInput {
            move_axis: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        let d = loco.on_frame(&mut world, &rig, &input, 0.01).unwrap();
        assert!((d.z - 1.2).abs() < 1e-4);
        assert!(d.x.abs() < 1e-5);
        // Airborne: gravity only
        assert!((loco.vertical_velocity() - (-0.098)).abs() < 1e-5);
    }

    #[test]
    fn test_grounded_sticks_then_jumps() {
        let mut world = SandboxWorld::new();
        world.spawn_ground(100.0, 0.0);
        let rig = rig(&mut world, 1.0);
        let mut loco = LocomotionController::default();
        let idle = LocomotionInput::default();

        // Settle onto the ground
        for _ in 0..3 {
            loco.on_frame(&mut world, &rig, &idle, 0.02);
        }
        assert!(world.is_grounded(rig.body));
        // Stick value plus one frame of gravity
        assert!((loco.vertical_velocity() - (-2.0 - 9.8 * 0.02)).abs() < 1e-4);

        let jump = LocomotionInput {
            jump: true,
            ..Default::default()
        };
        loco.on_frame(&mut world, &rig, &jump, 0.02);
        let expected = (0.5_f32 * 2.0 * 9.8).sqrt() - 9.8 * 0.02;
        assert!((loco.vertical_velocity() - expected).abs() < 1e-4);
        assert!(world.pose(rig.body).unwrap().position.y > 1.0);
    }

    #[test]
    fn test_jump_ignored_in_air() {
        let mut world = SandboxWorld::new();
        let rig = rig(&mut world, 100.0);
        let mut loco = LocomotionController::default();
        let jump = LocomotionInput {
            jump: true,
            ..Default::default()
        };
        loco.on_frame(&mut world, &rig, &jump, 0.02);
        assert!(loco.vertical_velocity() < 0.0);
    }

    #[test]
    fn test_disabled_does_nothing() {
        let mut world = SandboxWorld::new();
        let rig = rig(&mut world, 1.0);
        let mut loco = LocomotionController::default();
        loco.set_enabled(false);
        let input = LocomotionInput {
            move_axis: Vec2::new(1.0, 1.0),
            look: Vec2::new(50.0, 50.0),
            jump: true,
        };
        assert!(loco.on_frame(&mut world, &rig, &input, 0.1).is_none());
        assert_eq!(world.pose(rig.body).unwrap(), Pose::at(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(loco.pitch(), 0.0);
    }
}
