//! Vehicle Driver
//!
//! The control block of a vehicle. Once a rider mounts, every fixed tick the
//! driver pushes its body forward and yaws it from drive input. Both are
//! force/rotation commands for the physics world, never position overrides.

use std::collections::HashMap;

use glam::Quat;
use serde::{Deserialize, Serialize};

use crate::input::{ActionFrame, InputAction};
use crate::physics::{ObjectId, PhysicsWorld};
use crate::player::{LocomotionController, PlayerRig};
use crate::world::Pose;

/// Vehicle tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Forward thrust, scaled by the tick length
    pub move_force: f32,
    /// Yaw rate in degrees per second at full turn input
    pub turn_speed: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            move_force: 1500.0,
            turn_speed: 100.0,
        }
    }
}

/// Drive input for one fixed tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveInput {
    pub forward: bool,
    /// -1 left, +1 right
    pub turn: f32,
}

impl DriveInput {
    pub fn from_actions(frame: &ActionFrame) -> Self {
        Self {
            forward: frame.held(InputAction::DriveForward),
            turn: frame.turn_axis(),
        }
    }
}

/// Driver capability attached to one block of a structure.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleDriver {
    pub body: ObjectId,
    /// Where a mounted rider sits; riders stay put without one
    pub seat: Option<ObjectId>,
    pub config: VehicleConfig,
    active: bool,
    rider: Option<ObjectId>,
}

impl VehicleDriver {
    pub fn new(body: ObjectId, seat: Option<ObjectId>, config: VehicleConfig) -> Self {
        Self {
            body,
            seat,
            config,
            active: false,
            rider: None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Body of the mounted rider.
    #[inline]
    pub fn rider(&self) -> Option<ObjectId> {
        self.rider
    }

    /// Mount `rider`: hand control over from walking to driving.
    ///
    /// Locomotion and the rider's character collider are switched off, and
    /// the rider is parented to the seat with an identity local pose.
    pub fn activate<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        rider: &PlayerRig,
        locomotion: &mut LocomotionController,
    ) {
        locomotion.set_enabled(false);
        world.set_character_enabled(rider.body, false);

        if let Some(seat) = self.seat.filter(|s| world.exists(*s)) {
            world.set_parent(rider.body, Some(seat));
            world.set_local_pose(rider.body, Pose::IDENTITY);
        } else {
            log::warn!("[Vehicle] Driver {} has no seat, rider stays in place", self.body);
        }

        self.active = true;
        self.rider = Some(rider.body);
        log::info!("[Vehicle] Driver {} active, rider {}", self.body, rider.body);
    }

    /// Apply thrust and steering for one physics tick. No-op while inactive.
    pub fn fixed_tick<W: PhysicsWorld + ?Sized>(&self, world: &mut W, input: &DriveInput, dt: f32) {
        if !self.active {
            return;
        }
        let Some(pose) = world.pose(self.body) else {
            return;
        };

        if input.forward {
            world.add_force(self.body, pose.forward() * self.config.move_force * dt);
        }

        let yaw = (input.turn * self.config.turn_speed * dt).to_radians();
        world.move_rotation(self.body, pose.rotation * Quat::from_rotation_y(yaw));
    }
}

/// Driver capability lookup keyed by the driver block's id.
///
/// Resolves "does this block drive a vehicle" without inspecting the block.
#[derive(Clone, Debug, Default)]
pub struct DriverRegistry {
    drivers: HashMap<ObjectId, VehicleDriver>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver, replacing any previous one on the same body.
    pub fn register(&mut self, driver: VehicleDriver) {
        self.drivers.insert(driver.body, driver);
    }

    pub fn remove(&mut self, body: ObjectId) -> Option<VehicleDriver> {
        self.drivers.remove(&body)
    }

    #[inline]
    pub fn contains(&self, body: ObjectId) -> bool {
        self.drivers.contains_key(&body)
    }

    pub fn get(&self, body: ObjectId) -> Option<&VehicleDriver> {
        self.drivers.get(&body)
    }

    pub fn get_mut(&mut self, body: ObjectId) -> Option<&mut VehicleDriver> {
        self.drivers.get_mut(&body)
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Drivers with a mounted rider.
    pub fn active(&self) -> impl Iterator<Item = &VehicleDriver> {
        self.drivers.values().filter(|d| d.is_active())
    }

    /// Run one fixed tick on every active driver.
    pub fn fixed_tick<W: PhysicsWorld + ?Sized>(&self, world: &mut W, input: &DriveInput, dt: f32) {
        for driver in self.active() {
            driver.fixed_tick(world, input, dt);
        }
    }

    /// Drop drivers whose body no longer exists.
    pub fn prune<W: PhysicsWorld + ?Sized>(&mut self, world: &W) {
        self.drivers.retain(|body, _| world.exists(*body));
    }
}
