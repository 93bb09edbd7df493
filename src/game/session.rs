//! Garage Session
//!
//! Central state struct that holds the player-facing systems together and
//! runs them in a fixed order from a caller-owned loop:
//!
//! - `frame` once per rendered frame: locomotion, then placement, then the
//!   vehicle starter
//! - `fixed_tick` once per physics step: active vehicle drivers

use glam::Vec3;

use crate::game::builder::{BlockCatalog, BlockPlacer};
use crate::game::config::GameConfig;
use crate::game::vehicle::{DriveInput, DriverRegistry, VehicleConfig, VehicleDriver, VehicleStarter};
use crate::input::ActionFrame;
use crate::physics::{ObjectId, PhysicsWorld, Prefab, SandboxWorld};
use crate::player::{LocomotionController, LocomotionInput, PlayerRig};
use crate::world::Pose;

/// Half extents of the player's character collider (meters)
pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 2.5, 1.0);

/// Camera offset above the body centre (meters)
pub const PLAYER_EYE_OFFSET: f32 = 2.0;

/// What happened during one [`GarageSession::frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Block placed this frame
    pub placed: Option<ObjectId>,
    /// Driver block of the vehicle started this frame
    pub started: Option<ObjectId>,
}

/// Central session state holding all player-facing systems
#[derive(Debug)]
pub struct GarageSession {
    // === Player ===
    /// Body and camera objects of the player
    pub rig: PlayerRig,
    /// Walking and mouse look
    pub locomotion: LocomotionController,

    // === Building ===
    /// Block preview and placement
    pub placer: BlockPlacer,

    // === Vehicles ===
    /// Vehicle targeting, prompt and start
    pub starter: VehicleStarter,
    /// Driver capability by block
    pub drivers: DriverRegistry,
    vehicle: VehicleConfig,
}

impl GarageSession {
    /// Session with the standard cube/wheel catalog.
    pub fn new(config: &GameConfig, rig: PlayerRig) -> Self {
        Self::with_catalog(config, rig, BlockCatalog::standard(&config.grid))
    }

    pub fn with_catalog(config: &GameConfig, rig: PlayerRig, catalog: BlockCatalog) -> Self {
        Self {
            rig,
            locomotion: LocomotionController::new(config.locomotion),
            placer: BlockPlacer::new(config.grid, config.hold, config.placement, catalog),
            starter: VehicleStarter::new(config.starter.clone()),
            drivers: DriverRegistry::new(),
            vehicle: config.vehicle,
        }
    }

    /// Spawn a player body with a camera child in a sandbox world.
    pub fn spawn_player(world: &mut SandboxWorld, position: Vec3) -> PlayerRig {
        let body = world.spawn_character("Player", Pose::at(position), PLAYER_HALF_EXTENTS);
        let camera = world.instantiate(
            &Prefab::empty("Camera"),
            Pose::at(position + Vec3::Y * PLAYER_EYE_OFFSET),
        );
        world.set_parent(camera, Some(body));
        PlayerRig { body, camera }
    }

    /// Give `body` the driver capability, seating riders on `seat`.
    pub fn add_driver(&mut self, body: ObjectId, seat: Option<ObjectId>) {
        self.drivers.register(VehicleDriver::new(body, seat, self.vehicle));
        log::debug!("[Session] Driver registered on {body}");
    }

    /// Whether the player is currently driving.
    pub fn is_driving(&self) -> bool {
        self.drivers.active().any(|d| d.rider() == Some(self.rig.body))
    }

    /// Run one rendered frame.
    pub fn frame<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        actions: &ActionFrame,
        dt: f32,
    ) -> FrameReport {
        self.locomotion.on_frame(
            world,
            &self.rig,
            &LocomotionInput::from_actions(actions),
            dt,
        );

        let placed = self.placer.update(world, &self.rig, actions);

        let started = self.starter.update(
            world,
            &self.rig,
            actions,
            &mut self.locomotion,
            &mut self.drivers,
        );

        FrameReport { placed, started }
    }

    /// Run one physics tick.
    pub fn fixed_tick<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W, actions: &ActionFrame, dt: f32) {
        self.drivers.fixed_tick(world, &DriveInput::from_actions(actions), dt);
    }
}
