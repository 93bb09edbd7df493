//! Vehicle Starter
//!
//! Looks for a startable vehicle under the view centre, keeps the prompt
//! over its driver block, and on request releases the whole structure and
//! mounts the player.

use serde::{Deserialize, Serialize};

use crate::camera::camera_center_ray;
use crate::input::{ActionFrame, InputAction};
use crate::physics::{ObjectId, ObjectTag, PhysicsWorld, connected_structure};
use crate::player::{LocomotionController, PlayerRig};

use super::driver::DriverRegistry;
use super::prompt::{PromptConfig, PromptLabel};
use super::structure::{discover_structure, release_structure};

/// Targeting and prompt tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarterConfig {
    /// Maximum targeting distance from the camera (meters)
    pub ray_distance: f32,
    pub prompt: PromptConfig,
}

impl Default for StarterConfig {
    fn default() -> Self {
        Self {
            ray_distance: 25.0,
            prompt: PromptConfig::default(),
        }
    }
}

/// Finds vehicles to start and starts them.
#[derive(Clone, Debug)]
pub struct VehicleStarter {
    config: StarterConfig,
    /// Driver block of the vehicle currently aimed at
    target: Option<ObjectId>,
    prompt: PromptLabel,
}

impl Default for VehicleStarter {
    fn default() -> Self {
        Self::new(StarterConfig::default())
    }
}

impl VehicleStarter {
    pub fn new(config: StarterConfig) -> Self {
        let prompt = PromptLabel::new(&config.prompt);
        Self {
            config,
            target: None,
            prompt,
        }
    }

    #[inline]
    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    pub fn prompt(&self) -> &PromptLabel {
        &self.prompt
    }

    /// Driver block of the vehicle under the view centre.
    ///
    /// The hit must be a block; the search starts from the rigid body that
    /// owns the hit collider.
    pub fn find_target<W: PhysicsWorld + ?Sized>(
        &self,
        world: &W,
        rig: &PlayerRig,
        drivers: &DriverRegistry,
    ) -> Option<ObjectId> {
        let ray = camera_center_ray(world, rig.camera)?;
        let hit = ray.cast(world, self.config.ray_distance)?;
        if world.tag(hit.object) != ObjectTag::Block {
            return None;
        }
        let root = world.body_root(hit.object)?;
        discover_structure(world, root, drivers).driver
    }

    /// Refresh the target and the prompt for this frame.
    pub fn on_frame<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &W,
        rig: &PlayerRig,
        drivers: &DriverRegistry,
    ) -> Option<ObjectId> {
        let target = self.find_target(world, rig, drivers);
        if target != self.target {
            log::debug!("[Vehicle] Target: {target:?}");
        }
        self.target = target;

        let anchor = target.and_then(|t| world.pose(t));
        let viewer = world.pose(rig.camera);
        match (anchor, viewer) {
            (Some(anchor), Some(viewer)) => {
                self.prompt
                    .show_at(anchor.position + self.config.prompt.offset, viewer.position);
            }
            _ => self.prompt.hide(),
        }
        target
    }

    /// Start the targeted vehicle with `rider` at the wheel.
    ///
    /// Every block joined to the driver is unfrozen before the rider mounts.
    /// Returns the driver block, or `None` when nothing is targeted.
    pub fn start_vehicle<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        rider: &PlayerRig,
        locomotion: &mut LocomotionController,
        drivers: &mut DriverRegistry,
    ) -> Option<ObjectId> {
        let target = self.target.take()?;
        self.prompt.hide();

        let members = connected_structure(&*world, target);
        let released = release_structure(world, &members);

        match drivers.get_mut(target) {
            Some(driver) => driver.activate(world, rider, locomotion),
            None => log::warn!("[Vehicle] Target {target} lost its driver"),
        }
        log::info!("[Vehicle] Started vehicle {target} ({released} blocks)");
        Some(target)
    }

    /// Per-frame update: targeting, prompt, then the start action.
    pub fn update<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        rig: &PlayerRig,
        frame: &ActionFrame,
        locomotion: &mut LocomotionController,
        drivers: &mut DriverRegistry,
    ) -> Option<ObjectId> {
        self.on_frame(&*world, rig, drivers);
        if self.target.is_some() && frame.pressed(InputAction::StartVehicle) {
            return self.start_vehicle(world, rig, locomotion, drivers);
        }
        None
    }
}
