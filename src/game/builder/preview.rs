//! Block Preview Controller
//!
//! Placement mode state machine. While active, one transient preview of the
//! selected shape follows the view-centre ray: snapped to the grid and tinted
//! green/red by occupancy when a surface is targeted, or floating at the hold
//! pose with its own materials when nothing is. Confirming spawns a permanent
//! copy at the preview's pose and leaves the preview in place.

use thiserror::Error;

use glam::Vec3;

use crate::camera::camera_center_ray;
use crate::input::{ActionFrame, InputAction};
use crate::physics::{Material, ObjectId, PhysicsWorld};
use crate::player::PlayerRig;
use crate::world::{GridSnapConfig, GridSnapper, HoldPoseConfig, Pose, ShapeKind};

use super::catalog::{BlockCatalog, PREVIEW_NAME};
use super::placement::{PlacementConfig, PlacementValidator};

/// Why a preview or placement request could not be carried out.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no prefab for shape {0}")]
    NoPrefab(ShapeKind),

    #[error("no preview exists")]
    NoPreview,

    #[error("target cell is occupied")]
    Occupied,

    #[error("no surface targeted")]
    NoTarget,
}

/// Placement mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlacementState {
    #[default]
    Inactive,
    Active,
}

/// Where the preview ended up on the last frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewTarget {
    /// Nothing in range; preview floats at the hold pose
    Held,
    /// Snapped onto a surface; `valid` when the cell is free
    Surface { valid: bool },
}

/// Grid-snapping block placement tool.
#[derive(Debug)]
pub struct BlockPlacer {
    snapper: GridSnapper,
    hold: HoldPoseConfig,
    config: PlacementConfig,
    validator: PlacementValidator,
    catalog: BlockCatalog,
    shape: ShapeKind,
    state: PlacementState,
    preview: Option<ObjectId>,
    /// Preview materials as instantiated, restored at the hold pose
    original_materials: Vec<Material>,
    target: Option<PreviewTarget>,
    placed: Vec<ObjectId>,
}

impl Default for BlockPlacer {
    fn default() -> Self {
        Self::new(
            GridSnapConfig::default(),
            HoldPoseConfig::default(),
            PlacementConfig::default(),
            BlockCatalog::default(),
        )
    }
}

impl BlockPlacer {
    pub fn new(
        grid: GridSnapConfig,
        hold: HoldPoseConfig,
        config: PlacementConfig,
        catalog: BlockCatalog,
    ) -> Self {
        Self {
            snapper: GridSnapper::new(grid),
            hold,
            validator: PlacementValidator::new(grid.grid_size, config.half_extent_factor),
            config,
            catalog,
            shape: ShapeKind::Cube,
            state: PlacementState::Inactive,
            preview: None,
            original_materials: Vec::new(),
            target: None,
            placed: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> PlacementState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == PlacementState::Active
    }

    #[inline]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// The live preview object, if any.
    #[inline]
    pub fn preview(&self) -> Option<ObjectId> {
        self.preview
    }

    /// Outcome of the most recent [`BlockPlacer::on_frame`].
    #[inline]
    pub fn target(&self) -> Option<PreviewTarget> {
        self.target
    }

    /// Blocks spawned by this placer, oldest first.
    pub fn placed(&self) -> &[ObjectId] {
        &self.placed
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut BlockCatalog {
        &mut self.catalog
    }

    pub fn validator(&self) -> &PlacementValidator {
        &self.validator
    }

    /// Select a shape. While active the preview is rebuilt for the new shape.
    pub fn select_shape<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        kind: ShapeKind,
    ) -> Result<(), PlacementError> {
        self.shape = kind;
        log::info!("[Builder] Switched to {kind} mode");

        if self.is_active() {
            self.destroy_preview(world);
            self.create_preview(world)?;
        }
        Ok(())
    }

    /// Select the next shape in the cycle.
    pub fn cycle_shape<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) -> Result<(), PlacementError> {
        self.select_shape(world, self.shape.next())
    }

    /// Enter or leave placement mode.
    ///
    /// Entering always switches the mode on; a missing prefab only means no
    /// preview exists until a shape with a prefab is selected.
    pub fn toggle_mode<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
    ) -> Result<PlacementState, PlacementError> {
        match self.state {
            PlacementState::Inactive => {
                self.state = PlacementState::Active;
                log::info!("[Builder] Placement mode: ON");
                self.create_preview(world)?;
            }
            PlacementState::Active => {
                self.state = PlacementState::Inactive;
                log::info!("[Builder] Placement mode: OFF");
                self.destroy_preview(world);
            }
        }
        Ok(self.state)
    }

    fn create_preview<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) -> Result<ObjectId, PlacementError> {
        let prefab = self
            .catalog
            .prefab(self.shape)
            .ok_or(PlacementError::NoPrefab(self.shape))?;

        let mut template = prefab.clone();
        template.name = PREVIEW_NAME.to_string();
        let id = world.instantiate(&template, Pose::IDENTITY);

        if !world.remove_collider(id) {
            log::debug!("[Builder] {} prefab has no collider", self.shape);
        }
        self.original_materials = world.materials(id);
        self.preview = Some(id);
        self.target = None;
        Ok(id)
    }

    fn destroy_preview<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        if let Some(id) = self.preview.take() {
            world.destroy(id);
        }
        self.original_materials.clear();
        self.target = None;
    }

    /// Centre of the space a block at `pose` occupies.
    fn footprint_center(&self, pose: &Pose) -> Vec3 {
        pose.transform_point(self.catalog.footprint_offset(self.shape))
    }

    /// Move and tint the preview for this frame.
    ///
    /// Returns `None` when inactive or without a preview.
    pub fn on_frame<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        rig: &PlayerRig,
    ) -> Option<PreviewTarget> {
        if !self.is_active() {
            return None;
        }
        let preview = self.preview?;

        let view: &W = world;
        let hit = camera_center_ray(view, rig.camera)
            .and_then(|ray| ray.cast(view, self.config.place_distance));

        let target = match hit {
            Some(hit) => {
                let snapped = self.snapper.snap(hit.point, hit.normal, self.shape);
                world.set_pose(preview, snapped.pose);
                world.set_scale(preview, snapped.scale);

                let valid = self
                    .validator
                    .is_clear(&*world, self.footprint_center(&snapped.pose));
                let color = if valid {
                    self.config.valid_color
                } else {
                    self.config.invalid_color
                };
                let tint = self.catalog.preview_material().tinted(color);
                let slots = self.original_materials.len().max(1);
                world.set_materials(preview, &vec![tint; slots]);

                PreviewTarget::Surface { valid }
            }
            None => {
                let holder = world.pose(rig.body)?;
                let held = self.snapper.hold_pose(&holder, self.shape, &self.hold);
                world.set_pose(preview, held.pose);
                world.set_scale(preview, held.scale);
                world.set_active(preview, true);
                world.set_materials(preview, &self.original_materials);

                PreviewTarget::Held
            }
        };

        if self.target != Some(target) {
            log::debug!("[Builder] Preview target: {target:?}");
        }
        self.target = Some(target);
        Some(target)
    }

    /// Spawn a permanent block at the preview pose.
    ///
    /// Occupancy is checked again against the current world state.
    pub fn confirm<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) -> Result<ObjectId, PlacementError> {
        let preview = self.preview.ok_or(PlacementError::NoPreview)?;
        match self.target {
            Some(PreviewTarget::Surface { valid: true }) => {}
            Some(PreviewTarget::Surface { valid: false }) => return Err(PlacementError::Occupied),
            Some(PreviewTarget::Held) | None => return Err(PlacementError::NoTarget),
        }

        let pose = world.pose(preview).ok_or(PlacementError::NoPreview)?;
        if !self.validator.is_clear(&*world, self.footprint_center(&pose)) {
            return Err(PlacementError::Occupied);
        }

        let prefab = self
            .catalog
            .prefab(self.shape)
            .ok_or(PlacementError::NoPrefab(self.shape))?;
        let id = world.instantiate(prefab, pose);
        self.placed.push(id);
        log::info!("[Builder] {} placed at {}", self.shape, pose.position);
        Ok(id)
    }

    /// Apply this frame's mode actions (shape select, cycle, toggle).
    ///
    /// Every action runs; each failure is logged and returned.
    pub fn handle_input<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        frame: &ActionFrame,
    ) -> Vec<PlacementError> {
        let mut errors = Vec::new();
        let mut note = |result: Result<(), PlacementError>| {
            if let Err(err) = result {
                log::error!("[Builder] {err}");
                errors.push(err);
            }
        };

        if frame.pressed(InputAction::SelectCube) {
            note(self.select_shape(world, ShapeKind::Cube));
        }
        if frame.pressed(InputAction::SelectWheel) {
            note(self.select_shape(world, ShapeKind::Wheel));
        }
        if frame.pressed(InputAction::CycleShape) {
            note(self.cycle_shape(world));
        }
        if frame.pressed(InputAction::TogglePlacement) {
            note(self.toggle_mode(world).map(|_| ()));
        }
        errors
    }

    /// Full per-frame update: mode actions, preview, then confirm.
    ///
    /// Returns the block placed this frame, if any.
    pub fn update<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        rig: &PlayerRig,
        frame: &ActionFrame,
    ) -> Option<ObjectId> {
        self.handle_input(world, frame);
        self.on_frame(world, rig);

        if !self.is_active() || !frame.pressed(InputAction::ConfirmPlacement) {
            return None;
        }
        match self.confirm(world) {
            Ok(id) => Some(id),
            Err(err) => {
                log::debug!("[Builder] Placement refused: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{ObjectTag, Prefab, SandboxWorld};
    use glam::{Quat, Vec4};

    /// Player standing at the origin looking straight down from `eye` height.
    fn looking_down(world: &mut SandboxWorld, x: f32, z: f32, eye: f32) -> PlayerRig {
        let body = world.spawn_character(
            "Player",
            Pose::at(Vec3::new(x, eye, z)),
            Vec3::new(0.5, 1.0, 0.5),
        );
        let camera = world.instantiate(&Prefab::empty("Camera"), Pose::at(Vec3::new(x, eye, z)));
        world.set_parent(camera, Some(body));
        world.set_local_pose(camera, Pose::new(Vec3::ZERO, Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)));
        PlayerRig { body, camera }
    }

    fn active_placer(world: &mut SandboxWorld) -> BlockPlacer {
        let mut placer = BlockPlacer::default();
        placer.toggle_mode(world).unwrap();
        placer
    }

    #[test]
    fn test_toggle_creates_and_destroys_preview() {
        let mut world = SandboxWorld::new();
        let mut placer = BlockPlacer::default();
        assert_eq!(placer.toggle_mode(&mut world), Ok(PlacementState::Active));
        let preview = placer.preview().unwrap();
        assert_eq!(world.name(preview).as_deref(), Some(PREVIEW_NAME));
        // Preview never collides
        assert!(world.overlap_box(Vec3::new(0.0, 2.5, 0.0), Vec3::ONE).is_empty());

        assert_eq!(placer.toggle_mode(&mut world), Ok(PlacementState::Inactive));
        assert!(placer.preview().is_none());
        assert!(!world.exists(preview));
    }

    #[test]
    fn test_switching_shape_rebuilds_preview() {
        let mut world = SandboxWorld::new();
        let mut placer = active_placer(&mut world);
        let first = placer.preview().unwrap();
        placer.select_shape(&mut world, ShapeKind::Wheel).unwrap();
        let second = placer.preview().unwrap();
        assert_ne!(first, second);
        assert!(!world.exists(first));
        // One preview at a time
        assert_eq!(world.ids().filter(|id| world.name(*id).as_deref() == Some(PREVIEW_NAME)).count(), 1);
    }

    #[test]
    fn test_selecting_while_inactive_keeps_world_untouched() {
        let mut world = SandboxWorld::new();
        let mut placer = BlockPlacer::default();
        placer.cycle_shape(&mut world).unwrap();
        assert_eq!(placer.shape(), ShapeKind::Wheel);
        assert!(world.is_empty());
    }

    #[test]
    fn test_missing_prefab_aborts_preview() {
        let mut world = SandboxWorld::new();
        let mut placer = BlockPlacer::default();
        placer.catalog_mut().remove(ShapeKind::Wheel);
        placer.select_shape(&mut world, ShapeKind::Wheel).unwrap();
        assert_eq!(
            placer.toggle_mode(&mut world),
            Err(PlacementError::NoPrefab(ShapeKind::Wheel))
        );
        assert!(placer.is_active());
        assert!(placer.preview().is_none());
        assert_eq!(placer.confirm(&mut world), Err(PlacementError::NoPreview));
    }

    #[test]
    fn test_surface_target_snaps_and_tints_green() {
        let mut world = SandboxWorld::new();
        world.spawn_ground(100.0, 0.0);
        let rig = looking_down(&mut world, 12.0, 7.0, 10.0);
        let mut placer = active_placer(&mut world);

        let target = placer.on_frame(&mut world, &rig);
        assert_eq!(target, Some(PreviewTarget::Surface { valid: true }));

        let preview = placer.preview().unwrap();
        let pose = world.pose(preview).unwrap();
        assert!((pose.position - Vec3::new(12.5, 0.0, 7.5)).length() < 1e-4);
        assert_eq!(pose.rotation, Quat::IDENTITY);
        let materials = world.materials(preview);
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].name, "Preview");
        assert_eq!(materials[0].color, Vec4::new(0.0, 1.0, 0.0, 0.3));
    }

    #[test]
    fn test_occupied_target_tints_red_and_refuses() {
        let mut world = SandboxWorld::new();
        world.spawn_ground(100.0, 0.0);
        // Small collider inside the cell the ray will snap to, off the ray's path
        let blocker = Prefab::block(
            "Blocker",
            crate::physics::BoxCollider::centered(Vec3::splat(0.5)),
            Material::new("Block", Vec4::ONE),
        );
        world.instantiate(&blocker, Pose::at(Vec3::new(17.5, 2.5, 7.5)));
        let rig = looking_down(&mut world, 16.0, 7.0, 10.0);
        let mut placer = active_placer(&mut world);

        let target = placer.on_frame(&mut world, &rig);
        assert_eq!(target, Some(PreviewTarget::Surface { valid: false }));
        let preview = placer.preview().unwrap();
        assert!((world.pose(preview).unwrap().position - Vec3::new(17.5, 0.0, 7.5)).length() < 1e-4);
        assert_eq!(world.materials(preview)[0].color, Vec4::new(1.0, 0.0, 0.0, 0.3));

        assert_eq!(placer.confirm(&mut world), Err(PlacementError::Occupied));
        assert!(placer.placed().is_empty());
    }

    #[test]
    fn test_confirm_spawns_collidable_block_and_keeps_preview() {
        let mut world = SandboxWorld::new();
        world.spawn_ground(100.0, 0.0);
        let rig = looking_down(&mut world, 12.0, 7.0, 10.0);
        let mut placer = active_placer(&mut world);
        placer.on_frame(&mut world, &rig);

        let block = placer.confirm(&mut world).unwrap();
        assert_eq!(placer.placed(), &[block]);
        assert_eq!(world.tag(block), ObjectTag::Block);
        assert!(world.dynamics(block).is_some_and(|d| d.kinematic));
        assert_eq!(world.name(block).as_deref(), Some("Cube"));
        assert!(placer.preview().is_some_and(|p| world.exists(p)));

        // Same cell again is now occupied
        assert_eq!(placer.confirm(&mut world), Err(PlacementError::Occupied));
        placer.on_frame(&mut world, &rig);
        // Next frame targets the top of the new block instead
        let pose = world.pose(placer.preview().unwrap()).unwrap();
        assert!((pose.position - Vec3::new(12.5, 5.0, 7.5)).length() < 1e-4);
    }

    #[test]
    fn test_nothing_targeted_uses_hold_pose() {
        let mut world = SandboxWorld::new();
        let body = world.spawn_character("Player", Pose::IDENTITY, Vec3::new(0.5, 1.0, 0.5));
        let camera = world.instantiate(&Prefab::empty("Camera"), Pose::at(Vec3::new(0.0, 0.8, 0.0)));
        world.set_parent(camera, Some(body));
        let rig = PlayerRig { body, camera };
        let mut placer = active_placer(&mut world);

        assert_eq!(placer.on_frame(&mut world, &rig), Some(PreviewTarget::Held));
        let preview = placer.preview().unwrap();
        let pose = world.pose(preview).unwrap();
        assert!((pose.position - Vec3::new(0.0, 27.0, 8.0)).length() < 1e-4);
        // Faces back toward the holder
        assert!((pose.forward() - Vec3::NEG_Z).length() < 1e-4);
        // Original materials restored
        assert_eq!(world.materials(preview)[0].name, "Block");
        assert_eq!(placer.confirm(&mut world), Err(PlacementError::NoTarget));
    }

    #[test]
    fn test_wheel_hold_pose_is_scaled() {
        let mut world = SandboxWorld::new();
        let body = world.spawn_character("Player", Pose::IDENTITY, Vec3::new(0.5, 1.0, 0.5));
        let camera = world.instantiate(&Prefab::empty("Camera"), Pose::IDENTITY);
        world.set_parent(camera, Some(body));
        let rig = PlayerRig { body, camera };
        let mut placer = active_placer(&mut world);
        placer.select_shape(&mut world, ShapeKind::Wheel).unwrap();

        placer.on_frame(&mut world, &rig);
        let preview = placer.preview().unwrap();
        assert_eq!(world.scale(preview), 0.5);
        let pose = world.pose(preview).unwrap();
        assert!((pose.position - Vec3::new(0.0, 22.0, 18.0)).length() < 1e-4);
        assert_eq!(world.materials(preview).len(), 2);
    }

    #[test]
    fn test_surface_target_resets_held_wheel_scale() {
        let mut world = SandboxWorld::new();
        let rig = looking_down(&mut world, 12.0, 7.0, 10.0);
        let mut placer = active_placer(&mut world);
        placer.select_shape(&mut world, ShapeKind::Wheel).unwrap();

        // Nothing below yet
        assert_eq!(placer.on_frame(&mut world, &rig), Some(PreviewTarget::Held));
        let preview = placer.preview().unwrap();
        assert_eq!(world.scale(preview), 0.5);

        world.spawn_ground(100.0, 0.0);
        assert!(matches!(placer.on_frame(&mut world, &rig), Some(PreviewTarget::Surface { .. })));
        assert_eq!(world.scale(preview), 1.0);
    }

    #[test]
    fn test_every_failed_action_is_reported() {
        let mut world = SandboxWorld::new();
        let mut placer = active_placer(&mut world);
        placer.catalog_mut().remove(ShapeKind::Cube);
        placer.catalog_mut().remove(ShapeKind::Wheel);

        let frame = ActionFrame::new()
            .with_pressed(InputAction::SelectWheel)
            .with_pressed(InputAction::CycleShape);
        let errors = placer.handle_input(&mut world, &frame);
        assert_eq!(
            errors,
            vec![
                PlacementError::NoPrefab(ShapeKind::Wheel),
                PlacementError::NoPrefab(ShapeKind::Cube),
            ]
        );
        assert_eq!(placer.shape(), ShapeKind::Cube);
        assert!(placer.handle_input(&mut world, &ActionFrame::new()).is_empty());
    }

    #[test]
    fn test_update_maps_actions() {
        let mut world = SandboxWorld::new();
        world.spawn_ground(100.0, 0.0);
        let rig = looking_down(&mut world, 12.0, 7.0, 10.0);
        let mut placer = BlockPlacer::default();

        let toggle = ActionFrame::new().with_pressed(InputAction::TogglePlacement);
        assert_eq!(placer.update(&mut world, &rig, &toggle), None);
        assert!(placer.is_active());

        let click = ActionFrame::new().with_pressed(InputAction::ConfirmPlacement);
        let placed = placer.update(&mut world, &rig, &click);
        assert!(placed.is_some());

        let wheel = ActionFrame::new().with_pressed(InputAction::SelectWheel);
        placer.update(&mut world, &rig, &wheel);
        assert_eq!(placer.shape(), ShapeKind::Wheel);

        placer.update(&mut world, &rig, &toggle);
        assert!(!placer.is_active());
        assert!(placer.update(&mut world, &rig, &click).is_none());
    }
}
