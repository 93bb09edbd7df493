//! Physics world interface
//!
//! Everything gameplay code needs from the host engine, injected explicitly
//! instead of reached through a global: spatial queries, the object registry,
//! rigid-body control and joint enumeration.
//!
//! All calls are synchronous and happen from a single frame loop. Operations
//! on an unknown [`ObjectId`] are no-ops (setters) or return an empty/`None`
//! result (getters), so a stale handle never panics.

use glam::{Quat, Vec3};

use super::types::{Dynamics, Material, ObjectId, ObjectTag, Pose, Prefab, RayHit};

/// Host engine services consumed by the gameplay components.
pub trait PhysicsWorld {
    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Nearest collider hit along the ray within `max_distance`.
    ///
    /// Inactive objects, objects without a collider and colliders containing
    /// the origin are skipped.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Every active collider overlapping the box.
    fn overlap_box(&self, center: Vec3, half_extents: Vec3) -> Vec<ObjectId>;

    // ------------------------------------------------------------------
    // Character movement
    // ------------------------------------------------------------------

    /// Move a character by `displacement`, stopping at colliders.
    ///
    /// Returns whether the character ended the move standing on something.
    fn move_character(&mut self, id: ObjectId, displacement: Vec3) -> bool;

    /// Grounded flag from the last [`PhysicsWorld::move_character`] call.
    fn is_grounded(&self, id: ObjectId) -> bool;

    /// Enable or disable the character's collision capsule.
    fn set_character_enabled(&mut self, id: ObjectId, enabled: bool);

    // ------------------------------------------------------------------
    // Object registry
    // ------------------------------------------------------------------

    fn instantiate(&mut self, prefab: &Prefab, pose: Pose) -> ObjectId;

    fn destroy(&mut self, id: ObjectId);

    fn exists(&self, id: ObjectId) -> bool;

    fn name(&self, id: ObjectId) -> Option<String>;

    /// World-space pose.
    fn pose(&self, id: ObjectId) -> Option<Pose>;

    /// Set the world-space pose (converted to local space for parented objects).
    fn set_pose(&mut self, id: ObjectId, pose: Pose);

    /// Pose relative to the parent (world pose when unparented).
    fn local_pose(&self, id: ObjectId) -> Option<Pose>;

    fn set_local_pose(&mut self, id: ObjectId, pose: Pose);

    fn parent(&self, id: ObjectId) -> Option<ObjectId>;

    /// Reparent, keeping the current world pose.
    fn set_parent(&mut self, id: ObjectId, parent: Option<ObjectId>);

    /// Uniform scale.
    fn scale(&self, id: ObjectId) -> f32;

    fn set_scale(&mut self, id: ObjectId, scale: f32);

    fn set_active(&mut self, id: ObjectId, active: bool);

    fn is_active(&self, id: ObjectId) -> bool;

    /// Strip the collider. Returns `false` if there was none.
    fn remove_collider(&mut self, id: ObjectId) -> bool;

    fn tag(&self, id: ObjectId) -> ObjectTag;

    /// Nearest object at or above `id` in the hierarchy that has a rigid body.
    fn body_root(&self, id: ObjectId) -> Option<ObjectId>;

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Materials of every renderer slot on the object, in slot order.
    fn materials(&self, id: ObjectId) -> Vec<Material>;

    fn set_materials(&mut self, id: ObjectId, materials: &[Material]);

    // ------------------------------------------------------------------
    // Rigid bodies and joints
    // ------------------------------------------------------------------

    /// `None` for objects without a rigid body.
    fn dynamics(&self, id: ObjectId) -> Option<Dynamics>;

    fn set_dynamics(&mut self, id: ObjectId, dynamics: Dynamics);

    /// Accumulate a force (N) applied at the next physics step.
    fn add_force(&mut self, id: ObjectId, force: Vec3);

    /// Physics-driven rotation change applied to a rigid body.
    fn move_rotation(&mut self, id: ObjectId, rotation: Quat);

    /// Objects fixed-jointed to `id`, in either direction.
    fn joint_neighbors(&self, id: ObjectId) -> Vec<ObjectId>;
}
