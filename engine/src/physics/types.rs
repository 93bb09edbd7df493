//! Physics-facing types
//!
//! Identifiers, rigid-body state and query results exchanged with a
//! [`PhysicsWorld`](super::PhysicsWorld). Math types are re-exported from glam.

pub use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

pub use crate::world::transform::Pose;

/// Identity of an object in the scene registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static_assertions::assert_impl_all!(ObjectId: Copy, Send, Sync, std::hash::Hash);
static_assertions::assert_impl_all!(Pose: Copy, Send, Sync);

/// Tag attached to scene objects for cheap classification by queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectTag {
    #[default]
    Untagged,
    Block,
    Player,
}

/// Surface appearance of a renderer slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Linear RGBA
    pub color: Vec4,
}

impl Material {
    pub fn new(name: impl Into<String>, color: Vec4) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Same material with a different colour.
    pub fn tinted(&self, color: Vec4) -> Self {
        Self {
            name: self.name.clone(),
            color,
        }
    }
}

/// Which degrees of freedom a rigid body has locked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraints {
    #[default]
    None,
    FreezePosition,
    FreezeRotation,
    FreezeAll,
}

/// Rigid-body simulation flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dynamics {
    /// Ignores forces and gravity; moved only by explicit pose writes
    pub kinematic: bool,
    pub use_gravity: bool,
    pub constraints: Constraints,
}

impl Default for Dynamics {
    fn default() -> Self {
        Self::frozen()
    }
}

impl Dynamics {
    /// Parked state of a placed block: kinematic, no gravity, fully constrained.
    pub const fn frozen() -> Self {
        Self {
            kinematic: true,
            use_gravity: false,
            constraints: Constraints::FreezeAll,
        }
    }

    /// Fully simulated state.
    pub const fn free() -> Self {
        Self {
            kinematic: false,
            use_gravity: true,
            constraints: Constraints::None,
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        *self == Self::free()
    }
}

/// Nearest hit returned by a raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Object owning the collider that was hit
    pub object: ObjectId,
    /// World-space contact point
    pub point: Vec3,
    /// Outward surface normal at the contact (normalized)
    pub normal: Vec3,
    /// Distance from ray origin to contact
    pub distance: f32,
}

/// Axis-aligned box collider in the owner's local space (rotation is ignored).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    /// Offset of the box centre from the object pivot
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl BoxCollider {
    pub fn centered(half_extents: Vec3) -> Self {
        Self {
            center: Vec3::ZERO,
            half_extents,
        }
    }

    /// Box whose bottom face sits on the pivot.
    pub fn resting(half_extents: Vec3) -> Self {
        Self {
            center: Vec3::new(0.0, half_extents.y, 0.0),
            half_extents,
        }
    }
}

/// Template an object is instantiated from.
#[derive(Clone, Debug, PartialEq)]
pub struct Prefab {
    pub name: String,
    /// `None` for objects without a collider
    pub collider: Option<BoxCollider>,
    /// Rigid-body flags; `None` for objects without a rigid body
    pub dynamics: Option<Dynamics>,
    pub materials: Vec<Material>,
    pub tag: ObjectTag,
}

impl Prefab {
    /// Empty transform with no collider, body or renderer.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collider: None,
            dynamics: None,
            materials: Vec::new(),
            tag: ObjectTag::Untagged,
        }
    }

    /// Collidable, frozen block with a single material.
    pub fn block(name: impl Into<String>, collider: BoxCollider, material: Material) -> Self {
        Self {
            name: name.into(),
            collider: Some(collider),
            dynamics: Some(Dynamics::frozen()),
            materials: vec![material],
            tag: ObjectTag::Block,
        }
    }
}
