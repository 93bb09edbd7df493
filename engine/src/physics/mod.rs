//! Physics module
//!
//! The seam between gameplay code and the host engine's physics.
//!
//! Gameplay components never reach for a global engine; every query and
//! mutation goes through a [`PhysicsWorld`] passed in by the caller-owned
//! frame loop. [`SandboxWorld`] is a small headless implementation for tests
//! and the demo binary.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! # Submodules
//!
//! - [`types`] - Ids, rigid-body flags, materials, prefabs and query results
//! - [`world`] - The `PhysicsWorld` trait
//! - [`collision`] - AABB ray casts, overlaps and axis sweeps
//! - [`connectivity`] - Breadth-first joint-structure discovery
//! - [`sandbox`] - Headless `PhysicsWorld` implementation

pub mod collision;
pub mod connectivity;
pub mod sandbox;
pub mod types;
pub mod world;

pub use collision::{Aabb, aabb_surface_normal, ray_aabb_intersect, sweep_axis};
pub use connectivity::{connected_structure, find_in_structure};
pub use sandbox::SandboxWorld;
pub use types::{
    BoxCollider, Constraints, Dynamics, Material, ObjectId, ObjectTag, Pose, Prefab, Quat, RayHit,
    Vec3, Vec4,
};
pub use world::PhysicsWorld;
