//! World Module
//!
//! World-space math for block placement: poses, orientation helpers and the
//! implicit placement grid.
//!
//! # Submodules
//!
//! - [`transform`] - `Pose`, `look_rotation`, yaw-only facing
//! - [`grid`] - Grid snapping for cubes and wheels plus the hold pose

pub mod grid;
pub mod transform;

pub use grid::{
    FaceKind, GridSnapConfig, GridSnapper, HoldPoseConfig, ShapeKind, SnappedPose,
    WheelSnapPolicy, DEFAULT_GRID_SIZE, SURFACE_OFFSET, wheel_surface_rotation,
};
pub use transform::{Pose, look_rotation, yaw_facing};
