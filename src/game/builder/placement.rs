//! Block Placement
//!
//! Occupancy check for a candidate block position and the tuning shared by
//! the placement tool.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::physics::{ObjectId, PhysicsWorld};

/// Placement tool tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Maximum targeting distance from the camera (meters)
    pub place_distance: f32,
    /// Overlap box half-extent as a fraction of the grid size
    pub half_extent_factor: f32,
    /// Preview tint while the target cell is free
    pub valid_color: Vec4,
    /// Preview tint while the target cell is occupied
    pub invalid_color: Vec4,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            place_distance: 25.0,
            half_extent_factor: 0.4,
            valid_color: Vec4::new(0.0, 1.0, 0.0, 0.3),
            invalid_color: Vec4::new(1.0, 0.0, 0.0, 0.3),
        }
    }
}

/// Decides whether a grid cell is free to build in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementValidator {
    pub grid_size: f32,
    pub half_extent_factor: f32,
}

impl PlacementValidator {
    pub fn new(grid_size: f32, half_extent_factor: f32) -> Self {
        Self {
            grid_size,
            half_extent_factor,
        }
    }

    /// Half-extent of the overlap box on every axis.
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.grid_size * self.half_extent_factor
    }

    /// Solids occupying the box around `center`.
    pub fn blockers<W: PhysicsWorld + ?Sized>(&self, world: &W, center: Vec3) -> Vec<ObjectId> {
        world.overlap_box(center, Vec3::splat(self.half_extent()))
    }

    /// Check if a block may be placed with its footprint centred at `center`
    ///
    /// # Arguments
    /// * `world` - Physics world to query
    /// * `center` - Centre of the space the block would occupy
    ///
    /// # Returns
    /// true if no collider overlaps the shrunken cell box
    pub fn is_clear<W: PhysicsWorld + ?Sized>(&self, world: &W, center: Vec3) -> bool {
        self.blockers(world, center).is_empty()
    }
}
