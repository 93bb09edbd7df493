//! Grid Snapping Module
//!
//! Turns a raycast contact (point + surface normal) into the pose a block
//! should take on the implicit placement lattice, and computes the fallback
//! "hold pose" used when the player is aiming at empty space.
//!
//! ## Grid
//! The lattice is infinite and has no storage. A cell with side `grid_size`
//! is identified purely by flooring/rounding world coordinates.
//!
//! ## Cubes
//! Cube footprints are centred on half-cell offsets in X/Z and sit on cell
//! boundaries in Y, so the prefab pivot is expected at the bottom face.
//!
//! ## Wheels
//! Two snapping policies exist, see [`WheelSnapPolicy`]. The policy is an
//! explicit configuration choice; nothing mixes the two.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use super::transform::{Pose, look_rotation, yaw_facing};

/// Default cell side length.
pub const DEFAULT_GRID_SIZE: f32 = 5.0;

/// Distance the contact point is pushed along the normal before snapping.
pub const SURFACE_OFFSET: f32 = 0.01;

/// A normal component above this magnitude selects that axis' face.
const FACE_THRESHOLD: f32 = 0.5;

/// Shape of a placeable block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Cube,
    Wheel,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Cube, ShapeKind::Wheel];

    /// Next shape in the selection cycle.
    pub fn next(self) -> Self {
        match self {
            ShapeKind::Cube => ShapeKind::Wheel,
            ShapeKind::Wheel => ShapeKind::Cube,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "Cube",
            ShapeKind::Wheel => "Wheel",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How wheels are snapped onto a targeted surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelSnapPolicy {
    /// Round every axis to the nearest grid point, no rotation.
    CenterSnap,
    /// Sit on top faces at `grid + radius`, stand off side faces by
    /// `wheel_width` and orient the axle along the face normal.
    #[default]
    SurfaceAware,
}

/// Grid snapping parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSnapConfig {
    /// Cell side length
    pub grid_size: f32,
    /// Nudge along the surface normal applied before snapping
    pub surface_offset: f32,
    /// Half the height of the wheel prefab
    pub wheel_radius: f32,
    /// Half the width of the wheel prefab (side face stand-off)
    pub wheel_width: f32,
    pub wheel_policy: WheelSnapPolicy,
}

impl Default for GridSnapConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            surface_offset: SURFACE_OFFSET,
            wheel_radius: 2.5,
            wheel_width: 2.5,
            wheel_policy: WheelSnapPolicy::SurfaceAware,
        }
    }
}

/// Where the preview is held when no surface is targeted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldPoseConfig {
    /// Offset from the holder (right, up, forward)
    pub hold_offset: Vec3,
    /// Extra forward distance for wheels
    pub wheel_forward_offset: f32,
    /// Extra downward offset for wheels
    pub wheel_down_offset: f32,
    /// Uniform scale of a held wheel
    pub wheel_hold_scale: f32,
}

impl Default for HoldPoseConfig {
    fn default() -> Self {
        Self {
            hold_offset: Vec3::new(0.0, 27.0, 8.0),
            wheel_forward_offset: 10.0,
            wheel_down_offset: 5.0,
            wheel_hold_scale: 0.5,
        }
    }
}

/// A snapped (or held) placement: pose plus uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnappedPose {
    pub pose: Pose,
    pub scale: f32,
}

impl SnappedPose {
    fn unscaled(position: Vec3, rotation: Quat) -> Self {
        Self {
            pose: Pose::new(position, rotation),
            scale: 1.0,
        }
    }
}

/// Which face of a block a normal points out of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceKind {
    Top,
    Bottom,
    Side,
}

impl FaceKind {
    pub fn from_normal(normal: Vec3) -> Self {
        if normal.y > FACE_THRESHOLD {
            FaceKind::Top
        } else if normal.y < -FACE_THRESHOLD {
            FaceKind::Bottom
        } else {
            FaceKind::Side
        }
    }
}

/// Stateless snapper over the implicit placement grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridSnapper {
    pub config: GridSnapConfig,
}

impl GridSnapper {
    pub fn new(config: GridSnapConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn grid_size(&self) -> f32 {
        self.config.grid_size
    }

    /// Snap a raycast contact for the given shape.
    pub fn snap(&self, hit_point: Vec3, normal: Vec3, kind: ShapeKind) -> SnappedPose {
        match kind {
            ShapeKind::Cube => self.snap_cube(hit_point, normal),
            ShapeKind::Wheel => match self.config.wheel_policy {
                WheelSnapPolicy::CenterSnap => self.snap_wheel_center(hit_point, normal),
                WheelSnapPolicy::SurfaceAware => self.snap_wheel_surface(hit_point, normal),
            },
        }
    }

    /// Cube placement: X/Z centred in the cell, Y on a cell boundary chosen by face.
    ///
    /// The top-face ceiling uses the raw contact height. A contact lying exactly
    /// on a boundary (the common case of resting on the ground or another cube)
    /// must stay on that boundary rather than be nudged into the next cell.
    /// Side faces floor to the cell holding the contact, so a neighbour lands
    /// level with the cube that was hit.
    pub fn snap_cube(&self, hit_point: Vec3, normal: Vec3) -> SnappedPose {
        let g = self.config.grid_size;
        let p = self.nudge(hit_point, normal);

        let x = (p.x / g).floor() * g + g / 2.0;
        let z = (p.z / g).floor() * g + g / 2.0;
        let y = match FaceKind::from_normal(normal) {
            FaceKind::Top => (hit_point.y / g).ceil() * g,
            FaceKind::Bottom => (p.y / g).floor() * g,
            FaceKind::Side => (p.y / g).floor() * g,
        };

        SnappedPose::unscaled(Vec3::new(x, y, z), Quat::IDENTITY)
    }

    /// Wheel placement, centre-snap policy.
    pub fn snap_wheel_center(&self, hit_point: Vec3, normal: Vec3) -> SnappedPose {
        let p = self.nudge(hit_point, normal);
        SnappedPose::unscaled(self.round_to_grid(p), Quat::IDENTITY)
    }

    /// Wheel placement, surface-aware policy.
    pub fn snap_wheel_surface(&self, hit_point: Vec3, normal: Vec3) -> SnappedPose {
        let g = self.config.grid_size;
        let p = self.nudge(hit_point, normal);
        let mut target = self.round_to_grid(p);

        match FaceKind::from_normal(normal) {
            FaceKind::Top | FaceKind::Bottom => {
                target.y += self.config.wheel_radius;
            }
            FaceKind::Side => {
                // Stand off the grid-snapped face, not the snapped cell centre.
                let width = self.config.wheel_width;
                if normal.x.abs() > FACE_THRESHOLD {
                    let surface_x = (hit_point.x / g).round() * g + normal.x * (g / 2.0);
                    target.x = surface_x + normal.x * width;
                }
                if normal.z.abs() > FACE_THRESHOLD {
                    let surface_z = (hit_point.z / g).round() * g + normal.z * (g / 2.0);
                    target.z = surface_z + normal.z * width;
                }
            }
        }

        SnappedPose::unscaled(target, wheel_surface_rotation(normal))
    }

    /// Fallback pose in front of the holder when nothing is targeted.
    ///
    /// `holder` is the body pose (yaw only); the vertical offset is applied
    /// along world up. The preview turns to face the holder horizontally.
    pub fn hold_pose(&self, holder: &Pose, kind: ShapeKind, hold: &HoldPoseConfig) -> SnappedPose {
        let is_wheel = kind == ShapeKind::Wheel;

        let mut forward_offset = hold.hold_offset.z;
        let mut down_offset = 0.0;
        if is_wheel {
            forward_offset += hold.wheel_forward_offset;
            down_offset = hold.wheel_down_offset;
        }

        let position = holder.position
            + holder.forward() * forward_offset
            + Vec3::Y * (hold.hold_offset.y - down_offset)
            + holder.right() * hold.hold_offset.x;

        let facing = yaw_facing(holder.position - position)
            .or_else(|| yaw_facing(-holder.forward()))
            .unwrap_or(Quat::IDENTITY);

        if is_wheel {
            SnappedPose {
                pose: Pose::new(position, facing * Quat::from_rotation_z(FRAC_PI_2)),
                scale: hold.wheel_hold_scale,
            }
        } else {
            SnappedPose::unscaled(position, facing)
        }
    }

    #[inline]
    fn nudge(&self, hit_point: Vec3, normal: Vec3) -> Vec3 {
        hit_point + normal * self.config.surface_offset
    }

    #[inline]
    fn round_to_grid(&self, p: Vec3) -> Vec3 {
        let g = self.config.grid_size;
        (p / g).round() * g
    }
}

/// Wheel orientation on a face: up along the normal, forward along `Y × normal`
/// (world forward when that vanishes), then a quarter turn about local Y.
pub fn wheel_surface_rotation(normal: Vec3) -> Quat {
    let mut forward = Vec3::Y.cross(normal);
    if forward.length_squared() < 1e-12 {
        forward = Vec3::Z;
    }
    look_rotation(forward, normal) * Quat::from_rotation_y(FRAC_PI_2)
}
