//! Proximity Prompt
//!
//! World-space text label shown above a startable vehicle. The label is
//! plain data; drawing it is left to whatever UI layer the host provides.

use std::f32::consts::PI;

use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::world::{Pose, look_rotation};

/// Prompt appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub text: String,
    pub font_size: f32,
    pub color: Vec4,
    /// Offset from the driver block to the label
    pub offset: Vec3,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            text: "Press Q".to_string(),
            font_size: 12.0,
            color: Vec4::ONE,
            offset: Vec3::new(0.0, 3.0, 0.0),
        }
    }
}

/// A billboarded world-space label.
#[derive(Clone, Debug, PartialEq)]
pub struct PromptLabel {
    pub text: String,
    pub font_size: f32,
    pub color: Vec4,
    visible: bool,
    pose: Pose,
}

impl Default for PromptLabel {
    fn default() -> Self {
        Self::new(&PromptConfig::default())
    }
}

impl PromptLabel {
    /// Hidden label with the configured text.
    pub fn new(config: &PromptConfig) -> Self {
        Self {
            text: config.text.clone(),
            font_size: config.font_size,
            color: config.color,
            visible: false,
            pose: Pose::IDENTITY,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Show the label at `position`, turned to face `viewer`.
    pub fn show_at(&mut self, position: Vec3, viewer: Vec3) {
        self.visible = true;
        self.pose = Pose::new(position, billboard_rotation(position, viewer));
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Look at `viewer` with world up, then turn half a revolution so text drawn
/// on the label's front reads correctly from the viewer's side.
pub fn billboard_rotation(position: Vec3, viewer: Vec3) -> Quat {
    look_rotation(viewer - position, Vec3::Y) * Quat::from_rotation_y(PI)
}
