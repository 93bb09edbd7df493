//! Player Module
//!
//! First-person character control.
//!
//! # Components
//!
//! - [`LocomotionController`] - Mouse-look yaw/pitch, walking, jumping and gravity
//!   - Yaw turns the body, pitch turns only the camera child
//!   - Movement goes through the world's collision-resolved character mover
//! - [`PlayerRig`] - The body/camera object pair the controller drives

pub mod locomotion;

pub use locomotion::{LocomotionConfig, LocomotionController, LocomotionInput, PlayerRig};
