//! Camera Module
//!
//! View-ray helpers. Camera orientation itself is driven by the locomotion
//! controller (pitch on the camera object, yaw on the body).

pub mod raycast;

pub use raycast::{Ray, camera_center_ray, viewport_center_ray};
