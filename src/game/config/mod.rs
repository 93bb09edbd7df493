//! Config Module
//!
//! Centralized, file-loadable configuration for the garage session and its
//! key bindings.

pub mod game_config;
pub mod input_config;

pub use game_config::{ConfigError, GameConfig};
pub use input_config::{BuildingBindings, InputCategory, InputConfig, MovementBindings, VehicleBindings};
