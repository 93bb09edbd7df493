//! Game Module
//!
//! Gameplay systems that build on top of the engine: block placement,
//! vehicles, configuration and the session that runs them each frame.

pub mod builder;
pub mod config;
pub mod session;
pub mod vehicle;

pub use builder::{BlockCatalog, BlockPlacer, PlacementError, PlacementState, PreviewTarget};
pub use config::{ConfigError, GameConfig, InputConfig};
pub use session::{FrameReport, GarageSession, PLAYER_EYE_OFFSET, PLAYER_HALF_EXTENTS};
pub use vehicle::{DriverRegistry, PromptLabel, VehicleDriver, VehicleStarter};
