//! Vehicle Module
//!
//! Driving player-built structures: the driver capability and its registry,
//! joint-structure discovery and release, the proximity prompt and the
//! starter that ties them to the player's view.

pub mod driver;
pub mod prompt;
pub mod starter;
pub mod structure;

pub use driver::{DriveInput, DriverRegistry, VehicleConfig, VehicleDriver};
pub use prompt::{PromptConfig, PromptLabel, billboard_rotation};
pub use starter::{StarterConfig, VehicleStarter};
pub use structure::{Structure, discover_structure, release_structure};
