//! Block Garage Engine Library
//!
//! Gameplay core for a first-person block building and driving sandbox.
//! Players snap cubes and wheels onto a grid, join them into structures and
//! drive the result. The host engine (rendering, physics, input devices) is
//! reached only through the [`physics::PhysicsWorld`] trait, so every
//! component here is a plain stateful object driven by a caller-owned loop.
//!
//! # Modules
//!
//! - [`world`] - Poses, orientation helpers and grid snapping
//! - [`physics`] - The world interface, collision helpers, joint connectivity
//!   and a headless sandbox world
//! - [`input`] - Keyboard/mouse state and named input actions
//! - [`camera`] - View-centre rays
//! - [`player`] - First-person locomotion
//! - [`game`] - Block placement, vehicles, configuration and the session loop
//!
//! # Example
//!
//! ```ignore
//! use block_garage_engine::game::{GameConfig, GarageSession};
//! use block_garage_engine::input::{InputState, KeyBindings, KeyCode};
//! use block_garage_engine::physics::SandboxWorld;
//!
//! let config = GameConfig::default();
//! let mut world = SandboxWorld::new();
//! world.spawn_ground(200.0, 0.0);
//! let rig = GarageSession::spawn_player(&mut world, glam::Vec3::new(0.0, 2.5, 0.0));
//! let mut session = GarageSession::new(&config, rig);
//!
//! let bindings = config.input.to_bindings();
//! let mut input = InputState::new();
//! input.keyboard.handle_key(KeyCode::E, true);
//!
//! let frame = input.snapshot(&bindings);
//! session.frame(&mut world, &frame, 1.0 / 60.0);
//! session.fixed_tick(&mut world, &frame, 1.0 / 60.0);
//! world.step(1.0 / 60.0);
//! input.end_frame();
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod player;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export world types for convenience
pub use world::{GridSnapper, Pose, ShapeKind};
// Re-export commonly used input types
pub use input::{ActionFrame, InputAction, InputState, KeyCode, KeyBindings, MouseButton};
// Re-export physics seam
pub use physics::{ObjectId, PhysicsWorld, SandboxWorld};
// Re-export player types
pub use player::{LocomotionController, PlayerRig};
