//! Input Module
//!
//! Platform-agnostic input handling. The host feeds raw key, button and
//! motion events into an [`InputState`]; once per frame it resolves them
//! through [`KeyBindings`] into an [`ActionFrame`] that gameplay polls.
//!
//! # Example
//!
//! ```rust,ignore
//! use block_garage_engine::input::{InputAction, InputState, KeyBindings, KeyCode};
//!
//! let bindings = KeyBindings::new();
//! let mut input = InputState::new();
//!
//! input.keyboard.handle_key(KeyCode::E, true);
//! let frame = input.snapshot(&bindings);
//! if frame.pressed(InputAction::TogglePlacement) {
//!     // enter placement mode
//! }
//! input.end_frame();
//! ```

pub mod bindings;
pub mod keyboard;
pub mod mouse;
pub mod mouse_state;

use std::collections::HashSet;

use glam::Vec2;

pub use bindings::{Binding, InputAction, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState};
pub use mouse::{MouseButton, MouseState};
pub use mouse_state::FpsMouseState;

/// Combined raw input state for keyboard, mouse buttons and look motion.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub look: FpsMouseState,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve this frame's raw state into actions. Consumes the look delta.
    pub fn snapshot(&mut self, bindings: &KeyBindings) -> ActionFrame {
        let mut frame = ActionFrame {
            look: self.look.consume_delta(),
            ..Default::default()
        };
        for (action, binding) in bindings.iter() {
            let (held, pressed) = match *binding {
                Binding::Key(key) => (self.keyboard.is_held(key), self.keyboard.was_pressed(key)),
                Binding::Mouse(button) => (self.mouse.is_held(button), self.mouse.was_pressed(button)),
            };
            if held {
                frame.held.insert(*action);
            }
            if pressed {
                frame.pressed.insert(*action);
            }
        }
        frame
    }

    /// Clear per-frame edges. Call after every component has run.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
    }

    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.mouse.reset();
        self.look.consume_delta();
    }
}

/// Per-frame snapshot of named actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionFrame {
    pressed: HashSet<InputAction>,
    held: HashSet<InputAction>,
    /// Look motion since the previous frame (device units)
    pub look: Vec2,
}

impl ActionFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Action went down this frame.
    #[inline]
    pub fn pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(&action)
    }

    /// Action is down (including the frame it went down).
    #[inline]
    pub fn held(&self, action: InputAction) -> bool {
        self.held.contains(&action) || self.pressed.contains(&action)
    }

    /// Walk input: x = strafe right, y = forward, each in [-1, 1].
    pub fn move_axis(&self) -> Vec2 {
        let axis = |pos: InputAction, neg: InputAction| {
            (self.held(pos) as i32 - self.held(neg) as i32) as f32
        };
        Vec2::new(
            axis(InputAction::MoveRight, InputAction::MoveLeft),
            axis(InputAction::MoveForward, InputAction::MoveBack),
        )
    }

    /// Steering input: -1 left, +1 right.
    pub fn turn_axis(&self) -> f32 {
        (self.held(InputAction::TurnRight) as i32 - self.held(InputAction::TurnLeft) as i32) as f32
    }

    /// Mark an action as pressed this frame.
    pub fn with_pressed(mut self, action: InputAction) -> Self {
        self.pressed.insert(action);
        self
    }

    /// Mark an action as held.
    pub fn with_held(mut self, action: InputAction) -> Self {
        self.held.insert(action);
        self
    }

    pub fn with_look(mut self, look: Vec2) -> Self {
        self.look = look;
        self
    }
}
