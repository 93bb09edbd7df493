//! Mouse Input Module
//!
//! Mouse button state with per-frame press edges.

use serde::{Deserialize, Serialize};

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    #[inline]
    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// State of all mouse buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    held: [bool; 3],
    pressed_this_frame: [bool; 3],
}

impl MouseState {
    /// Create a new mouse state with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a button event.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        let i = button.index();
        if pressed && !self.held[i] {
            self.pressed_this_frame[i] = true;
        }
        self.held[i] = pressed;
    }

    #[inline]
    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held[button.index()]
    }

    #[inline]
    pub fn was_pressed(&self, button: MouseButton) -> bool {
        self.pressed_this_frame[button.index()]
    }

    /// Forget this frame's edges.
    pub fn end_frame(&mut self) {
        self.pressed_this_frame = [false; 3];
    }

    /// Reset all buttons to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_edge() {
        let mut mouse = MouseState::new();
        mouse.set_button(MouseButton::Left, true);
        assert!(mouse.was_pressed(MouseButton::Left));
        assert!(mouse.is_held(MouseButton::Left));
        assert!(!mouse.was_pressed(MouseButton::Right));

        mouse.end_frame();
        assert!(!mouse.was_pressed(MouseButton::Left));
        assert!(mouse.is_held(MouseButton::Left));

        mouse.set_button(MouseButton::Left, false);
        assert!(!mouse.is_held(MouseButton::Left));
    }
}
