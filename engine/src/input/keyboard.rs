//! Keyboard Input Module
//!
//! Tracks held keys plus keys pressed this frame. Decoupled from any
//! windowing system: the host feeds key events in, gameplay polls.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    Q,
    E,
    Space,
    Tab,

    Digit1,
    Digit2,
    Digit3,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Held/edge state of every key.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
    released_this_frame: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key event.
    ///
    /// Auto-repeat presses of an already-held key do not register a new edge.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        if pressed {
            if self.held.insert(key) {
                self.pressed_this_frame.insert(key);
            }
        } else if self.held.remove(&key) {
            self.released_this_frame.insert(key);
        }
    }

    /// Key is currently down.
    #[inline]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Key went down since the last [`KeyboardState::end_frame`].
    #[inline]
    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed_this_frame.contains(&key)
    }

    /// Key went up since the last [`KeyboardState::end_frame`].
    #[inline]
    pub fn was_released(&self, key: KeyCode) -> bool {
        self.released_this_frame.contains(&key)
    }

    /// Forget this frame's edges; held keys stay held.
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.released_this_frame.clear();
    }

    /// Release everything (e.g. on focus loss).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
