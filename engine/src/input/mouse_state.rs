//! Look Delta Tracker
//!
//! Accumulates raw mouse motion between frames for first-person look.
//! The cursor is locked while looking; motion received while it is free
//! is dropped so unlocking and relocking never produces a jump.

use glam::Vec2;

/// Raw look-delta accumulator with cursor lock tracking.
///
/// ```rust,ignore
/// let mut look = FpsMouseState::new();
/// look.set_captured(true);
///
/// // Event loop
/// look.accumulate_delta(10.0, -5.0);
/// look.accumulate_delta(3.0, 2.0);
///
/// // Frame update
/// let delta = look.consume_delta(); // (13.0, -3.0)
/// ```
#[derive(Debug, Clone, Default)]
pub struct FpsMouseState {
    delta: Vec2,
    cursor_captured: bool,
}

impl FpsMouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add raw motion in device units. Ignored while the cursor is free.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        if self.cursor_captured {
            self.delta += Vec2::new(dx, dy);
        }
    }

    /// Take the motion accumulated since the last call.
    #[inline]
    pub fn consume_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }

    /// Lock or free the cursor. Freeing it discards pending motion.
    #[inline]
    pub fn set_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
        if !captured {
            self.delta = Vec2::ZERO;
        }
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.cursor_captured
    }

    #[inline]
    pub fn peek_delta(&self) -> Vec2 {
        self.delta
    }
}
