//! Input Bindings Module
//!
//! Maps logical game actions to physical keys or mouse buttons so gameplay
//! code polls named actions instead of hardcoded keys.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{KeyCode, MouseButton};

/// Logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InputAction {
    /// Walk forward (default: W)
    MoveForward,
    /// Walk backward (default: S)
    MoveBack,
    /// Strafe left (default: A)
    MoveLeft,
    /// Strafe right (default: D)
    MoveRight,
    /// Jump (default: Space)
    Jump,
    /// Enter/leave block placement (default: E)
    TogglePlacement,
    /// Select the cube shape (default: 1)
    SelectCube,
    /// Select the wheel shape (default: 2)
    SelectWheel,
    /// Select the next shape (default: Tab)
    CycleShape,
    /// Place the previewed block (default: left mouse)
    ConfirmPlacement,
    /// Start the targeted vehicle (default: Q)
    StartVehicle,
    /// Thrust forward while driving (default: W)
    DriveForward,
    /// Steer left while driving (default: A)
    TurnLeft,
    /// Steer right while driving (default: D)
    TurnRight,
}

impl InputAction {
    pub const ALL: [InputAction; 14] = [
        InputAction::MoveForward,
        InputAction::MoveBack,
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::Jump,
        InputAction::TogglePlacement,
        InputAction::SelectCube,
        InputAction::SelectWheel,
        InputAction::CycleShape,
        InputAction::ConfirmPlacement,
        InputAction::StartVehicle,
        InputAction::DriveForward,
        InputAction::TurnLeft,
        InputAction::TurnRight,
    ];
}

/// A physical input an action can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binding {
    Key(KeyCode),
    Mouse(MouseButton),
}

impl From<KeyCode> for Binding {
    fn from(key: KeyCode) -> Self {
        Binding::Key(key)
    }
}

impl From<MouseButton> for Binding {
    fn from(button: MouseButton) -> Self {
        Binding::Mouse(button)
    }
}

/// Action → physical input map.
///
/// Each action has at most one binding. Several actions may share a key
/// (walking and driving both use WASD; only one of them is live at a time).
#[derive(Debug, Clone)]
pub struct KeyBindings {
    action_to_binding: HashMap<InputAction, Binding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Default bindings:
    /// - WASD = walk / drive
    /// - Space = Jump
    /// - E = TogglePlacement
    /// - 1 / 2 = SelectCube / SelectWheel
    /// - Tab = CycleShape
    /// - Left mouse = ConfirmPlacement
    /// - Q = StartVehicle
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(InputAction::MoveForward, KeyCode::W);
        bindings.bind(InputAction::MoveBack, KeyCode::S);
        bindings.bind(InputAction::MoveLeft, KeyCode::A);
        bindings.bind(InputAction::MoveRight, KeyCode::D);
        bindings.bind(InputAction::Jump, KeyCode::Space);
        bindings.bind(InputAction::TogglePlacement, KeyCode::E);
        bindings.bind(InputAction::SelectCube, KeyCode::Digit1);
        bindings.bind(InputAction::SelectWheel, KeyCode::Digit2);
        bindings.bind(InputAction::CycleShape, KeyCode::Tab);
        bindings.bind(InputAction::ConfirmPlacement, MouseButton::Left);
        bindings.bind(InputAction::StartVehicle, KeyCode::Q);
        bindings.bind(InputAction::DriveForward, KeyCode::W);
        bindings.bind(InputAction::TurnLeft, KeyCode::A);
        bindings.bind(InputAction::TurnRight, KeyCode::D);

        bindings
    }

    /// No bindings at all.
    pub fn empty() -> Self {
        Self {
            action_to_binding: HashMap::new(),
        }
    }

    /// Bind an action, replacing its previous binding.
    pub fn bind(&mut self, action: InputAction, binding: impl Into<Binding>) {
        self.action_to_binding.insert(action, binding.into());
    }

    pub fn unbind(&mut self, action: InputAction) {
        self.action_to_binding.remove(&action);
    }

    pub fn binding_for(&self, action: InputAction) -> Option<Binding> {
        self.action_to_binding.get(&action).copied()
    }

    /// Every action bound to `binding`, sorted.
    pub fn actions_for(&self, binding: Binding) -> Vec<InputAction> {
        let mut actions: Vec<InputAction> = self
            .action_to_binding
            .iter()
            .filter(|(_, b)| **b == binding)
            .map(|(a, _)| *a)
            .collect();
        actions.sort();
        actions
    }

    /// Iterate over all bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&InputAction, &Binding)> {
        self.action_to_binding.iter()
    }
}
