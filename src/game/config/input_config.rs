//! Input Configuration
//!
//! Key bindings as a data structure grouped by concern, loadable from the
//! game config file and resolved into engine [`KeyBindings`].

use serde::{Deserialize, Serialize};

use crate::input::{InputAction, KeyBindings, KeyCode, MouseButton};

/// Category a key binding belongs to, returned by `InputConfig::classify_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCategory {
    Movement,
    Building,
    Vehicle,
}

/// Walking key bindings (WASD + jump).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
}

impl Default for MovementBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::W,
            backward: KeyCode::S,
            left: KeyCode::A,
            right: KeyCode::D,
            jump: KeyCode::Space,
        }
    }
}

/// Block placement bindings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingBindings {
    pub toggle_mode: KeyCode,
    pub cycle_shape: KeyCode,
    pub select_cube: KeyCode,
    pub select_wheel: KeyCode,
    pub confirm: MouseButton,
}

impl Default for BuildingBindings {
    fn default() -> Self {
        Self {
            toggle_mode: KeyCode::E,
            cycle_shape: KeyCode::Tab,
            select_cube: KeyCode::Digit1,
            select_wheel: KeyCode::Digit2,
            confirm: MouseButton::Left,
        }
    }
}

/// Vehicle start and driving bindings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleBindings {
    pub start: KeyCode,
    pub drive_forward: KeyCode,
    pub turn_left: KeyCode,
    pub turn_right: KeyCode,
}

impl Default for VehicleBindings {
    fn default() -> Self {
        Self {
            start: KeyCode::Q,
            drive_forward: KeyCode::W,
            turn_left: KeyCode::A,
            turn_right: KeyCode::D,
        }
    }
}

/// All key bindings of the game.
///
/// `InputConfig::default()` matches [`KeyBindings::new`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub movement: MovementBindings,
    pub building: BuildingBindings,
    pub vehicle: VehicleBindings,
}

impl InputConfig {
    /// Resolve into the action map polled by gameplay.
    pub fn to_bindings(&self) -> KeyBindings {
        let mut bindings = KeyBindings::empty();

        bindings.bind(InputAction::MoveForward, self.movement.forward);
        bindings.bind(InputAction::MoveBack, self.movement.backward);
        bindings.bind(InputAction::MoveLeft, self.movement.left);
        bindings.bind(InputAction::MoveRight, self.movement.right);
        bindings.bind(InputAction::Jump, self.movement.jump);

        bindings.bind(InputAction::TogglePlacement, self.building.toggle_mode);
        bindings.bind(InputAction::CycleShape, self.building.cycle_shape);
        bindings.bind(InputAction::SelectCube, self.building.select_cube);
        bindings.bind(InputAction::SelectWheel, self.building.select_wheel);
        bindings.bind(InputAction::ConfirmPlacement, self.building.confirm);

        bindings.bind(InputAction::StartVehicle, self.vehicle.start);
        bindings.bind(InputAction::DriveForward, self.vehicle.drive_forward);
        bindings.bind(InputAction::TurnLeft, self.vehicle.turn_left);
        bindings.bind(InputAction::TurnRight, self.vehicle.turn_right);

        bindings
    }

    /// Classify which category a key belongs to.
    ///
    /// Returns `None` if the key is not bound. Keys shared between walking and
    /// driving report `Movement`; priority is Movement, Building, Vehicle.
    pub fn classify_key(&self, key: KeyCode) -> Option<InputCategory> {
        let m = &self.movement;
        if [m.forward, m.backward, m.left, m.right, m.jump].contains(&key) {
            return Some(InputCategory::Movement);
        }

        let b = &self.building;
        if [b.toggle_mode, b.cycle_shape, b.select_cube, b.select_wheel].contains(&key) {
            return Some(InputCategory::Building);
        }

        let v = &self.vehicle;
        if [v.start, v.drive_forward, v.turn_left, v.turn_right].contains(&key) {
            return Some(InputCategory::Vehicle);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Binding;

    #[test]
    fn test_default_matches_engine_defaults() {
        let from_config = InputConfig::default().to_bindings();
        let engine = KeyBindings::new();
        for action in InputAction::ALL {
            assert_eq!(from_config.binding_for(action), engine.binding_for(action), "{action:?}");
        }
    }

    #[test]
    fn test_classify_key() {
        let config = InputConfig::default();
        assert_eq!(config.classify_key(KeyCode::W), Some(InputCategory::Movement));
        assert_eq!(config.classify_key(KeyCode::E), Some(InputCategory::Building));
        assert_eq!(config.classify_key(KeyCode::Q), Some(InputCategory::Vehicle));
        assert_eq!(config.classify_key(KeyCode::Digit3), None);
    }

    #[test]
    fn test_partial_json_override() {
        let config: InputConfig =
            serde_json::from_str(r#"{ "vehicle": { "start": "E" }, "building": { "toggle_mode": "Q" } }"#)
                .unwrap();
        assert_eq!(config.vehicle.start, KeyCode::E);
        assert_eq!(config.vehicle.turn_left, KeyCode::A);
        let bindings = config.to_bindings();
        assert_eq!(
            bindings.binding_for(InputAction::TogglePlacement),
            Some(Binding::Key(KeyCode::Q))
        );
    }
}
