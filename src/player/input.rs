//! Keyboard bindings and per-frame input snapshots.

use crate::settings::ControlsSettings;
use bevy::prelude::*;

/// The four gameplay keys, resolved from `controls.keybinds`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub right: KeyCode,
    pub left: KeyCode,
    pub jump: KeyCode,
    pub shoot: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self { right: KeyCode::KeyD, left: KeyCode::KeyA, jump: KeyCode::Space, shoot: KeyCode::KeyF }
    }
}

impl From<&ControlsSettings> for KeyBindings {
    fn from(c: &ControlsSettings) -> Self {
        let d = KeyBindings::default();
        Self {
            right: c.key_for("right", d.right),
            left: c.key_for("left", d.left),
            jump: c.key_for("jump", d.jump),
            shoot: c.key_for("shoot", d.shoot),
        }
    }
}

/// Logical key state for one frame. Jump is edge-triggered, the rest are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub jump_pressed: bool,
    pub right_held: bool,
    pub left_held: bool,
    pub shoot_held: bool,
}

impl InputSnapshot {
    #[must_use]
    pub fn capture(keys: &ButtonInput<KeyCode>, bindings: &KeyBindings) -> Self {
        Self {
            jump_pressed: keys.just_pressed(bindings.jump),
            right_held: keys.pressed(bindings.right),
            left_held: keys.pressed(bindings.left),
            shoot_held: keys.pressed(bindings.shoot),
        }
    }
}
