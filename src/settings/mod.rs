//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! through the RON watcher utilities (see `ron::setup_ron_watcher`). Every field
//! has a serde default so a partial file only overrides what it names.
pub mod loader;

use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Designer-facing player tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    #[serde(default = "PlayerSettings::default_health")]
    pub health: u32, // Hit points at spawn. Only read when the player is spawned.
    #[serde(default = "PlayerSettings::default_jump_height")]
    pub jump_height: f32, // Vertical velocity applied on jump (units/s).
    #[serde(default = "PlayerSettings::default_walk_speed")]
    pub walk_speed: f32, // Horizontal velocity while walking (units/s).
    #[serde(default = "PlayerSettings::default_fall_speed")]
    pub fall_speed: f32, // Gravity scale applied to the body every frame while alive.
    #[serde(default = "PlayerSettings::default_shooting_angle")]
    pub shooting_angle: f32, // Arm and shot angle in degrees, counter-clockwise from +X.
    #[serde(default = "PlayerSettings::default_shooting_speed")]
    pub shooting_speed: f32, // Projectile launch speed (units/s).
    #[serde(default = "PlayerSettings::default_death_gravity_scale")]
    pub death_gravity_scale: f32, // Gravity scale applied once when the player dies.
}

impl PlayerSettings {
    fn default_health() -> u32 { 1 }
    fn default_jump_height() -> f32 { 15.0 }
    fn default_walk_speed() -> f32 { 7.0 }
    fn default_fall_speed() -> f32 { 2.0 }
    fn default_shooting_angle() -> f32 { 45.0 }
    fn default_shooting_speed() -> f32 { 15.0 }
    fn default_death_gravity_scale() -> f32 { 4.0 }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            health: Self::default_health(),
            jump_height: Self::default_jump_height(),
            walk_speed: Self::default_walk_speed(),
            fall_speed: Self::default_fall_speed(),
            shooting_angle: Self::default_shooting_angle(),
            shooting_speed: Self::default_shooting_speed(),
            death_gravity_scale: Self::default_death_gravity_scale(),
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers (editable by user)
}

impl ControlsSettings {
    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("right".to_string(), "D".to_string());
        m.insert("left".to_string(), "A".to_string());
        m.insert("jump".to_string(), "Space".to_string());
        m.insert("shoot".to_string(), "F".to_string());
        m.insert("toggle_debug".to_string(), "F1".to_string());
        m.insert("toggle_colliders".to_string(), "F2".to_string());
        m.insert("dump_debug".to_string(), "F3".to_string());
        m
    }

    /// Resolve the key bound to `action`, falling back to `default` when the
    /// action is unbound or its key name is not recognised.
    #[must_use]
    pub fn key_for(&self, action: &str, default: KeyCode) -> KeyCode {
        self.keybinds
            .get(action)
            .and_then(|s| Settings::keycode_from_str(s))
            .unwrap_or(default)
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { keybinds: Self::default_keybinds() }
    }
}

/// World physics constants used by the body integrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsSettings {
    #[serde(default = "PhysicsSettings::default_gravity")]
    pub gravity: f32, // Downward acceleration before gravity scale (units/s^2).
    #[serde(default = "PhysicsSettings::default_max_fall_speed")]
    pub max_fall_speed: f32, // Terminal downward speed (units/s).
    #[serde(default = "PhysicsSettings::default_projectile_lifetime")]
    pub projectile_lifetime: f32, // Seconds before an active shot is recycled.
    #[serde(default = "PhysicsSettings::default_ground_friction")]
    pub ground_friction: f32, // Horizontal velocity decay per second while resting on ground.
}

impl PhysicsSettings {
    fn default_gravity() -> f32 { 9.81 }
    fn default_max_fall_speed() -> f32 { 50.0 }
    fn default_projectile_lifetime() -> f32 { 3.0 }
    fn default_ground_friction() -> f32 { 8.0 }
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: Self::default_gravity(),
            max_fall_speed: Self::default_max_fall_speed(),
            projectile_lifetime: Self::default_projectile_lifetime(),
            ground_friction: Self::default_ground_friction(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub physics: PhysicsSettings,
    #[serde(default = "Settings::default_level")]
    pub level: String, // Level file name under `data/levels/`.
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player: PlayerSettings::default(),
            controls: ControlsSettings::default(),
            physics: PhysicsSettings::default(),
            level: Self::default_level(),
        }
    }
}

impl Settings {
    fn default_level() -> String { "level1.ron".to_string() }

    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Descriptions of each setting, grouped by section, for tooling that
    /// writes a commented settings file.
    #[must_use]
    pub fn field_descriptions() -> HashMap<&'static str, HashMap<&'static str, &'static str>> {
        let mut out: HashMap<&'static str, HashMap<&'static str, &'static str>> = HashMap::new();

        out.insert("player", HashMap::from([
            ("health", "Hit points at spawn. Reloading never heals a live player."),
            ("jump_height", "Vertical velocity applied when jumping from the ground."),
            ("walk_speed", "Horizontal velocity while the left/right key is held."),
            ("fall_speed", "Gravity scale applied to the player body every frame."),
            ("shooting_angle", "Arm and shot angle in degrees (0 = right, 90 = up)."),
            ("shooting_speed", "Launch speed of the shot."),
            ("death_gravity_scale", "Gravity scale applied when the player dies."),
        ]));

        out.insert("controls", HashMap::from([
            ("keybinds", "Map of action names (right, left, jump, shoot, ...) to key identifiers."),
        ]));

        out.insert("physics", HashMap::from([
            ("gravity", "Downward acceleration before the body's gravity scale."),
            ("max_fall_speed", "Terminal downward speed."),
            ("projectile_lifetime", "Seconds a shot stays active before it can be fired again."),
            ("ground_friction", "How quickly horizontal speed decays while standing on ground."),
        ]));

        out
    }

    /// Convert a string key identifier (e.g., from `controls.keybinds`) into a `KeyCode`.
    ///
    /// Matching is case-insensitive. Single letters and digits map to their keys;
    /// named keys cover function keys, arrows, whitespace, modifiers and a few
    /// punctuation keys.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.trim().to_ascii_uppercase();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(k) = letter_key(c).or_else(|| digit_key(c)) {
                return Some(k);
            }
        }

        Some(match s.as_str() {
            "F1" => KeyCode::F1,
            "F2" => KeyCode::F2,
            "F3" => KeyCode::F3,
            "F4" => KeyCode::F4,
            "F5" => KeyCode::F5,
            "F6" => KeyCode::F6,
            "F7" => KeyCode::F7,
            "F8" => KeyCode::F8,
            "F9" => KeyCode::F9,
            "F10" => KeyCode::F10,
            "F11" => KeyCode::F11,
            "F12" => KeyCode::F12,

            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "BACKSPACE" | "BACK" => KeyCode::Backspace,

            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            "," | "COMMA" => KeyCode::Comma,
            "." | "DOT" | "PERIOD" => KeyCode::Period,
            "/" | "SLASH" => KeyCode::Slash,
            ";" | "SEMICOLON" => KeyCode::Semicolon,

            _ => return None,
        })
    }
}

fn letter_key(c: char) -> Option<KeyCode> {
    Some(match c {
        'A' => KeyCode::KeyA,
        'B' => KeyCode::KeyB,
        'C' => KeyCode::KeyC,
        'D' => KeyCode::KeyD,
        'E' => KeyCode::KeyE,
        'F' => KeyCode::KeyF,
        'G' => KeyCode::KeyG,
        'H' => KeyCode::KeyH,
        'I' => KeyCode::KeyI,
        'J' => KeyCode::KeyJ,
        'K' => KeyCode::KeyK,
        'L' => KeyCode::KeyL,
        'M' => KeyCode::KeyM,
        'N' => KeyCode::KeyN,
        'O' => KeyCode::KeyO,
        'P' => KeyCode::KeyP,
        'Q' => KeyCode::KeyQ,
        'R' => KeyCode::KeyR,
        'S' => KeyCode::KeyS,
        'T' => KeyCode::KeyT,
        'U' => KeyCode::KeyU,
        'V' => KeyCode::KeyV,
        'W' => KeyCode::KeyW,
        'X' => KeyCode::KeyX,
        'Y' => KeyCode::KeyY,
        'Z' => KeyCode::KeyZ,
        _ => return None,
    })
}

fn digit_key(c: char) -> Option<KeyCode> {
    Some(match c {
        '0' => KeyCode::Digit0,
        '1' => KeyCode::Digit1,
        '2' => KeyCode::Digit2,
        '3' => KeyCode::Digit3,
        '4' => KeyCode::Digit4,
        '5' => KeyCode::Digit5,
        '6' => KeyCode::Digit6,
        '7' => KeyCode::Digit7,
        '8' => KeyCode::Digit8,
        '9' => KeyCode::Digit9,
        _ => return None,
    })
}
