//! Startup: camera, level and player.
use bevy::prelude::*;
use gadget::level::{load_level, spawn_level, LEVELS_DIR};
use gadget::player::spawn_player;
use gadget::settings::Settings;

use crate::app::CAMERA_PIXELS_PER_UNIT;

/// Spawn the 2D camera, the configured level and the player at its spawn point.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(mut commands: Commands, settings: Res<Settings>) {
    let mut camera = Camera2dBundle::default();
    camera.projection.scale = 1.0 / CAMERA_PIXELS_PER_UNIT;
    commands.spawn(camera);

    let layout = load_level(LEVELS_DIR, &settings.level);
    spawn_level(&mut commands, &layout);
    spawn_player(&mut commands, &settings, layout.spawn_point());
    commands.insert_resource(layout);
}
