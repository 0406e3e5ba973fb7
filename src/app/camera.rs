//! Camera that tracks the player horizontally.
use bevy::prelude::*;
use gadget::player::Player;

pub const CAMERA_PIXELS_PER_UNIT: f32 = 40.0;

/// Keep the camera centred on the player's x and slightly above its feet.
///
/// Silently no-ops while there is no player.
pub fn follow_player(
    players: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(player) = players.get_single() else { return };
    for mut cam in &mut cameras {
        cam.translation.x = player.translation.x;
        cam.translation.y = player.translation.y.max(0.0) + 3.0;
    }
}
