//! User interface helpers: HUD, debug overlay and collider gizmos.
//!
//! The HUD shows health and the level outcome. The debug overlay (F1 by
//! default) periodically displays FPS, player position, velocity and the
//! grounded flag. The collider view (F2 by default) outlines every collider
//! and the ground sensor.

use crate::physics::{Body2d, Collider, ColliderCategory, GroundSensor};
use crate::player::{GameOutcome, LifeState, Player, PlayerController};
use crate::settings::Settings;
use bevy::diagnostic::{Diagnostic, DiagnosticsStore};
use bevy::prelude::*;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

#[derive(Resource, Default)]
pub struct ColliderGizmosVisible(pub bool);

#[derive(Component)]
pub struct DebugOverlayText;

#[derive(Component)]
pub struct HudText;

/// Insert debug overlay resources.
pub fn setup_debug_overlay(mut commands: Commands) {
    commands.insert_resource(DebugOverlayTimer(Timer::from_seconds(0.5, TimerMode::Repeating)));
    commands.insert_resource(DebugOverlayState::default());
    commands.insert_resource(ColliderGizmosVisible::default());
}

/// Toggle the debug overlay and the collider view on their bound keys.
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_views(
    mut state: ResMut<DebugOverlayState>,
    mut gizmos_visible: ResMut<ColliderGizmosVisible>,
    settings: Res<Settings>,
    input: Res<ButtonInput<KeyCode>>,
) {
    if input.just_pressed(settings.controls.key_for("toggle_debug", KeyCode::F1)) {
        state.visible = !state.visible;
    }
    if input.just_pressed(settings.controls.key_for("toggle_colliders", KeyCode::F2)) {
        gizmos_visible.0 = !gizmos_visible.0;
    }
}

/// Spawn the HUD and the (initially empty) debug overlay text.
pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        TextBundle::from_section("", TextStyle { font_size: 28.0, color: Color::WHITE, ..default() }).with_style(
            Style { position_type: PositionType::Absolute, right: Val::Px(16.0), top: Val::Px(12.0), ..default() },
        ),
        HudText,
    ));

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle { font_size: 18.0, color: Color::srgb(1.0, 1.0, 0.0), ..default() },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        }),
        DebugOverlayText,
    ));
}

/// HUD line for the current player and outcome.
#[must_use]
pub fn hud_line(controller: Option<&PlayerController>, outcome: GameOutcome) -> String {
    let health = controller.map_or(0, PlayerController::health);
    let status = match (outcome, controller.map(PlayerController::life_state)) {
        (GameOutcome::Won, _) => "Great Job!",
        (GameOutcome::Lost, _) | (_, Some(LifeState::Dead)) => "Game Over",
        _ => "",
    };
    if status.is_empty() {
        format!("Health: {health}")
    } else {
        format!("Health: {health}\n{status}")
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn update_hud(
    outcome: Res<GameOutcome>,
    players: Query<&PlayerController, With<Player>>,
    mut text: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut text) = text.get_single_mut() else { return };
    let line = hud_line(players.get_single().ok(), *outcome);
    if text.sections[0].value != line {
        text.sections[0].value = line;
    }
}

/// Update the debug overlay text once every interval.
#[allow(clippy::needless_pass_by_value)]
pub fn update_debug_overlay(
    diagnostics: Res<DiagnosticsStore>,
    state: Res<DebugOverlayState>,
    time: Res<Time>,
    mut timer: ResMut<DebugOverlayTimer>,
    mut query: Query<&mut Text, With<DebugOverlayText>>,
    player_query: Query<(&Transform, &Body2d, &GroundSensor), With<Player>>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    let Ok(mut text) = query.get_single_mut() else { return };

    if !state.visible {
        text.sections[0].value = String::new();
        return;
    }

    let fps = diagnostics
        .get(&bevy::diagnostic::FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let frame_time = diagnostics
        .get(&bevy::diagnostic::FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let player_str = if let Ok((tf, body, sensor)) = player_query.get_single() {
        format!(
            "Pos: ({:.2}, {:.2})\nVel: ({:.2}, {:.2})\nGravity scale: {:.1}\nGrounded: {}",
            tf.translation.x, tf.translation.y, body.velocity.x, body.velocity.y, body.gravity_scale, sensor.overlapping
        )
    } else {
        "Player: N/A".to_string()
    };

    text.sections[0].value = format!("FPS: {:.1}\nFrame Time: {:.2} ms\n{}", fps, frame_time * 1000.0, player_str);
}

fn category_color(category: ColliderCategory) -> Color {
    match category {
        ColliderCategory::Ground => Color::srgb(0.0, 1.0, 0.0),
        ColliderCategory::Enemy => Color::srgb(1.0, 0.2, 0.2),
        ColliderCategory::Victory => Color::srgb(0.2, 0.6, 1.0),
        ColliderCategory::Player => Color::WHITE,
        ColliderCategory::Projectile => Color::srgb(1.0, 1.0, 0.0),
        ColliderCategory::Untagged => Color::srgb(0.5, 0.5, 0.5),
    }
}

/// Outline colliders and ground sensors.
#[allow(clippy::needless_pass_by_value)]
pub fn render_collider_gizmos(
    visible: Res<ColliderGizmosVisible>,
    mut gizmos: Gizmos,
    colliders: Query<(&Transform, &Collider, Option<&Body2d>)>,
    sensors: Query<(&Transform, &GroundSensor)>,
) {
    if !visible.0 {
        return;
    }

    for (tf, collider, body) in &colliders {
        if body.is_some_and(|b| !b.simulated) {
            continue;
        }
        gizmos.rect_2d(tf.translation.truncate(), 0.0, collider.half_extents * 2.0, category_color(collider.category));
    }

    for (tf, sensor) in &sensors {
        let color = if sensor.overlapping { Color::srgb(0.0, 1.0, 1.0) } else { Color::srgb(1.0, 0.0, 1.0) };
        gizmos.rect_2d(tf.translation.truncate() + sensor.offset, 0.0, sensor.half_extents * 2.0, color);
    }
}
