//! Player construction.
//!
//! `spawn_player` builds the player together with every component and linked
//! entity the controller systems rely on, so a controller can never exist
//! without its body, sensor, animator, arm, hand or shot.

use crate::animation::{Animator, SpriteAnimation, ALIVE};
use crate::physics::{Body2d, Collider, ColliderCategory, Contacts, GroundSensor};
use crate::player::{KeyBindings, Player, PlayerController, PlayerRig, PlayerTuning};
use crate::projectile::Projectile;
use crate::settings::Settings;
use bevy::prelude::*;
use bevy::sprite::Anchor;

pub const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.6);
pub const ARM_LENGTH: f32 = 0.7;
pub const SHOT_SIZE: Vec2 = Vec2::new(0.25, 0.25);

const PLAYER_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);
const ARM_COLOR: Color = Color::srgb(0.15, 0.4, 0.8);
const SHOT_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);

/// Spawn the player at `at` using the current settings. Returns the player entity.
pub fn spawn_player(commands: &mut Commands, settings: &Settings, at: Vec2) -> Entity {
    let tuning = PlayerTuning::from(&settings.player);

    let projectile = commands
        .spawn((
            SpriteBundle {
                sprite: Sprite { color: SHOT_COLOR, custom_size: Some(SHOT_SIZE), ..default() },
                transform: Transform::from_xyz(at.x, at.y, 2.0),
                visibility: Visibility::Hidden,
                ..default()
            },
            Body2d { velocity: Vec2::ZERO, gravity_scale: 0.0, simulated: false },
            Collider::new(SHOT_SIZE, ColliderCategory::Projectile),
            Contacts::default(),
            Projectile::default(),
            Name::new("Shot"),
        ))
        .id();

    let hand = commands
        .spawn((SpatialBundle::from_transform(Transform::from_xyz(ARM_LENGTH, 0.0, 0.0)), Name::new("Hand")))
        .id();

    let arm = commands
        .spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: ARM_COLOR,
                    custom_size: Some(Vec2::new(ARM_LENGTH, 0.15)),
                    anchor: Anchor::CenterLeft,
                    ..default()
                },
                transform: Transform::from_xyz(0.0, PLAYER_SIZE.y * 0.15, 0.1),
                ..default()
            },
            Name::new("Arm"),
        ))
        .add_child(hand)
        .id();

    let mut animator = Animator::default();
    animator.set_bool(ALIVE, true);

    let player = commands
        .spawn((
            SpriteBundle {
                sprite: Sprite { color: PLAYER_COLOR, custom_size: Some(PLAYER_SIZE), ..default() },
                transform: Transform::from_xyz(at.x, at.y, 1.0),
                ..default()
            },
            Player,
            PlayerController::new(settings.player.health, tuning),
            KeyBindings::from(&settings.controls),
            Body2d { gravity_scale: tuning.fall_speed, ..default() },
            Collider::new(PLAYER_SIZE, ColliderCategory::Player),
            GroundSensor::under(PLAYER_SIZE),
            Contacts::default(),
            animator,
            SpriteAnimation::new(PLAYER_SIZE, PLAYER_COLOR),
            Name::new("Player"),
        ))
        .add_child(arm)
        .insert(PlayerRig { arm, hand, projectile })
        .id();

    info!("spawned player at ({:.1}, {:.1}) with {} health", at.x, at.y, settings.player.health);
    player
}
