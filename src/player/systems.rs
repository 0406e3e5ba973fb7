//! ECS glue around `PlayerController`.

use crate::animation::{Animator, ALIVE, JUMP};
use crate::physics::{Body2d, CollisionStarted, GroundSensor};
use crate::player::{
    AnimationTrigger, CollisionOutcome, FrameContext, FrameIntents, GameOutcome, InputSnapshot,
    KeyBindings, Player, PlayerController, PlayerRig, PlayerTuning,
};
use crate::projectile::{self, Projectile};
use crate::settings::Settings;
use bevy::prelude::*;

/// Run the controller for every player and apply its intents.
///
/// # Arguments
/// * `keys` - keyboard state, read through each player's `KeyBindings`
/// * `players` - controller, bindings, sensor, rig, body and animator of each player
/// * `hands` - world transforms used to find the hand anchor
/// * `arms` - arm transforms, rotated to the shooting angle
/// * `shots` - the projectile bodies referenced by `PlayerRig::projectile`
#[allow(clippy::needless_pass_by_value, clippy::type_complexity)]
pub fn player_update(
    keys: Res<ButtonInput<KeyCode>>,
    mut players: Query<
        (&PlayerController, &KeyBindings, &GroundSensor, &PlayerRig, &mut Body2d, &mut Animator),
        With<Player>,
    >,
    hands: Query<&GlobalTransform>,
    mut arms: Query<&mut Transform, (Without<Player>, Without<Projectile>)>,
    mut shots: Query<(&mut Transform, &mut Body2d, &mut Visibility, &mut Projectile), Without<Player>>,
) {
    for (controller, bindings, sensor, rig, mut body, mut animator) in &mut players {
        if !controller.is_alive() {
            continue;
        }

        let input = InputSnapshot::capture(&keys, bindings);
        let ctx = FrameContext {
            grounded: sensor.overlapping,
            projectile_active: shots.get(rig.projectile).is_ok_and(|(_, b, _, _)| projectile::is_active(b)),
            velocity: body.velocity,
            hand_position: hands.get(rig.hand).map_or(Vec2::ZERO, |g| g.translation().truncate()),
        };

        let intents = controller.tick(&input, &ctx);
        apply_intents(&intents, rig, &mut body, &mut animator, &mut arms, &mut shots);
    }
}

#[allow(clippy::type_complexity)]
fn apply_intents(
    intents: &FrameIntents,
    rig: &PlayerRig,
    body: &mut Body2d,
    animator: &mut Animator,
    arms: &mut Query<&mut Transform, (Without<Player>, Without<Projectile>)>,
    shots: &mut Query<(&mut Transform, &mut Body2d, &mut Visibility, &mut Projectile), Without<Player>>,
) {
    if let Some(angle) = intents.arm_angle
        && let Ok(mut arm) = arms.get_mut(rig.arm)
    {
        arm.rotation = Quat::from_rotation_z(angle.to_radians());
    }
    if let Some(g) = intents.gravity_scale {
        body.gravity_scale = g;
    }
    if let Some(v) = intents.velocity {
        body.velocity = v;
    }
    if let Some(AnimationTrigger::Jump) = intents.animation {
        animator.set_trigger(JUMP);
    }
    if let Some(launch) = intents.launch
        && let Ok((mut tf, mut shot_body, mut vis, mut proj)) = shots.get_mut(rig.projectile)
    {
        projectile::activate(&mut tf, &mut shot_body, &mut vis, &mut proj, &launch);
    }
}

/// Feed collision-enter events to the controllers they concern.
pub fn player_collisions(
    mut events: EventReader<CollisionStarted>,
    mut players: Query<(&mut PlayerController, &mut Body2d, &mut Animator), With<Player>>,
    mut outcome: ResMut<GameOutcome>,
) {
    for ev in events.read() {
        let Ok((mut controller, mut body, mut animator)) = players.get_mut(ev.entity) else {
            continue;
        };

        match controller.on_collision(ev.other_category) {
            CollisionOutcome::Victory => {
                info!("Great Job!");
                if *outcome == GameOutcome::Playing {
                    *outcome = GameOutcome::Won;
                }
            }
            CollisionOutcome::Damaged { remaining } => {
                info!("player hit by {:?}, health left: {remaining}", ev.other);
            }
            CollisionOutcome::Died(fx) => {
                animator.set_bool(ALIVE, fx.alive_flag);
                body.velocity = fx.velocity;
                body.gravity_scale = fx.gravity_scale;
                info!("player died");
                if *outcome == GameOutcome::Playing {
                    *outcome = GameOutcome::Lost;
                }
            }
            CollisionOutcome::Ignored => {}
        }
    }
}

/// Push reloaded tunables and key bindings into live players.
///
/// Health is only read at spawn and is never synced.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_player_tuning(
    settings: Res<Settings>,
    mut players: Query<(&mut PlayerController, &mut KeyBindings), With<Player>>,
    mut last: Local<Option<(PlayerTuning, KeyBindings)>>,
) {
    let desired = (PlayerTuning::from(&settings.player), KeyBindings::from(&settings.controls));
    if *last == Some(desired) {
        return;
    }

    for (mut controller, mut bindings) in &mut players {
        controller.tuning = desired.0;
        *bindings = desired.1;
    }
    *last = Some(desired);
}
