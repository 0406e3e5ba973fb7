//! Body integration: gravity, velocity and resolution against ground.
//!
//! Register `integrate_bodies` as a system to run it each frame. The core step
//! is exposed as `integrate_step` so tests and benchmarks run the same logic.

use crate::physics::{penetrates, Body2d, Collider, ColliderCategory};
use crate::settings::{PhysicsSettings, Settings};
use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

/// Shrink applied to the off-axis extent while resolving one axis, so a body
/// resting exactly on a surface is not treated as penetrating it sideways.
const SKIN: f32 = 0.001;

/// Advance one body by `dt`. Returns `true` when the body ends the step
/// resting on top of a solid.
pub fn integrate_step(
    pos: &mut Vec2,
    body: &mut Body2d,
    half: Vec2,
    solids: &[Aabb2d],
    cfg: &PhysicsSettings,
    dt: f32,
) -> bool {
    if !body.simulated {
        return false;
    }

    body.velocity.y -= cfg.gravity * body.gravity_scale * dt;
    if body.velocity.y < -cfg.max_fall_speed {
        body.velocity.y = -cfg.max_fall_speed;
    }

    pos.x += body.velocity.x * dt;
    let x_half = Vec2::new(half.x, (half.y - SKIN).max(0.0));
    for s in solids {
        if !penetrates(&Aabb2d::new(*pos, x_half), s) {
            continue;
        }
        if body.velocity.x > 0.0 {
            pos.x = s.min.x - half.x;
        } else if body.velocity.x < 0.0 {
            pos.x = s.max.x + half.x;
        }
        body.velocity.x = 0.0;
    }

    pos.y += body.velocity.y * dt;
    let y_half = Vec2::new((half.x - SKIN).max(0.0), half.y);
    let mut resting = false;
    for s in solids {
        if !penetrates(&Aabb2d::new(*pos, y_half), s) {
            continue;
        }
        if body.velocity.y <= 0.0 {
            pos.y = s.max.y + half.y;
            resting = true;
        } else {
            pos.y = s.min.y - half.y;
        }
        body.velocity.y = 0.0;
    }

    if resting {
        body.velocity.x *= (1.0 - cfg.ground_friction * dt).max(0.0);
    }
    resting
}

/// Integrate every simulated body against the static `Ground` colliders.
///
/// Projectile bodies pass through ground; they are recycled on contact by the
/// projectile systems instead.
#[allow(clippy::needless_pass_by_value)]
pub fn integrate_bodies(
    time: Res<Time>,
    settings: Res<Settings>,
    mut bodies: Query<(&mut Transform, &mut Body2d, &Collider)>,
    statics: Query<(&Transform, &Collider), Without<Body2d>>,
) {
    let dt = time.delta_seconds();
    if dt <= 0.0 {
        return;
    }

    let solids: Vec<Aabb2d> = statics
        .iter()
        .filter(|(_, c)| c.category == ColliderCategory::Ground)
        .map(|(t, c)| c.aabb_at(t.translation.truncate()))
        .collect();

    for (mut tf, mut body, collider) in &mut bodies {
        let mut pos = tf.translation.truncate();
        let blockers: &[Aabb2d] = if collider.category == ColliderCategory::Projectile { &[] } else { &solids };
        integrate_step(&mut pos, &mut body, collider.half_extents, blockers, &settings.physics, dt);
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
    }
}
