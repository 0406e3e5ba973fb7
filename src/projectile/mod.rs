//! The player's reusable shot.
//!
//! A single projectile entity is spawned hidden with an unsimulated body and
//! toggled active when fired. It is recycled when it touches something other
//! than the player or outlives `physics.projectile_lifetime`.

use crate::physics::{Body2d, ColliderCategory, CollisionStarted};
use crate::player::ProjectileLaunch;
use crate::settings::Settings;
use bevy::prelude::*;

#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Seconds since the last launch.
    pub age: f32,
}

/// Whether the shot is currently in flight.
#[must_use]
pub fn is_active(body: &Body2d) -> bool {
    body.simulated
}

/// Put the shot in flight at `launch.position` with `launch.velocity`.
pub fn activate(
    tf: &mut Transform,
    body: &mut Body2d,
    visibility: &mut Visibility,
    projectile: &mut Projectile,
    launch: &ProjectileLaunch,
) {
    tf.translation.x = launch.position.x;
    tf.translation.y = launch.position.y;
    body.velocity = launch.velocity;
    body.simulated = true;
    *visibility = Visibility::Visible;
    projectile.age = 0.0;
}

pub fn deactivate(body: &mut Body2d, visibility: &mut Visibility, projectile: &mut Projectile) {
    body.simulated = false;
    body.velocity = Vec2::ZERO;
    *visibility = Visibility::Hidden;
    projectile.age = 0.0;
}

/// Recycle shots that have been flying for longer than their lifetime.
#[allow(clippy::needless_pass_by_value)]
pub fn age_projectiles(
    time: Res<Time>,
    settings: Res<Settings>,
    mut q: Query<(&mut Body2d, &mut Visibility, &mut Projectile)>,
) {
    let lifetime = settings.physics.projectile_lifetime;
    for (mut body, mut vis, mut proj) in &mut q {
        if !is_active(&body) {
            continue;
        }
        proj.age += time.delta_seconds();
        if proj.age >= lifetime {
            deactivate(&mut body, &mut vis, &mut proj);
        }
    }
}

/// Recycle shots on their first contact with anything solid or hostile.
pub fn recycle_projectiles_on_hit(
    mut events: EventReader<CollisionStarted>,
    mut q: Query<(&mut Body2d, &mut Visibility, &mut Projectile)>,
) {
    for ev in events.read() {
        if matches!(ev.other_category, ColliderCategory::Player | ColliderCategory::Victory) {
            continue;
        }
        if let Ok((mut body, mut vis, mut proj)) = q.get_mut(ev.entity)
            && is_active(&body)
        {
            debug!("shot hit {:?} ({:?})", ev.other, ev.other_category);
            deactivate(&mut body, &mut vis, &mut proj);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn inactive_shot() -> (Transform, Body2d, Visibility, Projectile) {
        (
            Transform::default(),
            Body2d { simulated: false, gravity_scale: 0.0, ..default() },
            Visibility::Hidden,
            Projectile::default(),
        )
    }

    #[test]
    fn activate_then_deactivate() {
        let (mut tf, mut body, mut vis, mut proj) = inactive_shot();
        let launch = ProjectileLaunch { position: Vec2::new(2.0, 3.0), velocity: Vec2::new(1.0, 1.0) };
        activate(&mut tf, &mut body, &mut vis, &mut proj, &launch);
        assert!(is_active(&body));
        assert_eq!(tf.translation.truncate(), Vec2::new(2.0, 3.0));
        assert_eq!(body.velocity, Vec2::new(1.0, 1.0));
        assert_eq!(vis, Visibility::Visible);

        deactivate(&mut body, &mut vis, &mut proj);
        assert!(!is_active(&body));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(vis, Visibility::Hidden);
    }

    #[test]
    fn shots_expire_after_lifetime() {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.insert_resource(Settings::defaults());
        app.add_systems(Update, age_projectiles);

        let (mut tf, mut body, mut vis, mut proj) = inactive_shot();
        let launch = ProjectileLaunch { position: Vec2::ZERO, velocity: Vec2::X };
        activate(&mut tf, &mut body, &mut vis, &mut proj, &launch);
        let e = app.world_mut().spawn((tf, body, vis, proj)).id();

        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_secs(1));
        app.update();
        assert!(is_active(app.world().get::<Body2d>(e).unwrap()));

        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_secs(5));
        app.update();
        assert!(!is_active(app.world().get::<Body2d>(e).unwrap()));
    }

    #[test]
    fn hits_recycle_unless_player_or_victory() {
        let mut app = App::new();
        app.add_event::<CollisionStarted>();
        app.add_systems(Update, recycle_projectiles_on_hit);

        let (mut tf, mut body, mut vis, mut proj) = inactive_shot();
        let launch = ProjectileLaunch { position: Vec2::ZERO, velocity: Vec2::X };
        activate(&mut tf, &mut body, &mut vis, &mut proj, &launch);
        let shot = app.world_mut().spawn((tf, body, vis, proj)).id();
        let other = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(CollisionStarted { entity: shot, other, other_category: ColliderCategory::Player });
        app.update();
        assert!(is_active(app.world().get::<Body2d>(shot).unwrap()));

        app.world_mut().send_event(CollisionStarted { entity: shot, other, other_category: ColliderCategory::Ground });
        app.update();
        assert!(!is_active(app.world().get::<Body2d>(shot).unwrap()));
    }
}
