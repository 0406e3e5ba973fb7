//! Frame ordering for the gameplay systems.
//!
//! Within `Update`: sensors read the world, the controller decides, physics
//! moves bodies and reports contacts, reactions consume the contacts, and
//! presentation turns animator parameters into sprite changes.

use crate::animation::drive_sprite_animation;
use crate::physics::{detect_collisions, integrate_bodies, update_ground_sensors, CollisionStarted};
use crate::player::{player_collisions, player_update, sync_player_tuning, GameOutcome};
use crate::projectile::{age_projectiles, recycle_projectiles_on_hit};
use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    Sense,
    Control,
    Physics,
    React,
    Present,
}

/// Registers the gameplay systems. Expects `Settings`, `Time` and
/// `ButtonInput<KeyCode>` resources to exist.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameOutcome>()
            .add_event::<CollisionStarted>()
            .configure_sets(
                Update,
                (GameSet::Sense, GameSet::Control, GameSet::Physics, GameSet::React, GameSet::Present).chain(),
            )
            .add_systems(Update, (sync_player_tuning, update_ground_sensors).in_set(GameSet::Sense))
            .add_systems(Update, player_update.in_set(GameSet::Control))
            .add_systems(Update, (integrate_bodies, detect_collisions).chain().in_set(GameSet::Physics))
            .add_systems(
                Update,
                (player_collisions, recycle_projectiles_on_hit, age_projectiles).in_set(GameSet::React),
            )
            .add_systems(Update, drive_sprite_animation.in_set(GameSet::Present));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Animator, SpriteAnimation, ALIVE};
    use crate::level::{spawn_level, LevelBox, LevelLayout};
    use crate::physics::{Body2d, ColliderCategory};
    use crate::player::{spawn_player, Player, PlayerController, PlayerRig, PLAYER_SIZE};
    use crate::settings::Settings;
    use std::time::Duration;

    const FRAME: Duration = Duration::from_millis(16);

    fn app_with(layout: LevelLayout, health: u32) -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.init_resource::<ButtonInput<KeyCode>>();
        let mut settings = Settings::defaults();
        settings.player.health = health;
        app.insert_resource(settings);
        app.insert_resource(layout);
        app.add_plugins((TransformPlugin, HierarchyPlugin, GameplayPlugin));
        app.add_systems(Startup, |mut commands: Commands, settings: Res<Settings>, layout: Res<LevelLayout>| {
            spawn_level(&mut commands, &layout);
            spawn_player(&mut commands, &settings, layout.spawn_point());
        });
        app.update();

        let world = app.world_mut();
        let player = world.query_filtered::<Entity, With<Player>>().single(world);
        (app, player)
    }

    fn step(app: &mut App, frames: usize) {
        for _ in 0..frames {
            app.world_mut().resource_mut::<Time>().advance_by(FRAME);
            app.update();
            app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        }
    }

    fn flat(extra: Vec<LevelBox>) -> LevelLayout {
        let mut boxes = vec![LevelBox { tag: ColliderCategory::Ground, center: (0.0, -0.5), size: (40.0, 1.0) }];
        boxes.extend(extra);
        LevelLayout { name: "test".into(), player_spawn: (0.0, PLAYER_SIZE.y * 0.5), boxes }
    }

    #[test]
    fn player_stands_and_jumps_off_the_ground() {
        let (mut app, player) = app_with(flat(vec![]), 1);
        step(&mut app, 10);
        let y_rest = app.world().get::<Transform>(player).unwrap().translation.y;
        assert!((y_rest - PLAYER_SIZE.y * 0.5).abs() < 1e-3);

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Space);
        step(&mut app, 1);
        let body = *app.world().get::<Body2d>(player).unwrap();
        assert!(body.velocity.y > 14.0);
        // the jump stretch was consumed by the animation system
        let anim = app.world().get::<SpriteAnimation>(player).unwrap();
        assert!(anim.current_size().y > PLAYER_SIZE.y);

        step(&mut app, 10);
        assert!(app.world().get::<Transform>(player).unwrap().translation.y > y_rest + 1.0);
    }

    #[test]
    fn walking_into_an_enemy_kills_a_one_health_player() {
        let enemy = LevelBox { tag: ColliderCategory::Enemy, center: (2.0, 0.5), size: (0.8, 1.0) };
        let (mut app, player) = app_with(flat(vec![enemy]), 1);

        for _ in 0..60 {
            app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyD);
            step(&mut app, 1);
        }

        let c = app.world().get::<PlayerController>(player).unwrap();
        assert!(!c.is_alive());
        assert_eq!(app.world().get::<Body2d>(player).unwrap().gravity_scale, 4.0);
        assert!(!app.world().get::<Animator>(player).unwrap().get_bool(ALIVE));
        assert_eq!(*app.world().resource::<GameOutcome>(), GameOutcome::Lost);
        // the corpse stopped where it died instead of walking on
        assert!(app.world().get::<Transform>(player).unwrap().translation.x < 2.0);
    }

    #[test]
    fn reaching_the_goal_wins() {
        let goal = LevelBox { tag: ColliderCategory::Victory, center: (1.5, 1.0), size: (1.0, 2.0) };
        let (mut app, _) = app_with(flat(vec![goal]), 1);
        for _ in 0..30 {
            app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyD);
            step(&mut app, 1);
        }
        assert_eq!(*app.world().resource::<GameOutcome>(), GameOutcome::Won);
    }

    #[test]
    fn shot_flies_then_expires() {
        let (mut app, player) = app_with(flat(vec![]), 1);
        let shot = app.world().get::<PlayerRig>(player).unwrap().projectile;

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyF);
        step(&mut app, 1);
        assert!(app.world().get::<Body2d>(shot).unwrap().simulated);

        // release shoot; the shot flies up and right, never touching the floor
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::KeyF);
        step(&mut app, 60);
        let pos = app.world().get::<Transform>(shot).unwrap().translation;
        assert!(pos.x > 5.0 && pos.y > 5.0);

        // past its lifetime it is recycled
        step(&mut app, 200);
        assert!(!app.world().get::<Body2d>(shot).unwrap().simulated);
    }
}
