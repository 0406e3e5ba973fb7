//! Collision-enter reporting.
//!
//! Entities carrying `Contacts` get a `CollisionStarted` event on the first
//! frame they overlap another collider. Staying in contact does not repeat
//! the event; separating and touching again does.

use crate::physics::{Body2d, Collider, ColliderCategory};
use bevy::math::bounding::IntersectsVolume;
use bevy::prelude::*;
use bevy::utils::HashSet;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CollisionStarted {
    /// The reporting entity.
    pub entity: Entity,
    pub other: Entity,
    pub other_category: ColliderCategory,
}

/// Marks an entity as a contact reporter and remembers what it touched last frame.
#[derive(Component, Debug, Default)]
pub struct Contacts {
    touching: HashSet<Entity>,
}

impl Contacts {
    #[must_use]
    pub fn is_touching(&self, other: Entity) -> bool {
        self.touching.contains(&other)
    }
}

/// Emit `CollisionStarted` for every new overlap of a reporting body.
///
/// Bodies that are not simulated forget their contacts, so a recycled body
/// reports fresh collisions after reactivation.
pub fn detect_collisions(
    mut reporters: Query<(Entity, &Transform, &Collider, &Body2d, &mut Contacts)>,
    colliders: Query<(Entity, &Transform, &Collider, Option<&Body2d>)>,
    mut events: EventWriter<CollisionStarted>,
) {
    for (entity, tf, collider, body, mut contacts) in &mut reporters {
        if !body.simulated {
            contacts.touching.clear();
            continue;
        }
        let me = collider.aabb_at(tf.translation.truncate());

        let mut now = HashSet::new();
        for (other, otf, ocol, obody) in &colliders {
            if other == entity || obody.is_some_and(|b| !b.simulated) {
                continue;
            }
            if me.intersects(&ocol.aabb_at(otf.translation.truncate())) {
                now.insert(other);
                if !contacts.touching.contains(&other) {
                    events.send(CollisionStarted { entity, other, other_category: ocol.category });
                }
            }
        }
        contacts.touching = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (App, Entity, Entity) {
        let mut app = App::new();
        app.add_event::<CollisionStarted>();
        app.add_systems(Update, detect_collisions);
        let reporter = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 0.0, 0.0),
                Collider::new(Vec2::ONE, ColliderCategory::Player),
                Body2d::default(),
                Contacts::default(),
            ))
            .id();
        let enemy = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.8, 0.0, 0.0),
                Collider::new(Vec2::ONE, ColliderCategory::Enemy),
            ))
            .id();
        (app, reporter, enemy)
    }

    fn drain(app: &mut App) -> Vec<CollisionStarted> {
        app.world_mut().resource_mut::<Events<CollisionStarted>>().drain().collect()
    }

    #[test]
    fn overlap_is_reported_once_per_contact() {
        let (mut app, reporter, enemy) = setup();

        app.update();
        let first = drain(&mut app);
        assert_eq!(
            first,
            vec![CollisionStarted { entity: reporter, other: enemy, other_category: ColliderCategory::Enemy }]
        );

        app.update();
        assert!(drain(&mut app).is_empty());

        // separate, then touch again
        app.world_mut().get_mut::<Transform>(enemy).unwrap().translation.x = 5.0;
        app.update();
        assert!(drain(&mut app).is_empty());
        app.world_mut().get_mut::<Transform>(enemy).unwrap().translation.x = 0.5;
        app.update();
        assert_eq!(drain(&mut app).len(), 1);
    }

    #[test]
    fn inactive_reporter_is_silent_and_forgets() {
        let (mut app, reporter, enemy) = setup();
        app.update();
        drain(&mut app);

        app.world_mut().get_mut::<Body2d>(reporter).unwrap().simulated = false;
        app.update();
        assert!(drain(&mut app).is_empty());
        assert!(!app.world().get::<Contacts>(reporter).unwrap().is_touching(enemy));

        app.world_mut().get_mut::<Body2d>(reporter).unwrap().simulated = true;
        app.update();
        assert_eq!(drain(&mut app).len(), 1);
    }
}
