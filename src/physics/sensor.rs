//! Ground overlap sensor.
//!
//! A small box under the owner's feet; `overlapping` is true while it touches
//! any `Ground` collider (touching edges count).

use crate::physics::{Body2d, Collider, ColliderCategory};
use bevy::math::bounding::{Aabb2d, IntersectsVolume};
use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GroundSensor {
    /// Sensor centre relative to the owner's translation.
    pub offset: Vec2,
    pub half_extents: Vec2,
    /// Result of the most recent overlap check.
    pub overlapping: bool,
}

impl GroundSensor {
    /// Thin sensor spanning most of the width of a body of `body_size`,
    /// centred on its bottom edge.
    #[must_use]
    pub fn under(body_size: Vec2) -> Self {
        Self {
            offset: Vec2::new(0.0, -body_size.y * 0.5),
            half_extents: Vec2::new(body_size.x * 0.45, 0.05),
            overlapping: false,
        }
    }

    #[must_use]
    pub fn aabb_at(&self, owner: Vec2) -> Aabb2d {
        Aabb2d::new(owner + self.offset, self.half_extents)
    }

    /// Whether the sensor placed at `owner` touches any of `grounds`.
    #[must_use]
    pub fn check(&self, owner: Vec2, grounds: &[Aabb2d]) -> bool {
        let me = self.aabb_at(owner);
        grounds.iter().any(|g| me.intersects(g))
    }
}

/// Refresh every sensor against the static ground colliders.
pub fn update_ground_sensors(
    mut sensors: Query<(&Transform, &mut GroundSensor)>,
    statics: Query<(&Transform, &Collider), Without<Body2d>>,
) {
    let grounds: Vec<Aabb2d> = statics
        .iter()
        .filter(|(_, c)| c.category == ColliderCategory::Ground)
        .map(|(t, c)| c.aabb_at(t.translation.truncate()))
        .collect();

    for (tf, mut sensor) in &mut sensors {
        let hit = sensor.check(tf.translation.truncate(), &grounds);
        if sensor.overlapping != hit {
            sensor.overlapping = hit;
        }
    }
}
