//! Minimal 2D physics: bodies, axis-aligned colliders, ground sensors and
//! collision-enter events.
//!
//! Only what the platformer needs: gravity with a per-body scale, resolution
//! against static `Ground` colliders, and overlap reporting. Bodies are
//! integrated by `integrate_bodies`; contacts are reported by `detect_collisions`.
pub mod contacts;
pub mod integrate;
pub mod sensor;

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use contacts::*;
pub use integrate::*;
pub use sensor::*;

/// Dynamic body state written by gameplay code and read by the integrator.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body2d {
    /// Linear velocity in world units per second.
    pub velocity: Vec2,
    /// Multiplier on world gravity. Zero makes the body float.
    pub gravity_scale: f32,
    /// Inactive bodies are neither moved nor reported in contacts.
    pub simulated: bool,
}

impl Default for Body2d {
    fn default() -> Self {
        Self { velocity: Vec2::ZERO, gravity_scale: 1.0, simulated: true }
    }
}

/// What a collider means to whoever touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColliderCategory {
    #[default]
    Untagged,
    Ground,
    Enemy,
    Victory,
    Player,
    Projectile,
}

impl FromStr for ColliderCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Untagged" | "" => Ok(Self::Untagged),
            "Ground" => Ok(Self::Ground),
            "Enemy" => Ok(Self::Enemy),
            "Victory" => Ok(Self::Victory),
            "Player" => Ok(Self::Player),
            "Projectile" => Ok(Self::Projectile),
            other => Err(format!("unknown collider tag '{other}'")),
        }
    }
}

/// Axis-aligned box collider centred on the entity's translation.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub half_extents: Vec2,
    pub category: ColliderCategory,
}

impl Collider {
    #[must_use]
    pub fn new(size: Vec2, category: ColliderCategory) -> Self {
        Self { half_extents: size * 0.5, category }
    }

    #[must_use]
    pub fn aabb_at(&self, center: Vec2) -> Aabb2d {
        Aabb2d::new(center, self.half_extents)
    }
}

/// Strict overlap: boxes that only share an edge do not penetrate.
#[must_use]
pub fn penetrates(a: &Aabb2d, b: &Aabb2d) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::bounding::IntersectsVolume;

    #[test]
    fn tags_parse_into_categories() {
        assert_eq!("Enemy".parse::<ColliderCategory>(), Ok(ColliderCategory::Enemy));
        assert_eq!("Victory".parse::<ColliderCategory>(), Ok(ColliderCategory::Victory));
        assert_eq!("".parse::<ColliderCategory>(), Ok(ColliderCategory::Untagged));
        assert!("enemy".parse::<ColliderCategory>().is_err());
    }

    #[test]
    fn touching_boxes_intersect_but_do_not_penetrate() {
        let ground = Aabb2d::new(Vec2::ZERO, Vec2::new(5.0, 0.5));
        let standing = Aabb2d::new(Vec2::new(0.0, 1.0), Vec2::new(0.5, 0.5));
        assert!(standing.intersects(&ground));
        assert!(!penetrates(&standing, &ground));

        let sunk = Aabb2d::new(Vec2::new(0.0, 0.9), Vec2::new(0.5, 0.5));
        assert!(penetrates(&sunk, &ground));
    }
}
