//! Level layouts: the static colliders a player runs through.
//!
//! Layouts are RON files under `data/levels/`. Each collider carries a tag
//! (`Ground`, `Enemy`, `Victory`, ...) which becomes its `ColliderCategory`.

use crate::physics::{Collider, ColliderCategory};
use crate::ron_loader::load_ron_file;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LEVELS_DIR: &str = "data/levels";

/// A tagged axis-aligned box in world units (centre + size).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBox {
    pub tag: ColliderCategory,
    pub center: (f32, f32),
    pub size: (f32, f32),
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    #[serde(default)]
    pub name: String,
    pub player_spawn: (f32, f32),
    #[serde(default)]
    pub boxes: Vec<LevelBox>,
}

impl LevelLayout {
    /// Built-in layout used when no level file can be read.
    #[must_use]
    pub fn fallback() -> Self {
        let b = |tag, center, size| LevelBox { tag, center, size };
        Self {
            name: "fallback".to_string(),
            player_spawn: (-8.0, 1.0),
            boxes: vec![
                b(ColliderCategory::Ground, (0.0, -0.5), (24.0, 1.0)),
                b(ColliderCategory::Ground, (4.0, 2.5), (4.0, 0.5)),
                b(ColliderCategory::Enemy, (0.0, 0.5), (0.8, 1.0)),
                b(ColliderCategory::Victory, (10.0, 1.0), (1.0, 2.0)),
            ],
        }
    }

    #[must_use]
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.player_spawn.0, self.player_spawn.1)
    }

    #[must_use]
    pub fn count(&self, tag: ColliderCategory) -> usize {
        self.boxes.iter().filter(|b| b.tag == tag).count()
    }
}

/// Load `file` from `dir`, falling back to the built-in layout.
#[must_use]
pub fn load_level(dir: &str, file: &str) -> LevelLayout {
    let path = Path::new(dir).join(file);
    load_ron_file::<LevelLayout>(&path).unwrap_or_else(|| {
        warn!("level {} unavailable, using built-in layout", path.display());
        LevelLayout::fallback()
    })
}

fn box_color(tag: ColliderCategory) -> Color {
    match tag {
        ColliderCategory::Ground => Color::srgb(0.35, 0.25, 0.15),
        ColliderCategory::Enemy => Color::srgb(0.85, 0.15, 0.15),
        ColliderCategory::Victory => Color::srgb(0.2, 0.85, 0.3),
        _ => Color::srgb(0.6, 0.6, 0.6),
    }
}

/// Spawn a static collider entity for every box in `layout`.
pub fn spawn_level(commands: &mut Commands, layout: &LevelLayout) {
    for b in &layout.boxes {
        let size = Vec2::new(b.size.0, b.size.1);
        commands.spawn((
            SpriteBundle {
                sprite: Sprite { color: box_color(b.tag), custom_size: Some(size), ..default() },
                transform: Transform::from_xyz(b.center.0, b.center.1, 0.0),
                ..default()
            },
            Collider::new(size, b.tag),
            Name::new(format!("{:?}", b.tag)),
        ));
    }
    info!("spawned level '{}' with {} colliders", layout.name, layout.boxes.len());
}
