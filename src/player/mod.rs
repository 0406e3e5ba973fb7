//! Player components and systems (input, controller, spawning).
//!
//! The controller core lives in `controller` and has no ECS access; `systems`
//! feeds it from the world and applies what it returns.
//!
//! # Example:
//!
//! ```ignore
//! // spawn the player with its body, sensor, animator, arm and shot
//! let player = spawn_player(&mut commands, &settings, Vec2::new(0.0, 2.0));
//! // register systems (or add `GameplayPlugin`, which orders them)
//! app.add_systems(Update, (player_update, player_collisions).chain());
//! ```
pub mod controller;
pub mod input;
pub mod spawn;
pub mod systems;

use bevy::prelude::*;

pub use controller::*;
pub use input::*;
pub use spawn::*;
pub use systems::*;

/// Marker for the controlled player entity.
#[derive(Component, Debug, Default)]
pub struct Player;

/// Entities the player drives but does not own as components, resolved once
/// at spawn time.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRig {
    pub arm: Entity,
    /// Tip of the arm; the shot leaves from here.
    pub hand: Entity,
    pub projectile: Entity,
}

/// Whether the level has been won or lost. Observed by the HUD.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    #[default]
    Playing,
    Won,
    Lost,
}
