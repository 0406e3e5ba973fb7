//! Per-frame player decision logic, independent of the ECS.
//!
//! `PlayerController::tick` reads an input snapshot and what the body and
//! sensors report, and returns the writes the host should perform this frame.
//! `PlayerController::on_collision` applies collision effects to health and
//! reports what the host has to do about it. Neither touches the world.

use crate::physics::ColliderCategory;
use crate::player::InputSnapshot;
use crate::settings::PlayerSettings;
use bevy::prelude::*;

/// Tunables read every frame. Hot-reloadable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    pub jump_height: f32,
    pub walk_speed: f32,
    pub fall_speed: f32,
    /// Degrees, counter-clockwise from +X.
    pub shooting_angle: f32,
    pub shooting_speed: f32,
    pub death_gravity_scale: f32,
}

impl From<&PlayerSettings> for PlayerTuning {
    fn from(s: &PlayerSettings) -> Self {
        Self {
            jump_height: s.jump_height,
            walk_speed: s.walk_speed,
            fall_speed: s.fall_speed,
            shooting_angle: s.shooting_angle,
            shooting_speed: s.shooting_speed,
            death_gravity_scale: s.death_gravity_scale,
        }
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self::from(&PlayerSettings::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Alive,
    Dead,
}

/// The single action chosen for a frame. Priority: jump, right, left, shoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Jump,
    MoveRight,
    MoveLeft,
    Shoot,
    Idle,
}

impl PlayerAction {
    /// Pick the action for this frame. A jump press while airborne does not
    /// count, so the remaining keys are still considered.
    #[must_use]
    pub fn select(input: &InputSnapshot, grounded: bool) -> Self {
        if input.jump_pressed && grounded {
            Self::Jump
        } else if input.right_held {
            Self::MoveRight
        } else if input.left_held {
            Self::MoveLeft
        } else if input.shoot_held {
            Self::Shoot
        } else {
            Self::Idle
        }
    }
}

/// What the host reports about the world at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameContext {
    pub grounded: bool,
    pub projectile_active: bool,
    pub velocity: Vec2,
    /// World position of the hand anchor the shot leaves from.
    pub hand_position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTrigger {
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileLaunch {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Writes requested for one frame. `None` means "leave it alone".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameIntents {
    /// Arm rotation about Z, degrees.
    pub arm_angle: Option<f32>,
    pub gravity_scale: Option<f32>,
    pub velocity: Option<Vec2>,
    pub animation: Option<AnimationTrigger>,
    pub launch: Option<ProjectileLaunch>,
}

impl FrameIntents {
    /// No writes at all.
    #[must_use]
    pub fn inert() -> Self {
        Self::default()
    }
}

/// Body and animator writes for the moment of death.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathEffects {
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub alive_flag: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    Ignored,
    Victory,
    Damaged { remaining: u32 },
    Died(DeathEffects),
}

/// Shot velocity: `speed` along +X rotated by `angle_deg`.
#[must_use]
pub fn shot_velocity(angle_deg: f32, speed: f32) -> Vec2 {
    Vec2::X.rotate(Vec2::from_angle(angle_deg.to_radians())) * speed
}

/// Player health and tunables. Alive while health is above zero; health only
/// ever goes down, so death is final.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerController {
    health: u32,
    pub tuning: PlayerTuning,
}

impl PlayerController {
    #[must_use]
    pub fn new(health: u32, tuning: PlayerTuning) -> Self {
        Self { health, tuning }
    }

    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[must_use]
    pub fn life_state(&self) -> LifeState {
        if self.is_alive() { LifeState::Alive } else { LifeState::Dead }
    }

    /// Decide this frame's writes. Dead controllers return `FrameIntents::inert`.
    #[must_use]
    pub fn tick(&self, input: &InputSnapshot, ctx: &FrameContext) -> FrameIntents {
        if !self.is_alive() {
            return FrameIntents::inert();
        }

        let t = &self.tuning;
        let mut out = FrameIntents {
            arm_angle: Some(t.shooting_angle),
            gravity_scale: Some(t.fall_speed),
            ..FrameIntents::default()
        };

        match PlayerAction::select(input, ctx.grounded) {
            PlayerAction::Jump => {
                out.velocity = Some(Vec2::new(ctx.velocity.x, t.jump_height));
                out.animation = Some(AnimationTrigger::Jump);
            }
            PlayerAction::MoveRight => out.velocity = Some(Vec2::new(t.walk_speed, ctx.velocity.y)),
            PlayerAction::MoveLeft => out.velocity = Some(Vec2::new(-t.walk_speed, ctx.velocity.y)),
            PlayerAction::Shoot if !ctx.projectile_active => {
                out.launch = Some(ProjectileLaunch {
                    position: ctx.hand_position,
                    velocity: shot_velocity(t.shooting_angle, t.shooting_speed),
                });
            }
            PlayerAction::Shoot | PlayerAction::Idle => {}
        }
        out
    }

    /// Apply a collision with a collider of `category`.
    pub fn on_collision(&mut self, category: ColliderCategory) -> CollisionOutcome {
        if !self.is_alive() {
            return CollisionOutcome::Ignored;
        }
        match category {
            ColliderCategory::Victory => CollisionOutcome::Victory,
            ColliderCategory::Enemy => {
                self.health -= 1;
                if self.health > 0 {
                    CollisionOutcome::Damaged { remaining: self.health }
                } else {
                    CollisionOutcome::Died(DeathEffects {
                        velocity: Vec2::ZERO,
                        gravity_scale: self.tuning.death_gravity_scale,
                        alive_flag: false,
                    })
                }
            }
            _ => CollisionOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(jump: bool, right: bool, left: bool, shoot: bool) -> InputSnapshot {
        InputSnapshot { jump_pressed: jump, right_held: right, left_held: left, shoot_held: shoot }
    }

    fn ctx(grounded: bool) -> FrameContext {
        FrameContext {
            grounded,
            projectile_active: false,
            velocity: Vec2::new(1.5, -3.0),
            hand_position: Vec2::new(0.7, 1.2),
        }
    }

    fn controller(health: u32) -> PlayerController {
        PlayerController::new(health, PlayerTuning::default())
    }

    #[test]
    fn every_alive_frame_sets_arm_and_gravity() {
        let p = controller(1);
        let out = p.tick(&InputSnapshot::default(), &ctx(false));
        assert_eq!(out.arm_angle, Some(45.0));
        assert_eq!(out.gravity_scale, Some(2.0));
        assert_eq!(out.velocity, None);
        assert_eq!(out.launch, None);
        assert_eq!(out.animation, None);
    }

    #[test]
    fn grounded_jump_sets_vertical_velocity_and_triggers_animation() {
        let p = controller(1);
        for prior in [-20.0, 0.0, 4.0] {
            let mut c = ctx(true);
            c.velocity.y = prior;
            let out = p.tick(&keys(true, false, false, false), &c);
            assert_eq!(out.velocity, Some(Vec2::new(1.5, 15.0)));
            assert_eq!(out.animation, Some(AnimationTrigger::Jump));
        }
    }

    #[test]
    fn jump_wins_over_other_keys_when_grounded() {
        let p = controller(1);
        let out = p.tick(&keys(true, true, true, true), &ctx(true));
        assert_eq!(out.velocity, Some(Vec2::new(1.5, 15.0)));
        assert_eq!(out.launch, None);
    }

    #[test]
    fn airborne_jump_does_nothing_by_itself() {
        let p = controller(1);
        let out = p.tick(&keys(true, false, false, false), &ctx(false));
        assert_eq!(out.velocity, None);
        assert_eq!(out.animation, None);
    }

    #[test]
    fn airborne_jump_falls_through_to_movement() {
        let p = controller(1);
        let out = p.tick(&keys(true, true, false, false), &ctx(false));
        assert_eq!(out.velocity, Some(Vec2::new(7.0, -3.0)));
        assert_eq!(out.animation, None);
    }

    #[test]
    fn right_beats_left_and_shoot() {
        let p = controller(1);
        let out = p.tick(&keys(false, true, true, true), &ctx(true));
        assert_eq!(out.velocity, Some(Vec2::new(7.0, -3.0)));
        assert_eq!(out.launch, None);
    }

    #[test]
    fn left_keeps_vertical_velocity() {
        let p = controller(1);
        let out = p.tick(&keys(false, false, true, false), &ctx(false));
        assert_eq!(out.velocity, Some(Vec2::new(-7.0, -3.0)));
    }

    #[test]
    fn shoot_launches_from_hand_when_projectile_idle() {
        let p = controller(1);
        let out = p.tick(&keys(false, false, false, true), &ctx(true));
        let launch = out.launch.unwrap();
        assert_eq!(launch.position, Vec2::new(0.7, 1.2));
        assert!((launch.velocity.x - 10.6066).abs() < 1e-3);
        assert!((launch.velocity.y - 10.6066).abs() < 1e-3);
        assert_eq!(out.velocity, None);
    }

    #[test]
    fn shoot_with_active_projectile_does_nothing() {
        let p = controller(1);
        let mut c = ctx(true);
        c.projectile_active = true;
        let out = p.tick(&keys(false, false, false, true), &c);
        assert_eq!(out.launch, None);
        assert_eq!(out.velocity, None);
    }

    #[test]
    fn shot_velocity_rotates_from_x_axis() {
        let v = shot_velocity(45.0, 15.0);
        assert!((v - Vec2::new(10.6066, 10.6066)).length() < 1e-3);
        let up = shot_velocity(90.0, 2.0);
        assert!((up - Vec2::new(0.0, 2.0)).length() < 1e-5);
        let back = shot_velocity(180.0, 1.0);
        assert!((back - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn enemy_hit_above_one_health_only_decrements() {
        for start in 2..6 {
            let mut p = controller(start);
            assert_eq!(p.on_collision(ColliderCategory::Enemy), CollisionOutcome::Damaged { remaining: start - 1 });
            assert_eq!(p.health(), start - 1);
            assert_eq!(p.life_state(), LifeState::Alive);
        }
    }

    #[test]
    fn two_hits_from_two_health_kill() {
        let mut p = controller(2);
        assert_eq!(p.on_collision(ColliderCategory::Enemy), CollisionOutcome::Damaged { remaining: 1 });
        assert!(p.is_alive());
        let out = p.on_collision(ColliderCategory::Enemy);
        assert_eq!(
            out,
            CollisionOutcome::Died(DeathEffects { velocity: Vec2::ZERO, gravity_scale: 4.0, alive_flag: false })
        );
        assert_eq!(p.health(), 0);
        assert_eq!(p.life_state(), LifeState::Dead);
    }

    #[test]
    fn dead_controller_is_inert() {
        let mut p = controller(1);
        p.on_collision(ColliderCategory::Enemy);
        assert_eq!(p.tick(&keys(true, true, true, true), &ctx(true)), FrameIntents::inert());
        assert_eq!(p.on_collision(ColliderCategory::Enemy), CollisionOutcome::Ignored);
        assert_eq!(p.on_collision(ColliderCategory::Victory), CollisionOutcome::Ignored);
        assert_eq!(p.health(), 0);
    }

    #[test]
    fn victory_and_other_tags_do_not_change_health() {
        let mut p = controller(3);
        assert_eq!(p.on_collision(ColliderCategory::Victory), CollisionOutcome::Victory);
        assert_eq!(p.on_collision(ColliderCategory::Ground), CollisionOutcome::Ignored);
        assert_eq!(p.on_collision(ColliderCategory::Untagged), CollisionOutcome::Ignored);
        assert_eq!(p.health(), 3);
    }

    #[test]
    fn action_priority_table() {
        use PlayerAction::*;
        assert_eq!(PlayerAction::select(&keys(false, false, false, false), true), Idle);
        assert_eq!(PlayerAction::select(&keys(true, false, true, false), false), MoveLeft);
        assert_eq!(PlayerAction::select(&keys(true, false, false, true), false), Shoot);
        assert_eq!(PlayerAction::select(&keys(false, false, true, true), true), MoveLeft);
    }
}
