//! Animator parameters and the sprite effects driven by them.
//!
//! Gameplay code only writes parameters (`set_bool`, `set_trigger`); the
//! `drive_sprite_animation` system turns them into visible changes on the
//! sprite: a grey tint when "Alive" is false and a short stretch on "Jump".

use bevy::prelude::*;
use bevy::utils::{HashMap, HashSet};

pub const ALIVE: &str = "Alive";
pub const JUMP: &str = "Jump";

/// How long a jump stretch lasts, in seconds.
const STRETCH_TIME: f32 = 0.15;
const STRETCH_AMOUNT: f32 = 0.25;

/// Named bool parameters plus one-shot triggers.
#[derive(Component, Debug, Default, Clone)]
pub struct Animator {
    bools: HashMap<&'static str, bool>,
    triggers: HashSet<&'static str>,
}

impl Animator {
    pub fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.insert(name, value);
    }

    /// Unset parameters read as `false`.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn set_trigger(&mut self, name: &'static str) {
        self.triggers.insert(name);
    }

    #[must_use]
    pub fn is_triggered(&self, name: &str) -> bool {
        self.triggers.contains(name)
    }

    /// Clear a trigger, returning whether it was set.
    pub fn consume_trigger(&mut self, name: &str) -> bool {
        self.triggers.remove(name)
    }
}

/// Sprite presentation state owned by the animation system.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpriteAnimation {
    pub base_size: Vec2,
    pub base_color: Color,
    pub dead_color: Color,
    stretch_left: f32,
}

impl SpriteAnimation {
    #[must_use]
    pub fn new(base_size: Vec2, base_color: Color) -> Self {
        Self { base_size, base_color, dead_color: Color::srgb(0.35, 0.35, 0.35), stretch_left: 0.0 }
    }

    /// Size for the current point of the stretch animation.
    #[must_use]
    pub fn current_size(&self) -> Vec2 {
        let k = 1.0 + STRETCH_AMOUNT * (self.stretch_left / STRETCH_TIME);
        Vec2::new(self.base_size.x / k, self.base_size.y * k)
    }
}

/// Consume animator triggers and update sprite tint and size.
#[allow(clippy::needless_pass_by_value)]
pub fn drive_sprite_animation(
    time: Res<Time>,
    mut q: Query<(&mut Animator, &mut SpriteAnimation, &mut Sprite)>,
) {
    let dt = time.delta_seconds();
    for (mut animator, mut anim, mut sprite) in &mut q {
        if animator.consume_trigger(JUMP) {
            anim.stretch_left = STRETCH_TIME;
        } else {
            anim.stretch_left = (anim.stretch_left - dt).max(0.0);
        }

        sprite.color = if animator.get_bool(ALIVE) { anim.base_color } else { anim.dead_color };
        sprite.custom_size = Some(anim.current_size());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_fire_once() {
        let mut a = Animator::default();
        assert!(!a.consume_trigger(JUMP));
        a.set_trigger(JUMP);
        assert!(a.is_triggered(JUMP));
        assert!(a.consume_trigger(JUMP));
        assert!(!a.is_triggered(JUMP));
    }

    #[test]
    fn bools_default_to_false() {
        let mut a = Animator::default();
        assert!(!a.get_bool(ALIVE));
        a.set_bool(ALIVE, true);
        assert!(a.get_bool(ALIVE));
    }

    #[test]
    fn jump_stretches_and_dead_turns_grey() {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.add_systems(Update, drive_sprite_animation);

        let mut animator = Animator::default();
        animator.set_bool(ALIVE, true);
        animator.set_trigger(JUMP);
        let anim = SpriteAnimation::new(Vec2::new(1.0, 2.0), Color::WHITE);
        let e = app.world_mut().spawn((animator, anim, Sprite::default())).id();

        app.update();
        let sprite = app.world().get::<Sprite>(e).unwrap();
        assert_eq!(sprite.color, Color::WHITE);
        let size = sprite.custom_size.unwrap();
        assert!(size.y > 2.0 && size.x < 1.0);
        assert!(!app.world().get::<Animator>(e).unwrap().is_triggered(JUMP));

        app.world_mut().get_mut::<Animator>(e).unwrap().set_bool(ALIVE, false);
        app.update();
        let dead = app.world().get::<SpriteAnimation>(e).unwrap().dead_color;
        assert_eq!(app.world().get::<Sprite>(e).unwrap().color, dead);
    }
}
