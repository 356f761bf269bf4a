//! Dash afterimage trail.
//!
//! A dash arms the player's emitter, which then drops a fixed number of
//! fading sprite copies at a fixed interval. Each copy releases itself when
//! its fade completes.

use bevy::prelude::*;

use crate::combat::ActionStateMachine;

pub const GHOST_COUNT: u8 = 5;
pub const GHOST_INTERVAL: f32 = 0.05;
pub const GHOST_LIFETIME: f32 = 0.5;
/// Opacity of a fresh ghost
const GHOST_START_ALPHA: f32 = 0.6;

#[derive(Component, Debug, Default, Clone)]
pub struct AfterimageEmitter {
    remaining: u8,
    timer: f32,
    was_dashing: bool,
}

impl AfterimageEmitter {
    /// Advance by `dt` and return how many ghosts to spawn this frame.
    /// A new trail starts on the frame `dashing` goes from false to true.
    pub fn tick(&mut self, dt: f32, dashing: bool) -> u8 {
        let armed = dashing && !self.was_dashing;
        self.was_dashing = dashing;

        if armed {
            // First ghost drops on the arming frame itself
            self.remaining = GHOST_COUNT;
            self.timer = 0.0;
        } else if self.remaining == 0 {
            return 0;
        } else {
            self.timer -= dt.max(0.0);
        }

        let mut spawned = 0;
        while self.timer <= 0.0 && self.remaining > 0 {
            spawned += 1;
            self.remaining -= 1;
            self.timer += GHOST_INTERVAL;
        }
        spawned
    }

    #[cfg(test)]
    pub fn is_emitting(&self) -> bool {
        self.remaining > 0
    }
}

/// One fading copy of the player sprite.
#[derive(Component, Debug, Clone)]
pub struct Afterimage {
    age: f32,
    lifetime: f32,
}

impl Default for Afterimage {
    fn default() -> Self {
        Self::new(GHOST_LIFETIME)
    }
}

impl Afterimage {
    pub fn new(lifetime: f32) -> Self {
        Self {
            age: 0.0,
            lifetime: lifetime.max(f32::EPSILON),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.age += dt.max(0.0);
    }

    /// Fade factor, 1 when spawned and 0 once released.
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }

    pub fn is_released(&self) -> bool {
        self.age >= self.lifetime
    }
}

pub(crate) fn emit_afterimages(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(
        &ActionStateMachine,
        &mut AfterimageEmitter,
        &Transform,
        &Sprite,
    )>,
) {
    let dt = time.delta_secs();

    for (actions, mut emitter, transform, sprite) in &mut query {
        let count = emitter.tick(dt, actions.flags.is_dashing);
        for _ in 0..count {
            let mut ghost_transform = *transform;
            ghost_transform.translation.z -= 0.1;
            commands.spawn((
                Afterimage::default(),
                Sprite {
                    color: sprite.color.with_alpha(GHOST_START_ALPHA),
                    custom_size: sprite.custom_size,
                    flip_x: sprite.flip_x,
                    ..default()
                },
                ghost_transform,
            ));
        }
    }
}

pub(crate) fn fade_afterimages(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Afterimage, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut ghost, mut sprite) in &mut query {
        ghost.tick(dt);
        if ghost.is_released() {
            commands.entity(entity).despawn();
        } else {
            sprite.color = sprite.color.with_alpha(GHOST_START_ALPHA * ghost.alpha());
        }
    }
}
