//! Sprites module: the animation parameter sink and visual side effects.
//!
//! This module handles:
//! - Recording animation parameters and publishing triggers
//! - Sprite facing and hit/shield/death tints
//! - The dash afterimage trail

pub mod animation;
mod feedback;
pub mod trail;


use bevy::prelude::*;

use animation::{AnimationTriggered, flush_animation_triggers};

pub use animation::{AnimationSink, Animator, params};
pub use trail::AfterimageEmitter;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimationTriggered>()
            .add_systems(
                Update,
                (
                    trail::emit_afterimages,
                    feedback::sync_sprite_facing,
                    feedback::update_flash_tints,
                ),
            )
            .add_systems(
                PostUpdate,
                (
                    flush_animation_triggers,
                    feedback::tint_on_triggers,
                    trail::fade_afterimages,
                )
                    .chain(),
            );
    }
}
