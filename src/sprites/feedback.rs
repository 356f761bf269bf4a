//! Visual feedback driven by facing changes and animation triggers.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::Facing;
use crate::sprites::animation::{AnimationTriggered, params};

const FLASH_DURATION: f32 = 0.15;
const HIT_TINT: Color = Color::srgb(1.0, 0.45, 0.45);
const SHIELD_TINT: Color = Color::srgb(0.5, 0.7, 1.0);
const DEAD_TINT: Color = Color::srgb(0.35, 0.35, 0.35);

/// Temporary tint; `base` is restored when it runs out.
#[derive(Component, Debug, Clone)]
pub struct FlashTint {
    pub remaining: f32,
    pub base: Color,
}

/// Flip sprites to match the agent's facing.
pub(crate) fn sync_sprite_facing(mut query: Query<(&Facing, &mut Sprite), Changed<Facing>>) {
    for (facing, mut sprite) in &mut query {
        sprite.flip_x = *facing == Facing::Left;
    }
}

pub(crate) fn tint_on_triggers(
    mut commands: Commands,
    mut triggered: MessageReader<AnimationTriggered>,
    mut query: Query<(&mut Sprite, Option<&FlashTint>)>,
) {
    for event in triggered.read() {
        let Ok((mut sprite, flash)) = query.get_mut(event.entity) else {
            continue;
        };

        let tint = match event.trigger {
            params::TAKE_HIT => HIT_TINT,
            params::SHIELD => SHIELD_TINT,
            params::DEATH => {
                sprite.color = DEAD_TINT;
                commands.entity(event.entity).remove::<FlashTint>();
                continue;
            }
            _ => continue,
        };

        // Keep the original colour when a flash is already running
        let base = flash.map_or(sprite.color, |flash| flash.base);
        sprite.color = tint;
        commands.entity(event.entity).insert(FlashTint {
            remaining: FLASH_DURATION,
            base,
        });
    }
}

pub(crate) fn update_flash_tints(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut FlashTint, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut flash, mut sprite) in &mut query {
        flash.remaining -= dt;
        if flash.remaining <= 0.0 {
            sprite.color = flash.base;
            commands.entity(entity).remove::<FlashTint>();
        }
    }
}
