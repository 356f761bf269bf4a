//! Movement domain: sampled player input.

use bevy::prelude::*;

/// Raw input for one frame: the move axes plus the frame each action button
/// went down. `block_held` is the level of the block button.
#[derive(Resource, Debug, Default, Clone)]
pub struct PlayerInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub dash_just_pressed: bool,
    pub attack_just_pressed: bool,
    pub block_just_pressed: bool,
    pub block_held: bool,
}
