//! Combat domain: messages between controllers and combat resolution.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::actions::ComboIndex;
use crate::movement::Facing;

/// A player combo strike landed its active frame
#[derive(Debug, Clone, Copy)]
pub struct PlayerStrike {
    pub player: Entity,
    pub origin: Vec2,
    pub facing: Facing,
    pub combo: ComboIndex,
}

impl Message for PlayerStrike {}

/// Actions other systems may trigger on an enemy controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    HitReaction,
    Shield,
    Attack,
    Die,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyActionRequest {
    pub enemy: Entity,
    pub action: EnemyAction,
}

impl Message for EnemyActionRequest {}

/// Enemy died
#[derive(Debug)]
pub struct Defeated {
    pub entity: Entity,
}

impl Message for Defeated {}
