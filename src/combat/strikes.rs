//! Combat domain: what a landed player strike does to one enemy.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::components::Health;
use crate::combat::events::{EnemyAction, PlayerStrike};
use crate::combat::resources::{EnemyTuning, PlayerTuning};
use crate::movement::Facing;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrikeResult {
    /// Target outside the reach box
    Miss,
    Shielded,
    Hit { dealt: f32 },
    Killed { dealt: f32 },
}

impl StrikeResult {
    /// Controller action the result maps to, if any.
    pub fn enemy_action(self) -> Option<EnemyAction> {
        match self {
            StrikeResult::Miss => None,
            StrikeResult::Shielded => Some(EnemyAction::Shield),
            StrikeResult::Hit { .. } => Some(EnemyAction::HitReaction),
            StrikeResult::Killed { .. } => Some(EnemyAction::Die),
        }
    }
}

/// Reach box in front of the striker: `strike_reach` ahead, `strike_height`
/// above or below.
pub fn in_reach(strike: &PlayerStrike, target: Vec2, tuning: &PlayerTuning) -> bool {
    let offset = target - strike.origin;
    let ahead = offset.x * strike.facing.sign();
    (0.0..=tuning.strike_reach).contains(&ahead) && offset.y.abs() <= tuning.strike_height
}

/// Apply one strike to one live enemy. Only an enemy facing the striker gets
/// a shield roll; damage comes from the combo step.
pub fn resolve_strike(
    strike: &PlayerStrike,
    target: Vec2,
    target_facing: Facing,
    health: &mut Health,
    player: &PlayerTuning,
    enemy: &EnemyTuning,
    rng: &mut impl Rng,
) -> StrikeResult {
    if !in_reach(strike, target, player) {
        return StrikeResult::Miss;
    }

    let facing_striker = target_facing.sign() == -strike.facing.sign();
    if facing_striker {
        let shield_chance = f64::from(enemy.shield_chance.clamp(0.0, 1.0));
        if rng.random_bool(shield_chance) {
            return StrikeResult::Shielded;
        }
    }

    let damage = player.strike_damage[strike.combo.get() as usize];
    let dealt = health.take_damage(damage);
    if health.is_dead() {
        StrikeResult::Killed { dealt }
    } else {
        StrikeResult::Hit { dealt }
    }
}
