//! Combat domain: enemy behavior controller and its systems.

pub mod behavior;
pub(crate) mod enemy;

#[cfg(test)]
mod tests;

pub use behavior::{EnemyBehavior, EnemyMode, EnemyPhase, EnemySenses, PatrolBounds};
pub(crate) use enemy::{report_enemy_grounded, update_enemy_behavior};
