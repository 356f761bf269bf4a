//! Combat domain: player actions, enemy behavior, and strike resolution.

pub mod actions;
pub mod ai;
mod components;
mod events;
mod resources;
mod spawn;
mod strikes;
mod systems;


use bevy::prelude::*;

use crate::core::{FrameSystems, PhysicsStepSystems};
use events::{Defeated, EnemyActionRequest, PlayerStrike};

pub use actions::{ActionPhase, ActionStateMachine};
pub use ai::{EnemyBehavior, EnemyMode};
pub use components::{Enemy, Health};
pub use resources::{EnemyTuning, PatrolBoundsDef, PlayerTuning};
pub use spawn::spawn_enemy;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTuning>()
            .init_resource::<EnemyTuning>()
            .add_message::<PlayerStrike>()
            .add_message::<EnemyActionRequest>()
            .add_message::<Defeated>()
            .add_systems(Startup, spawn::spawn_level_enemies)
            .add_systems(Update, systems::remove_corpses)
            .add_systems(
                RunFixedMainLoop,
                (
                    systems::update_player_actions,
                    ai::update_enemy_behavior,
                    systems::resolve_player_strikes,
                    systems::dispatch_enemy_actions,
                    systems::mark_corpses,
                )
                    .chain()
                    .in_set(FrameSystems::Decide),
            )
            .add_systems(
                FixedUpdate,
                (systems::apply_player_velocity, ai::report_enemy_grounded)
                    .in_set(PhysicsStepSystems::Actuate),
            );
    }
}
