//! Movement domain: gravity and ladder climbing for the player body.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{ActionStateMachine, PlayerTuning};
use crate::movement::{LadderClimb, MovementIntent, Player, PlayerInput};

pub(crate) fn apply_player_gravity(
    time: Res<Time>,
    tuning: Res<PlayerTuning>,
    mut query: Query<(&ActionStateMachine, &LadderClimb, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (actions, climb, mut velocity) in &mut query {
        // No gravity during the dash burst or on a ladder
        if actions.is_dash_active() || climb.is_climbing() {
            continue;
        }

        velocity.y -= tuning.gravity * dt;
    }
}

/// While on a ladder the vertical axis drives vertical velocity directly.
pub(crate) fn apply_climb(
    input: Res<PlayerInput>,
    tuning: Res<PlayerTuning>,
    mut query: Query<(&ActionStateMachine, &LadderClimb, &mut LinearVelocity), With<Player>>,
) {
    let intent = MovementIntent::resolve(input.axis);

    for (actions, climb, mut velocity) in &mut query {
        if !climb.is_climbing() || !actions.is_alive() {
            continue;
        }

        velocity.y = intent.vertical * tuning.climb_speed;
    }
}
