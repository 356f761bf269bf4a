//! Combat domain: enemy behavior systems.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::actions::ActionStateMachine;
use crate::combat::ai::{EnemyBehavior, EnemyMode, EnemySenses};
use crate::combat::components::Enemy;
use crate::combat::events::{EnemyAction, EnemyActionRequest};
use crate::combat::resources::EnemyTuning;
use crate::core::AiRng;
use crate::movement::{Facing, ForwardProbe, GroundSensor, Player};
use crate::sprites::{AnimationSink, Animator, params};

/// Position of the first live player. A dead player is no longer a target.
pub(crate) fn live_target<'a>(
    players: impl IntoIterator<Item = (&'a Transform, &'a ActionStateMachine)>,
) -> Option<Vec2> {
    players
        .into_iter()
        .find(|(_, actions)| actions.is_alive())
        .map(|(transform, _)| transform.translation.truncate())
}

pub(crate) fn update_enemy_behavior(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    mut rng: ResMut<AiRng>,
    spatial: SpatialQuery,
    mut requests: MessageWriter<EnemyActionRequest>,
    player_query: Query<(&Transform, &ActionStateMachine), With<Player>>,
    mut enemy_query: Query<
        (
            Entity,
            &Transform,
            &mut EnemyBehavior,
            &mut LinearVelocity,
            &mut Animator,
            &mut Facing,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let dt = time.delta_secs();

    // Snapshot before any enemy acts
    let player_pos = live_target(player_query.iter());

    for (entity, transform, mut behavior, mut velocity, mut animator, mut facing) in
        &mut enemy_query
    {
        if !behavior.is_alive() {
            continue;
        }

        let position = transform.translation.truncate();
        let obstacle_ahead = behavior.mode() == EnemyMode::Patrol
            && spatial.cast_forward(position, behavior.facing, tuning.raycast_distance);

        let senses = EnemySenses {
            position,
            target: player_pos,
            obstacle_ahead,
        };

        let previous = behavior.mode();
        velocity.x = behavior.update(dt, &senses, &tuning, &mut rng.0, &mut *animator);

        if behavior.wants_attack(&senses, &tuning) {
            requests.write(EnemyActionRequest {
                enemy: entity,
                action: EnemyAction::Attack,
            });
        }

        let mode = behavior.mode();
        if mode != previous {
            debug!("Enemy {:?}: {:?} -> {:?}", entity, previous, mode);
        }
        if *facing != behavior.facing {
            *facing = behavior.facing;
        }
    }
}

/// Report each enemy's grounded state to its animator once per physics step.
pub(crate) fn report_enemy_grounded(
    mut query: Query<(&GroundSensor, &mut Animator), With<Enemy>>,
) {
    for (sensor, mut animator) in &mut query {
        animator.set_bool(params::IS_GROUNDED, sensor.is_grounded());
    }
}
