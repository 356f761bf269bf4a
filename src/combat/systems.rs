//! Combat domain: player action systems and strike resolution.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::actions::{ActionRequests, ActionStateMachine, FrameInput};
use crate::combat::ai::EnemyBehavior;
use crate::combat::components::{Corpse, Enemy, Health};
use crate::combat::events::{Defeated, EnemyAction, EnemyActionRequest, PlayerStrike};
use crate::combat::resources::{EnemyTuning, PlayerTuning};
use crate::combat::strikes::resolve_strike;
use crate::core::AiRng;
use crate::movement::{Facing, GroundSensor, MovementIntent, Player, PlayerInput};
use crate::sprites::Animator;

/// Update phase for the player: timers, block level, requests.
pub(crate) fn update_player_actions(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<PlayerTuning>,
    mut strikes: MessageWriter<PlayerStrike>,
    mut query: Query<
        (
            Entity,
            &Transform,
            &mut ActionStateMachine,
            &mut GroundSensor,
            &mut LinearVelocity,
            &mut Animator,
            &mut Facing,
        ),
        With<Player>,
    >,
) {
    let frame = FrameInput {
        dt: time.delta_secs(),
        intent: MovementIntent::resolve(input.axis),
        requests: ActionRequests {
            jump: input.jump_just_pressed,
            dash: input.dash_just_pressed,
            attack: input.attack_just_pressed,
            block: input.block_just_pressed,
            block_held: input.block_held,
        },
    };

    for (entity, transform, mut actions, mut sensor, mut velocity, mut animator, mut facing) in
        &mut query
    {
        let outcome = actions.update(
            &frame,
            &tuning,
            &mut sensor,
            &mut *velocity,
            &mut *animator,
        );

        if *facing != actions.facing {
            *facing = actions.facing;
        }
        if outcome.jumped || outcome.dash_started {
            trace!(
                "Player {:?} burst: jump {}, dash {}",
                entity, outcome.jumped, outcome.dash_started
            );
        }

        if let Some(combo) = outcome.strike {
            strikes.write(PlayerStrike {
                player: entity,
                origin: transform.translation.truncate(),
                facing: actions.facing,
                combo,
            });
        }
    }
}

/// Physics phase for the player: write the horizontal velocity.
pub(crate) fn apply_player_velocity(
    tuning: Res<PlayerTuning>,
    mut query: Query<
        (
            &mut ActionStateMachine,
            &GroundSensor,
            &mut LinearVelocity,
            &mut Animator,
        ),
        With<Player>,
    >,
) {
    for (mut actions, sensor, mut velocity, mut animator) in &mut query {
        actions.physics_step(
            &tuning,
            sensor.is_grounded(),
            &mut *velocity,
            &mut *animator,
        );
    }
}

/// Turn landed strikes into hit reactions, shields and deaths.
pub(crate) fn resolve_player_strikes(
    mut strikes: MessageReader<PlayerStrike>,
    mut requests: MessageWriter<EnemyActionRequest>,
    player_tuning: Res<PlayerTuning>,
    enemy_tuning: Res<EnemyTuning>,
    mut rng: ResMut<AiRng>,
    mut enemy_query: Query<(Entity, &Transform, &EnemyBehavior, &mut Health), With<Enemy>>,
) {
    for strike in strikes.read() {
        for (enemy, transform, behavior, mut health) in &mut enemy_query {
            if !behavior.is_alive() {
                continue;
            }

            let result = resolve_strike(
                strike,
                transform.translation.truncate(),
                behavior.facing,
                &mut health,
                &player_tuning,
                &enemy_tuning,
                &mut rng.0,
            );
            let Some(action) = result.enemy_action() else {
                continue;
            };

            debug!(
                "Strike {} from {:?} on enemy {:?}: {:?} ({:.1} left)",
                strike.combo.get(),
                strike.player,
                enemy,
                result,
                health.current
            );
            requests.write(EnemyActionRequest { enemy, action });
        }
    }
}

/// Route exposed actions to the enemy controllers.
pub(crate) fn dispatch_enemy_actions(
    mut requests: MessageReader<EnemyActionRequest>,
    mut defeated: MessageWriter<Defeated>,
    tuning: Res<EnemyTuning>,
    mut rng: ResMut<AiRng>,
    mut query: Query<(&mut EnemyBehavior, &mut Animator, &mut LinearVelocity), With<Enemy>>,
) {
    for request in requests.read() {
        let Ok((mut behavior, mut animator, mut velocity)) = query.get_mut(request.enemy) else {
            continue;
        };

        let result = match request.action {
            EnemyAction::HitReaction => behavior.apply_hit_reaction(&mut *animator),
            EnemyAction::Shield => behavior.apply_shield(&mut *animator),
            EnemyAction::Attack => behavior.perform_attack(&tuning, &mut rng.0, &mut *animator),
            EnemyAction::Die => {
                if behavior.die(&mut *animator) {
                    velocity.x = 0.0;
                    defeated.write(Defeated {
                        entity: request.enemy,
                    });
                    info!("Enemy {:?} defeated", request.enemy);
                }
                Ok(())
            }
        };

        if let Err(reason) = result {
            debug!(
                "Enemy {:?} ignored {:?}: {}",
                request.enemy, request.action, reason
            );
        }
    }
}

/// Seconds a defeated enemy stays in the level before it is removed
const CORPSE_LINGER: f32 = 3.0;

pub(crate) fn mark_corpses(mut commands: Commands, mut defeated: MessageReader<Defeated>) {
    for event in defeated.read() {
        if let Ok(mut entity) = commands.get_entity(event.entity) {
            entity.insert(Corpse {
                remaining: CORPSE_LINGER,
            });
        }
    }
}

pub(crate) fn remove_corpses(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Corpse)>,
) {
    let dt = time.delta_secs();

    for (entity, mut corpse) in &mut query {
        corpse.remaining -= dt;
        if corpse.remaining <= 0.0 {
            debug!("Removing corpse {:?}", entity);
            commands.entity(entity).despawn();
        }
    }
}
