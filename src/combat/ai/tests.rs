//! Combat domain: unit tests for enemy patrol, detection and chase.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::enemy::live_target;
use super::{EnemyBehavior, EnemyMode, EnemyPhase, EnemySenses, PatrolBounds};
use crate::combat::actions::{ActionStateMachine, GuardRejection};
use crate::combat::resources::{EnemyTuning, PatrolBoundsDef};
use crate::movement::Facing;
use crate::sprites::{Animator, params};

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

/// Default tuning with the periodic re-target pushed out of the way.
fn quiet_tuning() -> EnemyTuning {
    EnemyTuning {
        change_direction_time: 100.0,
        ..default()
    }
}

fn enemy_at(x: f32, tuning: &EnemyTuning, rng: &mut ChaCha8Rng) -> EnemyBehavior {
    EnemyBehavior::new(
        Vec2::new(x, 0.0),
        PatrolBounds::fixed(-5.0, 5.0),
        tuning,
        rng,
    )
}

fn senses(x: f32, target: Option<Vec2>) -> EnemySenses {
    EnemySenses {
        position: Vec2::new(x, 0.0),
        target,
        obstacle_ahead: false,
    }
}

// --- Patrol bounds ---

#[test]
fn test_bounds_are_ordered() {
    let bounds = PatrolBounds::fixed(5.0, -5.0);
    assert_eq!(bounds.min_x, -5.0);
    assert_eq!(bounds.max_x, 5.0);

    let around = PatrolBounds::around(10.0, -2.0);
    assert_eq!(around, PatrolBounds::fixed(8.0, 12.0));
}

#[test]
fn test_bounds_from_definition() {
    let fixed = PatrolBounds::from_def(
        PatrolBoundsDef::Fixed {
            min_x: -1.0,
            max_x: 1.0,
        },
        40.0,
    );
    assert_eq!(fixed, PatrolBounds::fixed(-1.0, 1.0));

    let around = PatrolBounds::from_def(PatrolBoundsDef::AroundSpawn { half_width: 3.0 }, 4.0);
    assert_eq!(around, PatrolBounds::fixed(1.0, 7.0));
}

#[test]
fn test_rolls_stay_within_bounds() {
    let mut rng = rng();
    let bounds = PatrolBounds::fixed(-5.0, 5.0);

    for _ in 0..200 {
        assert!(bounds.contains(bounds.roll(&mut rng)));
    }

    let point = PatrolBounds::fixed(2.0, 2.0);
    assert_eq!(point.roll(&mut rng), 2.0);
}

#[test]
fn test_initial_target_uses_spawn_height() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let enemy = EnemyBehavior::new(
        Vec2::new(0.0, 3.5),
        PatrolBounds::fixed(-5.0, 5.0),
        &tuning,
        &mut rng,
    );

    assert_eq!(enemy.mode(), EnemyMode::Patrol);
    assert_eq!(enemy.target_position.y, 3.5);
    assert!(enemy.bounds.contains(enemy.target_position.x));
}

// --- Detection ---

#[test]
fn test_far_target_never_triggers_chase() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();

    for facing in [Facing::Left, Facing::Right] {
        for target_x in [-8.0, -5.0, 5.0, 8.0] {
            let mut enemy = enemy_at(0.0, &tuning, &mut rng);
            enemy.facing = facing;
            for _ in 0..20 {
                enemy.update(0.1, &senses(0.0, Some(Vec2::new(target_x, 0.0))), &tuning, &mut rng, &mut anim);
                assert_ne!(enemy.mode(), EnemyMode::Chasing);
            }
        }
    }
}

#[test]
fn test_detection_requires_facing_target() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let player = Some(Vec2::new(-2.0, 0.0));

    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.facing = Facing::Right;
    enemy.update(0.1, &senses(0.0, player), &tuning, &mut rng, &mut anim);
    assert!(!enemy.is_chasing);

    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.facing = Facing::Left;
    enemy.update(0.1, &senses(0.0, player), &tuning, &mut rng, &mut anim);
    assert!(enemy.is_chasing);
}

#[test]
fn test_chase_pursues_target_position() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.facing = Facing::Right;

    let velocity = enemy.update(0.1, &senses(0.0, Some(Vec2::new(3.0, 0.0))), &tuning, &mut rng, &mut anim);
    assert_eq!(velocity, tuning.move_speed);
    assert!(anim.bool(params::IS_WALKING));

    // Target hops behind; pursuit turns around at once
    let velocity = enemy.update(0.1, &senses(0.0, Some(Vec2::new(-3.0, 0.0))), &tuning, &mut rng, &mut anim);
    assert!(enemy.is_chasing);
    assert_eq!(velocity, -tuning.move_speed);
    assert_eq!(enemy.facing, Facing::Left);
}

#[test]
fn test_chase_exit_rolls_fresh_target() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.facing = Facing::Right;

    enemy.update(0.1, &senses(0.0, Some(Vec2::new(2.0, 0.0))), &tuning, &mut rng, &mut anim);
    assert!(enemy.is_chasing);
    let stale = enemy.target_position;

    enemy.update(0.1, &senses(0.0, Some(Vec2::new(5.0, 0.0))), &tuning, &mut rng, &mut anim);

    assert!(!enemy.is_chasing);
    assert_ne!(enemy.target_position, stale);
    assert!(enemy.bounds.contains(enemy.target_position.x));
    assert_eq!(enemy.target_position.y, 0.0);
}

#[test]
fn test_losing_the_target_entity_ends_chase() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.facing = Facing::Right;

    enemy.update(0.1, &senses(0.0, Some(Vec2::new(2.0, 0.0))), &tuning, &mut rng, &mut anim);
    enemy.update(0.1, &senses(0.0, None), &tuning, &mut rng, &mut anim);

    assert!(!enemy.is_chasing);
}

#[test]
fn test_chase_in_range_wants_one_attack() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.facing = Facing::Right;
    let close = senses(0.0, Some(Vec2::new(0.5, 0.0)));

    enemy.update(0.1, &close, &tuning, &mut rng, &mut anim);
    assert!(enemy.is_chasing);
    assert!(enemy.wants_attack(&close, &tuning));

    assert_eq!(enemy.perform_attack(&tuning, &mut rng, &mut anim), Ok(()));
    assert!(anim.bool(params::IS_ATTACKING));

    enemy.update(0.1, &close, &tuning, &mut rng, &mut anim);
    assert!(!enemy.wants_attack(&close, &tuning));
    assert_eq!(anim.pending_triggers().len(), 1);
}

#[test]
fn test_no_attack_wish_out_of_range_or_patrolling() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);

    // Close but behind: not chasing, so no attack
    enemy.facing = Facing::Right;
    let behind = senses(0.0, Some(Vec2::new(-0.5, 0.0)));
    assert!(!enemy.wants_attack(&behind, &tuning));

    enemy.facing = Facing::Right;
    let far = senses(0.0, Some(Vec2::new(3.0, 0.0)));
    enemy.update(0.1, &far, &tuning, &mut rng, &mut anim);
    assert!(enemy.is_chasing);
    assert!(!enemy.wants_attack(&far, &tuning));
}

#[test]
fn test_dead_player_is_not_a_target() {
    let alive = ActionStateMachine::default();
    let mut dead = ActionStateMachine::default();
    dead.kill(&mut Vec2::ZERO, &mut Animator::default());

    let dead_at = Transform::from_xyz(1.0, 0.0, 0.0);
    let alive_at = Transform::from_xyz(4.0, 2.0, 0.0);

    assert_eq!(live_target([(&dead_at, &dead)]), None);
    assert_eq!(
        live_target([(&dead_at, &dead), (&alive_at, &alive)]),
        Some(Vec2::new(4.0, 2.0))
    );
}

#[test]
fn test_chase_ends_when_player_dies() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.facing = Facing::Right;

    let mut player = ActionStateMachine::default();
    let player_at = Transform::from_xyz(0.5, 0.0, 0.0);
    let target = live_target([(&player_at, &player)]);
    enemy.update(0.1, &senses(0.0, target), &tuning, &mut rng, &mut anim);
    assert!(enemy.is_chasing);

    player.kill(&mut Vec2::ZERO, &mut Animator::default());
    let target = live_target([(&player_at, &player)]);
    let corpse = senses(0.0, target);
    enemy.update(0.1, &corpse, &tuning, &mut rng, &mut anim);

    assert!(!enemy.is_chasing);
    assert!(!enemy.wants_attack(&corpse, &tuning));
}

// --- Patrol ---

#[test]
fn test_arrival_waits_then_rolls_new_target() {
    let mut rng = rng();
    let tuning = EnemyTuning::default();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);

    // 2 * 2.5 >= 5, so any target in [-5, 5] is reached this frame
    enemy.update(2.5, &senses(0.0, None), &tuning, &mut rng, &mut anim);
    assert_eq!(enemy.mode(), EnemyMode::PatrolWaiting);
    assert!(!anim.bool(params::IS_WALKING));
    let arrived_at = enemy.target_position.x;

    let velocity = enemy.update(0.5, &senses(arrived_at, None), &tuning, &mut rng, &mut anim);
    assert_eq!(velocity, 0.0);
    assert_eq!(enemy.mode(), EnemyMode::PatrolWaiting);

    // Pause over: either walking again or already paused at a new target
    enemy.update(0.5, &senses(arrived_at, None), &tuning, &mut rng, &mut anim);
    assert!(
        enemy.mode() == EnemyMode::Patrol
            || enemy.phase_remaining(EnemyPhase::IdlePause) == Some(tuning.idle_time)
    );
    assert!(enemy.bounds.contains(enemy.target_position.x));
}

#[test]
fn test_patrol_steps_without_overshooting() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.target_position = Vec2::new(4.0, 0.0);

    let velocity = enemy.update(0.25, &senses(0.0, None), &tuning, &mut rng, &mut anim);
    assert_eq!(velocity, tuning.move_speed);
    assert_eq!(enemy.facing, Facing::Right);
    assert!(anim.bool(params::IS_WALKING));

    // A quarter unit left at 0.25s: only enough speed to land on the target
    let velocity = enemy.update(0.25, &senses(3.75, None), &tuning, &mut rng, &mut anim);
    assert_eq!(velocity, 1.0);
    assert_eq!(enemy.mode(), EnemyMode::PatrolWaiting);
}

#[test]
fn test_obstacle_forces_early_wait() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.target_position = Vec2::new(4.0, 0.0);

    let blocked = EnemySenses {
        obstacle_ahead: true,
        ..senses(0.0, None)
    };
    let velocity = enemy.update(0.1, &blocked, &tuning, &mut rng, &mut anim);

    assert_eq!(velocity, 0.0);
    assert_eq!(enemy.mode(), EnemyMode::PatrolWaiting);
    assert_eq!(
        enemy.phase_remaining(EnemyPhase::IdlePause),
        Some(tuning.idle_time)
    );
}

#[test]
fn test_periodic_retarget_ignores_arrival() {
    let mut rng = rng();
    let tuning = EnemyTuning {
        change_direction_time: 1.0,
        ..default()
    };
    let mut anim = Animator::default();
    let mut enemy = enemy_at(20.0, &tuning, &mut rng);
    let first = enemy.target_position;

    // Far outside the bounds, so the leg cannot finish in one frame
    enemy.update(1.0, &senses(20.0, None), &tuning, &mut rng, &mut anim);

    assert_ne!(enemy.target_position, first);
    assert_eq!(enemy.mode(), EnemyMode::Patrol);
    assert_eq!(enemy.phase_remaining(EnemyPhase::Retarget), Some(1.0));
}

#[test]
fn test_spotting_target_cancels_idle_pause() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.facing = Facing::Right;

    let blocked = EnemySenses {
        obstacle_ahead: true,
        ..senses(0.0, None)
    };
    enemy.update(0.1, &blocked, &tuning, &mut rng, &mut anim);
    assert!(enemy.is_waiting);
    enemy.facing = Facing::Right;

    enemy.update(0.1, &senses(0.0, Some(Vec2::new(3.0, 0.0))), &tuning, &mut rng, &mut anim);

    assert_eq!(enemy.mode(), EnemyMode::Chasing);
    assert!(!enemy.is_waiting);
    assert_eq!(enemy.phase_remaining(EnemyPhase::IdlePause), None);
}

// --- Exposed actions ---

#[test]
fn test_attack_holds_flag_for_fixed_duration() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);

    assert_eq!(enemy.perform_attack(&tuning, &mut rng, &mut anim), Ok(()));
    let triggers = anim.drain_triggers();
    assert_eq!(triggers.len(), 1);
    assert!(triggers[0] == params::ENEMY_ATTACK_1 || triggers[0] == params::ENEMY_ATTACK_2);

    assert_eq!(
        enemy.perform_attack(&tuning, &mut rng, &mut anim),
        Err(GuardRejection::AlreadyAttacking)
    );

    enemy.update(0.5, &senses(0.0, None), &tuning, &mut rng, &mut anim);
    assert!(enemy.is_attacking);
    enemy.update(0.5, &senses(0.0, None), &tuning, &mut rng, &mut anim);
    assert!(!enemy.is_attacking);
    assert!(!anim.bool(params::IS_ATTACKING));
}

#[test]
fn test_attack_picks_both_variants() {
    let mut rng = rng();
    let tuning = EnemyTuning {
        attack_hold_time: 0.25,
        ..quiet_tuning()
    };
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);

    let mut seen = Vec::new();
    for _ in 0..32 {
        enemy.perform_attack(&tuning, &mut rng, &mut anim).ok();
        seen.extend(anim.drain_triggers());
        enemy.update(0.25, &senses(0.0, None), &tuning, &mut rng, &mut anim);
    }

    assert!(seen.contains(&params::ENEMY_ATTACK_1));
    assert!(seen.contains(&params::ENEMY_ATTACK_2));
}

#[test]
fn test_hit_and_shield_reactions() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);

    assert_eq!(enemy.apply_hit_reaction(&mut anim), Ok(()));
    assert_eq!(enemy.apply_shield(&mut anim), Ok(()));
    assert!(anim.is_pending(params::TAKE_HIT));
    assert!(anim.is_pending(params::SHIELD));
}

#[test]
fn test_dead_enemy_is_terminal() {
    let mut rng = rng();
    let tuning = quiet_tuning();
    let mut anim = Animator::default();
    let mut enemy = enemy_at(0.0, &tuning, &mut rng);
    enemy.facing = Facing::Right;
    enemy.update(0.1, &senses(0.0, Some(Vec2::new(2.0, 0.0))), &tuning, &mut rng, &mut anim);

    assert!(enemy.die(&mut anim));
    assert_eq!(anim.drain_triggers(), vec![params::DEATH]);
    assert!(!enemy.die(&mut anim));
    assert!(anim.pending_triggers().is_empty());

    assert_eq!(enemy.mode(), EnemyMode::Dead);
    assert!(!anim.bool(params::IS_WALKING));
    let target = enemy.target_position;
    for _ in 0..10 {
        let velocity = enemy.update(1.0, &senses(0.0, Some(Vec2::new(1.0, 0.0))), &tuning, &mut rng, &mut anim);
        assert_eq!(velocity, 0.0);
    }
    assert_eq!(enemy.target_position, target);
    assert_eq!(enemy.phase_remaining(EnemyPhase::Retarget), None);

    assert_eq!(enemy.apply_hit_reaction(&mut anim), Err(GuardRejection::Dead));
    assert_eq!(enemy.apply_shield(&mut anim), Err(GuardRejection::Dead));
    assert_eq!(
        enemy.perform_attack(&tuning, &mut rng, &mut anim),
        Err(GuardRejection::Dead)
    );
    assert!(anim.pending_triggers().is_empty());
}
