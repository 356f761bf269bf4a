//! Debug domain: hotkeys and gizmo overlay.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{
    ActionStateMachine, Enemy, EnemyBehavior, EnemyMode, EnemyTuning, spawn_enemy,
};
use crate::core::AiRng;
use crate::debug::state::DebugState;
use crate::movement::{GroundSensor, Player};
use crate::sprites::Animator;

/// Handle function-key shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    tuning: Res<EnemyTuning>,
    mut rng: ResMut<AiRng>,
    mut player_query: Query<
        (
            &Transform,
            &mut ActionStateMachine,
            &GroundSensor,
            &mut LinearVelocity,
            &mut Animator,
        ),
        With<Player>,
    >,
) {
    // F3: Toggle gizmo overlay
    if keyboard.just_pressed(KeyCode::F3) {
        debug_state.show_gizmos = !debug_state.show_gizmos;
        info!("[DEBUG] Gizmo overlay {}", on_off(debug_state.show_gizmos));
    }

    // F4: Dump player action flags
    if keyboard.just_pressed(KeyCode::F4) {
        for (transform, actions, sensor, _, _) in &player_query {
            info!(
                "[DEBUG] Player at {:?}: {:?}, combo {}, facing {:?}, grounded {}, contacts {}",
                transform.translation.truncate(),
                actions.flags,
                actions.combo.get(),
                actions.facing,
                sensor.is_grounded(),
                sensor.contact_count()
            );
        }
    }

    // F5: Kill the player
    if keyboard.just_pressed(KeyCode::F5) {
        for (_, mut actions, _, mut velocity, mut animator) in &mut player_query {
            if actions.kill(&mut *velocity, &mut *animator) {
                debug_state.set_message("Player killed", 2.0);
            }
        }
    }

    // F6: Spawn an enemy ahead of the player
    if keyboard.just_pressed(KeyCode::F6) {
        if let Some((transform, actions, _, _, _)) = player_query.iter().next() {
            let pos = transform.translation.truncate() + actions.facing.vector() * 4.0;
            let enemy = spawn_enemy(&mut commands, pos, &tuning, &mut rng.0);
            debug_state.set_message("Spawned enemy", 2.0);
            info!("[DEBUG] Spawned enemy {:?} at {:?}", enemy, pos);
        }
    }

    // F7: Toggle info overlay
    if keyboard.just_pressed(KeyCode::F7) {
        debug_state.show_info = !debug_state.show_info;
        info!("[DEBUG] Info overlay {}", on_off(debug_state.show_info));
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

/// Draw detection radii, patrol targets, facings and the player's grounded state.
pub(crate) fn draw_debug_gizmos(
    mut gizmos: Gizmos,
    enemy_query: Query<(&Transform, &EnemyBehavior), With<Enemy>>,
    player_query: Query<(&Transform, &ActionStateMachine, &GroundSensor), With<Player>>,
) {
    for (transform, behavior) in &enemy_query {
        let pos = transform.translation.truncate();
        let color = match behavior.mode() {
            EnemyMode::Patrol => Color::srgb(0.4, 0.8, 0.4),
            EnemyMode::PatrolWaiting => Color::srgb(0.8, 0.8, 0.3),
            EnemyMode::Chasing => Color::srgb(0.9, 0.3, 0.3),
            EnemyMode::Dead => Color::srgb(0.4, 0.4, 0.4),
        };

        gizmos.circle_2d(pos, behavior.detection_radius, color);
        gizmos.arrow_2d(pos, pos + behavior.facing.vector(), color);
        if behavior.mode() == EnemyMode::Patrol {
            gizmos.line_2d(pos, behavior.target_position, color.with_alpha(0.4));
            gizmos.cross_2d(behavior.target_position, 0.3, color);
        }
        gizmos.line_2d(
            Vec2::new(behavior.bounds.min_x, pos.y - 0.9),
            Vec2::new(behavior.bounds.max_x, pos.y - 0.9),
            color.with_alpha(0.25),
        );
    }

    for (transform, actions, sensor) in &player_query {
        let pos = transform.translation.truncate();
        let grounded = if sensor.is_grounded() {
            Color::srgb(0.3, 0.9, 0.9)
        } else {
            Color::srgb(0.9, 0.5, 0.2)
        };
        gizmos.circle_2d(pos - Vec2::new(0.0, 0.8), 0.15, grounded);
        gizmos.arrow_2d(pos, pos + actions.facing.vector(), Color::WHITE);
    }
}
