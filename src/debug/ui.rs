//! Debug domain: text overlay for player and enemy state.

use bevy::prelude::*;

use crate::combat::ai::EnemyPhase;
use crate::combat::{ActionPhase, ActionStateMachine, Enemy, EnemyBehavior, Health};
use crate::core::RunConfig;
use crate::debug::state::DebugState;
use crate::movement::{GroundSensor, Player};
use crate::sprites::{Animator, params};

/// Marker for debug info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

/// Update the debug info overlay with current player and enemy state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    run_config: Res<RunConfig>,
    player_query: Query<(&Transform, &ActionStateMachine, &GroundSensor, &Animator), With<Player>>,
    enemy_query: Query<(Entity, &EnemyBehavior, &Health), With<Enemy>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    let Ok(mut text) = overlay_query.single_mut() else {
        return;
    };
    let Some((transform, actions, sensor, animator)) = player_query.iter().next() else {
        **text = format!("No player\nSeed: {}", run_config.seed);
        return;
    };

    let flags = actions.flags;
    let dash_cooldown = actions
        .phase_remaining(ActionPhase::DashCooldown)
        .unwrap_or(0.0);
    let status = debug_state
        .status_message
        .as_ref()
        .map_or("", |(message, _)| message.as_str());

    let pos = transform.translation;
    let mut info = format!(
        "Pos: ({:.1}, {:.1})\nAlive: {}\nGrounded: {} ({} contacts, suppressed {:.2}s)\nIntent: {:.2} | anim state {}\nDashing: {} | cooldown {:.2}s\nAttacking: {} | combo {}\nMovement delayed: {}\nBlocking: {} | recovering: {}\n",
        pos.x,
        pos.y,
        actions.is_alive(),
        sensor.is_grounded(),
        sensor.contact_count(),
        sensor.disabled_for(),
        actions.intent().horizontal,
        animator.integer(params::ANIMATION_STATE),
        flags.is_dashing,
        dash_cooldown,
        flags.is_attacking,
        actions.combo.get(),
        flags.is_movement_delayed,
        flags.is_idle_blocking,
        flags.is_block_delayed,
    );

    for (entity, behavior, health) in &enemy_query {
        info.push_str(&enemy_summary(entity, behavior, health));
        info.push('\n');
    }

    info.push_str(&format!("Seed: {}\n{}", run_config.seed, status));
    **text = info;
}

/// One overlay line per enemy: mode, health and any pending idle pause.
pub(crate) fn enemy_summary(entity: Entity, behavior: &EnemyBehavior, health: &Health) -> String {
    let idle = behavior
        .phase_remaining(EnemyPhase::IdlePause)
        .map_or(String::new(), |remaining| format!(", idle {:.2}s", remaining));
    format!(
        "Enemy {:?}: {:?}, hp {:.0}/{:.0}{}",
        entity,
        behavior.mode(),
        health.current,
        health.max,
        idle
    )
}
