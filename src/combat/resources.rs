//! Combat domain: tuning resources for the player and enemies.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Player locomotion and action timings. Durations are seconds, speeds are
/// world units per second.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    /// Ground sensor suppression after take-off
    pub jump_sensor_suppression: f32,
    pub climb_speed: f32,
    pub dash_speed: f32,
    pub dash_speed_multiplier: f32,
    pub dash_duration: f32,
    /// Uncontrolled slide after the dash burst (about two physics steps)
    pub dash_recovery: f32,
    pub dash_cooldown: f32,
    pub initial_attack_delay: f32,
    pub movement_delay: f32,
    pub attack_delay: f32,
    pub block_recovery: f32,
    pub strike_damage: [f32; 3],
    pub strike_reach: f32,
    pub strike_height: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_force: 10.0,
            gravity: 25.0,
            jump_sensor_suppression: 0.1,
            climb_speed: 5.0,
            dash_speed: 15.0,
            dash_speed_multiplier: 1.5,
            dash_duration: 0.2,
            dash_recovery: 0.0333 * 2.0,
            dash_cooldown: 2.0,
            initial_attack_delay: 0.2,
            movement_delay: 0.5,
            attack_delay: 0.5,
            block_recovery: 0.5,
            strike_damage: [8.0, 8.0, 14.0],
            strike_reach: 1.2,
            strike_height: 1.0,
        }
    }
}

impl PlayerTuning {
    /// Speed held during the active part of a dash.
    pub fn dash_velocity(&self) -> f32 {
        self.dash_speed * self.dash_speed_multiplier
    }
}

/// How an enemy's patrol range is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum PatrolBoundsDef {
    /// Same range for every enemy
    Fixed { min_x: f32, max_x: f32 },
    /// Spawn x plus or minus a half width, computed once at spawn
    AroundSpawn { half_width: f32 },
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub move_speed: f32,
    pub detection_radius: f32,
    /// Interval of the unconditional patrol re-target
    pub change_direction_time: f32,
    pub idle_time: f32,
    pub raycast_distance: f32,
    pub arrival_epsilon: f32,
    pub bounds: PatrolBoundsDef,
    pub attack_range: f32,
    pub attack_hold_time: f32,
    pub max_health: f32,
    /// Chance that a hit taken while facing the attacker is shielded
    pub shield_chance: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            detection_radius: 5.0,
            change_direction_time: 2.0,
            idle_time: 1.0,
            raycast_distance: 1.0,
            arrival_epsilon: 0.1,
            bounds: PatrolBoundsDef::Fixed {
                min_x: -5.0,
                max_x: 5.0,
            },
            attack_range: 1.0,
            attack_hold_time: 1.0,
            max_health: 30.0,
            shield_chance: 0.25,
        }
    }
}
