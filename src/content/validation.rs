//! Validation for loaded tuning values.

use super::data::{TUNING_SCHEMA_VERSION, TuningFile};
use crate::combat::PatrolBoundsDef;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.message)
    }
}

/// Helper macro for checking a value is finite and strictly positive
macro_rules! check_positive {
    ($errors:expr, $section:expr, $owner:expr, $($field:ident),+ $(,)?) => {
        $(
            if !($owner.$field.is_finite() && $owner.$field > 0.0) {
                $errors.push(ValidationError {
                    section: $section,
                    field: stringify!($field),
                    message: format!("must be positive, got {}", $owner.$field),
                });
            }
        )+
    };
}

/// Validate every tuning section.
/// Returns a list of validation errors, empty if the file is usable.
pub fn validate_tuning(file: &TuningFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if file.schema_version != TUNING_SCHEMA_VERSION {
        errors.push(ValidationError {
            section: "tuning",
            field: "schema_version",
            message: format!(
                "expected {}, got {}",
                TUNING_SCHEMA_VERSION, file.schema_version
            ),
        });
    }

    let player = &file.player;
    check_positive!(
        errors,
        "player",
        player,
        move_speed,
        jump_force,
        gravity,
        jump_sensor_suppression,
        climb_speed,
        dash_speed,
        dash_speed_multiplier,
        dash_duration,
        dash_recovery,
        dash_cooldown,
        initial_attack_delay,
        movement_delay,
        attack_delay,
        block_recovery,
        strike_reach,
        strike_height,
    );
    if player.strike_damage.iter().any(|damage| !(*damage >= 0.0)) {
        errors.push(ValidationError {
            section: "player",
            field: "strike_damage",
            message: format!("must not be negative, got {:?}", player.strike_damage),
        });
    }

    let enemy = &file.enemy;
    check_positive!(
        errors,
        "enemy",
        enemy,
        move_speed,
        detection_radius,
        change_direction_time,
        idle_time,
        raycast_distance,
        arrival_epsilon,
        attack_range,
        attack_hold_time,
        max_health,
    );
    if !(0.0..=1.0).contains(&enemy.shield_chance) {
        errors.push(ValidationError {
            section: "enemy",
            field: "shield_chance",
            message: format!("must be within [0, 1], got {}", enemy.shield_chance),
        });
    }
    match enemy.bounds {
        PatrolBoundsDef::Fixed { min_x, max_x } => {
            if !(min_x.is_finite() && max_x.is_finite() && min_x <= max_x) {
                errors.push(ValidationError {
                    section: "enemy",
                    field: "bounds",
                    message: format!("min_x {} must not exceed max_x {}", min_x, max_x),
                });
            }
        }
        PatrolBoundsDef::AroundSpawn { half_width } => {
            if !(half_width.is_finite() && half_width >= 0.0) {
                errors.push(ValidationError {
                    section: "enemy",
                    field: "bounds",
                    message: format!("half_width must not be negative, got {}", half_width),
                });
            }
        }
    }

    errors
}
