//! Content domain: unit tests for tuning parsing and validation.

use std::path::Path;

use super::data::{TUNING_SCHEMA_VERSION, TuningFile};
use super::loader::{load_tuning, parse_tuning};
use super::validation::validate_tuning;
use crate::combat::{EnemyTuning, PatrolBoundsDef, PlayerTuning};

const SHIPPED_TUNING: &str = include_str!("../../assets/data/tuning.ron");

// --- Parsing ---

#[test]
fn test_shipped_tuning_parses() {
    let tuning = parse_tuning(SHIPPED_TUNING, "tuning.ron").expect("shipped tuning should load");

    assert_eq!(tuning.schema_version, TUNING_SCHEMA_VERSION);
    assert_eq!(tuning.player.move_speed, 5.0);
    assert_eq!(tuning.player.strike_damage, [8.0, 8.0, 14.0]);
    assert_eq!(
        tuning.enemy.bounds,
        PatrolBoundsDef::AroundSpawn { half_width: 5.0 }
    );
}

#[test]
fn test_defaults_pass_validation() {
    assert!(validate_tuning(&TuningFile::default()).is_empty());
}

#[test]
fn test_missing_sections_use_defaults() {
    let tuning = parse_tuning("(schema_version: 1)", "tuning.ron").expect("should load");

    assert_eq!(tuning.player, PlayerTuning::default());
    assert_eq!(tuning.enemy, EnemyTuning::default());
}

#[test]
fn test_partial_section_overrides_fields() {
    let text = r#"(
        schema_version: 1,
        player: (dash_cooldown: 1.5),
        enemy: (bounds: Fixed(min_x: -2.0, max_x: 8.0)),
    )"#;
    let tuning = parse_tuning(text, "tuning.ron").expect("should load");

    assert_eq!(tuning.player.dash_cooldown, 1.5);
    assert_eq!(tuning.player.move_speed, PlayerTuning::default().move_speed);
    assert_eq!(
        tuning.enemy.bounds,
        PatrolBoundsDef::Fixed {
            min_x: -2.0,
            max_x: 8.0
        }
    );
}

#[test]
fn test_syntax_error_is_reported() {
    let err = parse_tuning("(schema_version: ", "broken.ron").unwrap_err();

    assert_eq!(err.file, "broken.ron");
    assert!(err.message.starts_with("Parse error"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_tuning(Path::new("does/not/exist/tuning.ron")).unwrap_err();

    assert!(err.message.starts_with("IO error"));
    assert!(err.to_string().contains("tuning.ron"));
}

// --- Validation ---

#[test]
fn test_negative_duration_is_rejected() {
    let text = "(schema_version: 1, player: (dash_cooldown: -1.0))";
    let err = parse_tuning(text, "tuning.ron").unwrap_err();

    assert!(err.message.starts_with("Validation error"));
    assert!(err.message.contains("player.dash_cooldown"));
}

#[test]
fn test_wrong_schema_version_is_rejected() {
    let file = TuningFile {
        schema_version: TUNING_SCHEMA_VERSION + 1,
        ..TuningFile::default()
    };
    let errors = validate_tuning(&file);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "schema_version");
}

#[test]
fn test_reversed_fixed_bounds_are_rejected() {
    let mut file = TuningFile::default();
    file.enemy.bounds = PatrolBoundsDef::Fixed {
        min_x: 3.0,
        max_x: -3.0,
    };
    let errors = validate_tuning(&file);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].section, "enemy");
    assert_eq!(errors[0].field, "bounds");
}

#[test]
fn test_every_failure_is_collected() {
    let mut file = TuningFile::default();
    file.player.move_speed = 0.0;
    file.player.strike_damage = [8.0, -1.0, 14.0];
    file.enemy.shield_chance = 1.5;
    file.enemy.idle_time = f32::NAN;

    let fields: Vec<_> = validate_tuning(&file)
        .iter()
        .map(|e| format!("{}.{}", e.section, e.field))
        .collect();

    assert_eq!(
        fields,
        vec![
            "player.move_speed",
            "player.strike_damage",
            "enemy.idle_time",
            "enemy.shield_chance",
        ]
    );
}
