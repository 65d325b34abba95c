//! Config domain: tests for tuning parsing and validation.

use std::path::Path;

use super::{
    MOTION_CONFIG_SCHEMA_VERSION, MotionConfig, MovementConfiguration, PhysicsConfiguration,
    load_motion_config, parse_motion_config_json, parse_motion_config_ron, resolve_motion_config,
    tuning_warnings, validate_config,
};

// -----------------------------------------------------------------------------
// Defaults
// -----------------------------------------------------------------------------

#[test]
fn test_default_config_is_valid() {
    let errors = validate_config(&MotionConfig::default());
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn test_default_config_has_no_warnings() {
    assert!(tuning_warnings(&MotionConfig::default()).is_empty());
}

#[test]
fn test_single_jump_height() {
    let movement = MovementConfiguration {
        jump_power: 600.0,
        max_air_jumps: 1,
        ..Default::default()
    };
    assert!((movement.single_jump_height(-1800.0) - 100.0).abs() < 1e-3);
    assert!((movement.max_reachable_height(-1800.0) - 200.0).abs() < 1e-3);
    assert!(movement.single_jump_height(0.0).is_infinite());
}

// -----------------------------------------------------------------------------
// Parsing
// -----------------------------------------------------------------------------

#[test]
fn test_parse_partial_ron_fills_defaults() {
    let text = r#"(
        schema_version: 1,
        movement: (run_speed: 250.0, max_air_jumps: 2),
    )"#;
    let config = parse_motion_config_ron("inline", text).unwrap();

    assert_eq!(config.movement.run_speed, 250.0);
    assert_eq!(config.movement.max_air_jumps, 2);
    assert_eq!(
        config.movement.jump_power,
        MovementConfiguration::default().jump_power
    );
    assert_eq!(config.physics, PhysicsConfiguration::default());
}

#[test]
fn test_parse_invalid_ron_reports_source() {
    let err = parse_motion_config_ron("broken.ron", "(schema_version: ").unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.message.starts_with("Parse error"));
    assert!(err.to_string().contains("broken.ron"));
}

#[test]
fn test_parse_json_config() {
    let text = r#"{
        "schema_version": 1,
        "physics": { "fall_gravity": -3000.0 },
        "movement": { "use_gradual_stop": false }
    }"#;
    let config = parse_motion_config_json("inline.json", text).unwrap();
    assert_eq!(config.physics.fall_gravity, -3000.0);
    assert!(!config.movement.use_gradual_stop);
}

#[test]
fn test_load_shipped_tuning_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/config/motion.ron");
    let config = load_motion_config(&path).unwrap();

    assert_eq!(config.schema_version, MOTION_CONFIG_SCHEMA_VERSION);
    assert_eq!(config.movement.max_air_jumps, 1);
    assert!(validate_config(&config).is_empty());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = load_motion_config(Path::new("does/not/exist.ron")).unwrap_err();
    assert!(err.message.starts_with("IO error"));
}

#[test]
fn test_resolve_falls_back_to_defaults() {
    let config = resolve_motion_config(Path::new("does/not/exist.ron"));
    assert_eq!(config, MotionConfig::default());
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

#[test]
fn test_validation_rejects_upward_gravity() {
    let mut config = MotionConfig::default();
    config.physics.fall_gravity = 100.0;

    let errors = validate_config(&config);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].section, "physics");
    assert_eq!(errors[0].field, "fall_gravity");
}

#[test]
fn test_validation_rejects_factors_out_of_range() {
    let mut config = MotionConfig::default();
    config.physics.air_resistance = 1.5;
    config.physics.wall_jump_momentum_keep = -0.1;
    config.movement.air_move_multiplier = 2.0;

    let fields: Vec<_> = validate_config(&config).iter().map(|e| e.field).collect();
    assert!(fields.contains(&"air_resistance"));
    assert!(fields.contains(&"wall_jump_momentum_keep"));
    assert!(fields.contains(&"air_move_multiplier"));
}

#[test]
fn test_validation_rejects_negative_run_speed() {
    let mut config = MotionConfig::default();
    config.movement.run_speed = -5.0;

    let errors = validate_config(&config);
    assert!(errors.iter().any(|e| e.field == "run_speed"));
    assert!(errors[0].to_string().starts_with("movement.run_speed"));
}

#[test]
fn test_validation_rejects_terminal_velocity_above_cap() {
    let mut config = MotionConfig::default();
    config.physics.terminal_velocity = config.physics.max_vertical_speed + 1.0;

    let errors = validate_config(&config);
    assert!(errors.iter().any(|e| e.field == "terminal_velocity"));
}

#[test]
fn test_validation_rejects_wrong_schema() {
    let config = MotionConfig {
        schema_version: 99,
        ..Default::default()
    };
    let errors = validate_config(&config);
    assert!(errors.iter().any(|e| e.field == "schema_version"));
}

#[test]
fn test_warns_when_dash_exceeds_horizontal_cap() {
    let mut config = MotionConfig::default();
    config.movement.dash_speed = config.physics.max_horizontal_speed * 2.0;

    let warnings = tuning_warnings(&config);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("dash_speed"));
}
