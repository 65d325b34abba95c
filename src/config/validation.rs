//! Validation for motion tuning values.

use super::data::{MOTION_CONFIG_SCHEMA_VERSION, MotionConfig, MovementConfiguration, PhysicsConfiguration};

/// A validation error with context about which value failed.
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

/// Push an error when `$cond` does not hold.
macro_rules! check {
    ($errors:expr, $cond:expr, $section:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                section: $section,
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

fn is_fraction(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Validate every section of a tuning file.
/// Returns a list of validation errors, empty if all values are usable.
pub fn validate_config(config: &MotionConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check!(
        errors,
        config.schema_version == MOTION_CONFIG_SCHEMA_VERSION,
        "motion",
        "schema_version",
        "expected {}, found {}",
        MOTION_CONFIG_SCHEMA_VERSION,
        config.schema_version
    );

    errors.extend(validate_physics(&config.physics));
    errors.extend(validate_movement(&config.movement));
    errors
}

pub fn validate_physics(physics: &PhysicsConfiguration) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let section = "physics";

    for (field, value) in [
        ("normal_gravity", physics.normal_gravity),
        ("jump_hold_gravity", physics.jump_hold_gravity),
        ("apex_gravity", physics.apex_gravity),
        ("jump_cut_gravity", physics.jump_cut_gravity),
        ("fall_gravity", physics.fall_gravity),
        ("wall_slide_gravity", physics.wall_slide_gravity),
        ("dash_gravity", physics.dash_gravity),
    ] {
        check!(errors, value <= 0.0, section, field, "gravity must point downward, found {}", value);
    }

    for (field, value) in [
        ("air_resistance", physics.air_resistance),
        ("ground_friction", physics.ground_friction),
        ("wall_jump_momentum_keep", physics.wall_jump_momentum_keep),
        ("air_control_strength", physics.air_control_strength),
    ] {
        check!(errors, is_fraction(value), section, field, "must be within [0, 1], found {}", value);
    }

    check!(
        errors,
        physics.rising_threshold >= 0.0,
        section,
        "rising_threshold",
        "must be >= 0, found {}",
        physics.rising_threshold
    );
    check!(
        errors,
        physics.falling_threshold <= 0.0,
        section,
        "falling_threshold",
        "must be <= 0, found {}",
        physics.falling_threshold
    );
    check!(
        errors,
        physics.max_horizontal_speed > 0.0,
        section,
        "max_horizontal_speed",
        "must be positive, found {}",
        physics.max_horizontal_speed
    );
    check!(
        errors,
        physics.max_vertical_speed > 0.0,
        section,
        "max_vertical_speed",
        "must be positive, found {}",
        physics.max_vertical_speed
    );
    check!(
        errors,
        physics.terminal_velocity > 0.0 && physics.terminal_velocity <= physics.max_vertical_speed,
        section,
        "terminal_velocity",
        "must be within (0, max_vertical_speed = {}], found {}",
        physics.max_vertical_speed,
        physics.terminal_velocity
    );
    check!(
        errors,
        physics.ground_probe_distance > 0.0 && physics.wall_probe_distance > 0.0,
        section,
        "probe_distance",
        "ground and wall probe distances must be positive"
    );

    errors
}

pub fn validate_movement(movement: &MovementConfiguration) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let section = "movement";

    for (field, value) in [
        ("run_speed", movement.run_speed),
        ("acceleration", movement.acceleration),
        ("deceleration", movement.deceleration),
        ("turn_around_rate", movement.turn_around_rate),
        ("jump_power", movement.jump_power),
        ("dash_speed", movement.dash_speed),
    ] {
        check!(errors, value > 0.0, section, field, "must be positive, found {}", value);
    }

    for (field, value) in [
        ("jump_buffer_duration", movement.jump_buffer_duration),
        ("coyote_time_duration", movement.coyote_time_duration),
        ("wall_jump_lock_duration", movement.wall_jump_lock_duration),
        ("dash_duration", movement.dash_duration),
        ("dash_cooldown", movement.dash_cooldown),
        ("knockback_duration", movement.knockback_duration),
        ("wall_jump_push", movement.wall_jump_push),
    ] {
        check!(errors, value >= 0.0, section, field, "must not be negative, found {}", value);
    }

    check!(
        errors,
        is_fraction(movement.air_move_multiplier),
        section,
        "air_move_multiplier",
        "must be within [0, 1], found {}",
        movement.air_move_multiplier
    );

    errors
}

/// Cross-section checks that are legal but likely mistakes.
pub fn tuning_warnings(config: &MotionConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.movement.dash_speed > config.physics.max_horizontal_speed {
        warnings.push(format!(
            "dash_speed {} exceeds max_horizontal_speed {}; dashes will be clamped",
            config.movement.dash_speed, config.physics.max_horizontal_speed
        ));
    }
    if config.movement.run_speed > config.physics.max_horizontal_speed {
        warnings.push(format!(
            "run_speed {} exceeds max_horizontal_speed {}",
            config.movement.run_speed, config.physics.max_horizontal_speed
        ));
    }
    if config.movement.jump_power > config.physics.max_vertical_speed {
        warnings.push(format!(
            "jump_power {} exceeds max_vertical_speed {}; jumps will be clamped",
            config.movement.jump_power, config.physics.max_vertical_speed
        ));
    }
    warnings
}
