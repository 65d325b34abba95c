//! Config domain: motion tuning resources, file loading and validation.

mod data;
mod loader;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{
    MOTION_CONFIG_SCHEMA_VERSION, MotionConfig, MovementConfiguration, PhysicsConfiguration,
};
pub use loader::{
    ConfigLoadError, load_motion_config, parse_motion_config_json, parse_motion_config_ron,
};
pub use validation::{
    ValidationError, tuning_warnings, validate_config, validate_movement, validate_physics,
};

use bevy::prelude::*;
use std::path::PathBuf;

/// Where the tuning file is read from at startup.
#[derive(Resource, Debug, Clone)]
pub struct MotionConfigPath(pub PathBuf);

impl Default for MotionConfigPath {
    fn default() -> Self {
        Self(PathBuf::from("assets/config/motion.ron"))
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionConfigPath>()
            .init_resource::<PhysicsConfiguration>()
            .init_resource::<MovementConfiguration>()
            .register_type::<PhysicsConfiguration>()
            .register_type::<MovementConfiguration>()
            .add_systems(PreStartup, load_motion_tuning);
    }
}

/// Resolve the tuning to use: the file when it loads and validates,
/// otherwise the built-in defaults.
pub fn resolve_motion_config(path: &std::path::Path) -> MotionConfig {
    let config = match load_motion_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; using default motion tuning", e);
            return MotionConfig::default();
        }
    };

    let errors = validate_config(&config);
    if !errors.is_empty() {
        for error in &errors {
            error!("Invalid motion tuning: {}", error);
        }
        warn!(
            "{} invalid value(s) in {}; using default motion tuning",
            errors.len(),
            path.display()
        );
        return MotionConfig::default();
    }

    for warning in tuning_warnings(&config) {
        warn!("Motion tuning: {}", warning);
    }

    config
}

fn load_motion_tuning(
    path: Res<MotionConfigPath>,
    mut physics: ResMut<PhysicsConfiguration>,
    mut movement: ResMut<MovementConfiguration>,
) {
    let config = resolve_motion_config(&path.0);
    info!(
        "Motion tuning loaded from {}: run_speed={}, jump_power={}, air_jumps={}",
        path.0.display(),
        config.movement.run_speed,
        config.movement.jump_power,
        config.movement.max_air_jumps
    );
    *physics = config.physics;
    *movement = config.movement;
}
