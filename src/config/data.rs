//! Config domain: physics and movement tuning definitions.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Physics tuning shared by every character using the motion engine.
///
/// Gravity magnitudes are signed and point downward (<= 0). Factors are
/// fractions in [0, 1].
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct PhysicsConfiguration {
    /// Gravity while grounded or when no other state applies
    pub normal_gravity: f32,
    /// Weakest gravity, used while ascending with jump held
    pub jump_hold_gravity: f32,
    /// Floaty gravity near the top of the arc
    pub apex_gravity: f32,
    /// Strong gravity after jump is released mid-ascent
    pub jump_cut_gravity: f32,
    pub fall_gravity: f32,
    pub wall_slide_gravity: f32,
    pub dash_gravity: f32,
    /// Cap on downward speed (positive magnitude)
    pub terminal_velocity: f32,
    /// Vertical speed above which the body counts as rising
    pub rising_threshold: f32,
    /// Vertical speed below which the body counts as falling (<= 0)
    pub falling_threshold: f32,
    pub max_horizontal_speed: f32,
    pub max_vertical_speed: f32,
    pub air_resistance: f32,
    pub ground_friction: f32,
    /// Fraction of prior horizontal velocity kept through a wall jump
    pub wall_jump_momentum_keep: f32,
    /// Scales the rate of horizontal change while airborne (never the cap)
    pub air_control_strength: f32,
    pub ground_probe_distance: f32,
    pub wall_probe_distance: f32,
    /// Vertical offset of the wall probe origin from the body center
    pub wall_probe_offset: f32,
    pub body_half_width: f32,
    pub body_half_height: f32,
}

impl Default for PhysicsConfiguration {
    fn default() -> Self {
        Self {
            normal_gravity: -1800.0,
            jump_hold_gravity: -1200.0,
            apex_gravity: -900.0,
            jump_cut_gravity: -3600.0,
            fall_gravity: -2400.0,
            wall_slide_gravity: -450.0,
            dash_gravity: 0.0,
            terminal_velocity: 900.0,
            rising_threshold: 40.0,
            falling_threshold: -40.0,
            max_horizontal_speed: 1000.0,
            max_vertical_speed: 1200.0,
            air_resistance: 0.02,
            ground_friction: 0.15,
            wall_jump_momentum_keep: 0.25,
            air_control_strength: 0.65,
            ground_probe_distance: 4.0,
            wall_probe_distance: 4.0,
            wall_probe_offset: 0.0,
            body_half_width: 12.0,
            body_half_height: 24.0,
        }
    }
}

/// Per-character movement tuning.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct MovementConfiguration {
    pub run_speed: f32,
    /// Units per second squared while speeding up toward the target
    pub acceleration: f32,
    /// Units per second squared while slowing to a stop
    pub deceleration: f32,
    /// Units per second squared while reversing direction
    pub turn_around_rate: f32,
    /// Target-speed multiplier while airborne
    pub air_move_multiplier: f32,
    pub use_gradual_stop: bool,
    pub jump_power: f32,
    pub jump_buffer_duration: f32,
    pub coyote_time_duration: f32,
    /// Maximum air jumps (0 = no double jump, 1 = double jump, ...)
    pub max_air_jumps: u8,
    /// Horizontal push of a wall jump as a multiple of `jump_power`
    pub wall_jump_push: f32,
    /// Time after a wall jump during which the wall is ignored
    pub wall_jump_lock_duration: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub allow_air_dash: bool,
    pub knockback_duration: f32,
}

impl Default for MovementConfiguration {
    fn default() -> Self {
        Self {
            run_speed: 320.0,
            acceleration: 3000.0,
            deceleration: 2600.0,
            turn_around_rate: 4200.0,
            air_move_multiplier: 0.85,
            use_gradual_stop: true,
            jump_power: 680.0,
            jump_buffer_duration: 0.12,
            coyote_time_duration: 0.12,
            max_air_jumps: 0,
            wall_jump_push: 0.6,
            wall_jump_lock_duration: 0.15,
            dash_speed: 900.0,
            dash_duration: 0.16,
            dash_cooldown: 0.35,
            allow_air_dash: true,
            knockback_duration: 0.25,
        }
    }
}

impl PhysicsConfiguration {
    pub fn body_half_extents(&self) -> Vec2 {
        Vec2::new(self.body_half_width, self.body_half_height)
    }
}

impl MovementConfiguration {
    /// Peak height of a single grounded jump under constant `gravity`.
    /// Uses h = v^2 / (2g)
    pub fn single_jump_height(&self, gravity: f32) -> f32 {
        let g = gravity.abs();
        if g <= f32::EPSILON {
            return f32::INFINITY;
        }
        self.jump_power * self.jump_power / (2.0 * g)
    }

    /// Height reachable chaining every air jump at the apex of the previous one.
    pub fn max_reachable_height(&self, gravity: f32) -> f32 {
        self.single_jump_height(gravity) * (1.0 + self.max_air_jumps as f32)
    }
}

/// Top-level tuning file: `assets/config/motion.ron`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
pub struct MotionConfig {
    pub schema_version: u32,
    #[serde(default)]
    pub physics: PhysicsConfiguration,
    #[serde(default)]
    pub movement: MovementConfiguration,
}

/// Schema version understood by this build.
pub const MOTION_CONFIG_SCHEMA_VERSION: u32 = 1;

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            schema_version: MOTION_CONFIG_SCHEMA_VERSION,
            physics: PhysicsConfiguration::default(),
            movement: MovementConfiguration::default(),
        }
    }
}
