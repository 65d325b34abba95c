//! Platformer motion: a per-tick 2D character controller.
//!
//! - [`motion`]: the movement and physics state engine (gravity states,
//!   velocity shaping, contact tracking, jump/dash/knockback actions)
//! - [`config`]: tuning resources loaded from `assets/config/motion.ron`
//! - [`movement`]: Bevy/avian2d bridge driving one controller per character
//! - [`gameplay`]: discrete gameplay states and animation lookup

pub mod config;
pub mod gameplay;
pub mod motion;
pub mod movement;

use bevy::prelude::*;

/// Config, movement and gameplay plugins in dependency order.
pub struct PlatformerMotionPlugins;

impl Plugin for PlatformerMotionPlugins {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            config::ConfigPlugin,
            movement::MovementPlugin,
            gameplay::GameplayPlugin,
        ));
    }
}
