//! Movement domain: the Bevy and avian2d bridge for the motion engine.
//!
//! Keyboard input is sampled every frame into the player's [`MotionInput`]
//! component; each character's
//! [`CharacterMotionController`](crate::motion::CharacterMotionController)
//! ticks in `FixedUpdate`, before avian2d integrates positions.

mod bootstrap;
mod components;
#[cfg(feature = "dev-tools")]
mod dev;
mod events;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{GameLayer, Ground, Player, Wall};
pub use events::{GameplayLockRequest, KnockbackRequest, MotionMessage};

use bevy::prelude::*;

use bootstrap::spawn_player;
use systems::{
    apply_gameplay_lock_requests, apply_knockback_requests, log_motion_messages, read_input,
    sync_facing, tick_motion,
};

/// Ordering of the fixed-tick motion work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MotionSet {
    /// Knockback and gameplay-lock requests from other domains
    Requests,
    /// Controller ticks and velocity write-back
    Tick,
    /// Consumers of the fresh snapshots
    Publish,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<MotionMessage>()
            .add_message::<KnockbackRequest>()
            .add_message::<GameplayLockRequest>()
            .configure_sets(
                FixedUpdate,
                (MotionSet::Requests, MotionSet::Tick, MotionSet::Publish).chain(),
            )
            .add_systems(Startup, spawn_player)
            .add_systems(Update, read_input)
            .add_systems(
                FixedUpdate,
                (apply_knockback_requests, apply_gameplay_lock_requests)
                    .chain()
                    .in_set(MotionSet::Requests),
            )
            .add_systems(FixedUpdate, tick_motion.in_set(MotionSet::Tick))
            .add_systems(Update, (sync_facing, log_motion_messages));

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_room)
            .add_systems(Update, dev::dev_hit_on_key);
    }
}
