//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod motion;

pub(crate) use input::read_input;
pub(crate) use motion::{
    apply_gameplay_lock_requests, apply_knockback_requests, log_motion_messages, sync_facing,
    tick_motion,
};
