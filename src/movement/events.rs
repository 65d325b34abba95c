//! Movement domain: messages in and out of the motion engine.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::motion::{GameplayLock, MotionEvent};

/// A motion edge raised by a character's controller during a fixed tick
#[derive(Debug, Clone, Copy)]
pub struct MotionMessage {
    pub entity: Entity,
    pub event: MotionEvent,
}

impl Message for MotionMessage {}

/// Ask a character to be knocked back (combat, hazards)
#[derive(Debug, Clone, Copy)]
pub struct KnockbackRequest {
    pub target: Entity,
    pub direction: Vec2,
    pub force: f32,
}

impl Message for KnockbackRequest {}

/// Enter or leave the Hit/Death lock for a character
#[derive(Debug, Clone, Copy)]
pub struct GameplayLockRequest {
    pub target: Entity,
    pub lock: GameplayLock,
}

impl Message for GameplayLockRequest {}
