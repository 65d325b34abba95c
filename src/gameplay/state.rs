//! Gameplay domain: discrete character states derived from motion.

use bevy::prelude::*;

use crate::motion::{GameplayLock, GravityState, MotionSnapshot, MovementState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum PlatformerStateType {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    WallSlide,
    Dash,
    Hit,
    Death,
}

impl PlatformerStateType {
    pub const ALL: [Self; 8] = [
        Self::Idle,
        Self::Run,
        Self::Jump,
        Self::Fall,
        Self::WallSlide,
        Self::Dash,
        Self::Hit,
        Self::Death,
    ];

    /// Whether the character can act in this state.
    pub fn is_controllable(self) -> bool {
        !matches!(self, Self::Hit | Self::Death)
    }
}

/// Pick the gameplay state for a snapshot.
///
/// Locks win over motion, then dash, then airborne states; a knocked-back
/// character reads as `Hit` until the knockback ends.
pub fn classify(snapshot: &MotionSnapshot) -> PlatformerStateType {
    match snapshot.gameplay_lock {
        GameplayLock::Death => return PlatformerStateType::Death,
        GameplayLock::Hit => return PlatformerStateType::Hit,
        GameplayLock::None => {}
    }
    if snapshot.is_knocked_back {
        return PlatformerStateType::Hit;
    }
    if snapshot.is_dashing || snapshot.gravity_state == GravityState::Dashing {
        return PlatformerStateType::Dash;
    }

    if !snapshot.is_grounded {
        if snapshot.is_wall_sliding {
            return PlatformerStateType::WallSlide;
        }
        return match snapshot.gravity_state {
            GravityState::JumpHold | GravityState::JumpCut => PlatformerStateType::Jump,
            GravityState::Falling => PlatformerStateType::Fall,
            _ if snapshot.velocity.y > 0.0 => PlatformerStateType::Jump,
            _ => PlatformerStateType::Fall,
        };
    }

    match snapshot.movement_state {
        MovementState::Idle => PlatformerStateType::Idle,
        _ if snapshot.velocity.x == 0.0 => PlatformerStateType::Idle,
        _ => PlatformerStateType::Run,
    }
}

/// Current gameplay state of a character, refreshed every fixed tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct PlatformerState {
    pub current: PlatformerStateType,
    pub previous: PlatformerStateType,
}

impl PlatformerState {
    /// Move to `next`; returns true when the state changed.
    pub fn transition(&mut self, next: PlatformerStateType) -> bool {
        if self.current == next {
            return false;
        }
        self.previous = self.current;
        self.current = next;
        true
    }
}
