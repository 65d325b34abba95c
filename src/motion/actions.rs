//! Motion domain: jump buffering, coyote time, dash, wall-jump and knockback.
//!
//! Conflicting requests resolve by priority:
//! Knockback > Dash > Wall-jump > Jump > movement shaping.

use bevy::prelude::*;

use super::velocity::VelocityRequest;
use super::wall::WallDetectionResult;
use crate::config::{MovementConfiguration, PhysicsConfiguration};

/// Directions shorter than this are treated as no direction at all.
pub const MIN_DIRECTION_LENGTH: f32 = 1e-4;

/// Expiry window on the controller clock.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ActionWindow {
    pub opened_at: f32,
    pub expires_at: f32,
}

impl ActionWindow {
    pub fn open(now: f32, duration: f32) -> Self {
        Self {
            opened_at: now,
            expires_at: now + duration.max(0.0),
        }
    }

    pub fn is_open(&self, now: f32) -> bool {
        now <= self.expires_at
    }

    pub fn remaining(&self, now: f32) -> f32 {
        (self.expires_at - now).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum JumpKind {
    Ground,
    Coyote,
    Air,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum SpecialAction {
    Dash,
    WallJump,
    Knockback,
}

/// Gameplay states in which the character cannot act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum GameplayLock {
    #[default]
    None,
    Hit,
    Death,
}

/// Contact facts the jump resolution needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpContext {
    pub grounded: bool,
    pub wall: WallDetectionResult,
    pub horizontal_velocity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpOutcome {
    pub kind: JumpKind,
    pub request: VelocityRequest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnockbackOutcome {
    pub request: VelocityRequest,
    pub cancelled_dash: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct ActionController {
    jump_buffer: Option<ActionWindow>,
    coyote: Option<ActionWindow>,
    air_jumps_remaining: u8,
    dash: Option<ActionWindow>,
    dash_ready_at: f32,
    wall_jump_lock: Option<ActionWindow>,
    knockback: Option<ActionWindow>,
    lock: GameplayLock,
}

impl ActionController {
    pub fn new(movement: &MovementConfiguration) -> Self {
        Self {
            air_jumps_remaining: movement.max_air_jumps,
            ..Default::default()
        }
    }

    // ---- queries ----------------------------------------------------------

    pub fn air_jumps_remaining(&self) -> u8 {
        self.air_jumps_remaining
    }

    pub fn gameplay_lock(&self) -> GameplayLock {
        self.lock
    }

    pub fn has_buffered_jump(&self, now: f32) -> bool {
        self.jump_buffer.is_some_and(|w| w.is_open(now))
    }

    pub fn in_coyote_time(&self, now: f32) -> bool {
        self.coyote.is_some_and(|w| w.is_open(now))
    }

    pub fn is_dashing(&self, now: f32) -> bool {
        self.dash.is_some_and(|w| w.is_open(now))
    }

    pub fn is_knocked_back(&self, now: f32) -> bool {
        self.knockback.is_some_and(|w| w.is_open(now))
    }

    pub fn wall_reattach_locked(&self, now: f32) -> bool {
        self.wall_jump_lock.is_some_and(|w| w.is_open(now))
    }

    /// Whether jump/dash/movement input is honoured right now.
    pub fn accepts_input(&self, now: f32) -> bool {
        self.lock == GameplayLock::None && !self.is_knocked_back(now)
    }

    /// Whether the movement shaper is bypassed this tick.
    pub fn shaping_suppressed(&self, now: f32) -> bool {
        !self.accepts_input(now) || self.is_dashing(now) || self.wall_reattach_locked(now)
    }

    // ---- timers -----------------------------------------------------------

    /// Drop expired windows; returns the special actions that just ended.
    pub fn expire(&mut self, now: f32) -> Vec<SpecialAction> {
        let mut ended = Vec::new();

        if self.dash.is_some_and(|w| !w.is_open(now)) {
            self.dash = None;
            ended.push(SpecialAction::Dash);
        }
        if self.wall_jump_lock.is_some_and(|w| !w.is_open(now)) {
            self.wall_jump_lock = None;
            ended.push(SpecialAction::WallJump);
        }
        if self.knockback.is_some_and(|w| !w.is_open(now)) {
            self.knockback = None;
            ended.push(SpecialAction::Knockback);
        }
        if self.jump_buffer.is_some_and(|w| !w.is_open(now)) {
            self.jump_buffer = None;
        }
        if self.coyote.is_some_and(|w| !w.is_open(now)) {
            self.coyote = None;
        }

        ended
    }

    // ---- ground edges -----------------------------------------------------

    pub fn on_ground_entered(&mut self, now: f32, movement: &MovementConfiguration) {
        self.air_jumps_remaining = movement.max_air_jumps;
        self.coyote = None;
        // Landing shortens a pending dash cooldown
        let halved = now + movement.dash_cooldown * 0.5;
        self.dash_ready_at = self.dash_ready_at.min(halved);
    }

    pub fn on_ground_exited(&mut self, now: f32, movement: &MovementConfiguration) {
        self.coyote = Some(ActionWindow::open(now, movement.coyote_time_duration));
    }

    // ---- jump -------------------------------------------------------------

    pub fn buffer_jump(&mut self, now: f32, movement: &MovementConfiguration) {
        self.jump_buffer = Some(ActionWindow::open(now, movement.jump_buffer_duration));
    }

    /// Which jump a buffered press would produce right now, if any.
    pub fn resolve_jump(&self, now: f32, ctx: &JumpContext) -> Option<JumpKind> {
        if !self.accepts_input(now) || self.is_dashing(now) {
            return None;
        }
        if ctx.grounded {
            Some(JumpKind::Ground)
        } else if ctx.wall.detected && !self.wall_reattach_locked(now) {
            Some(JumpKind::Wall)
        } else if self.in_coyote_time(now) {
            Some(JumpKind::Coyote)
        } else if self.air_jumps_remaining > 0 {
            Some(JumpKind::Air)
        } else {
            None
        }
    }

    /// Execute the buffered jump when one is pending and allowed.
    pub fn try_jump(
        &mut self,
        now: f32,
        ctx: &JumpContext,
        movement: &MovementConfiguration,
        physics: &PhysicsConfiguration,
    ) -> Option<JumpOutcome> {
        if !self.has_buffered_jump(now) {
            return None;
        }
        let kind = self.resolve_jump(now, ctx)?;

        self.jump_buffer = None;
        self.coyote = None;

        let request = match kind {
            JumpKind::Ground | JumpKind::Coyote => VelocityRequest::set_vertical(movement.jump_power),
            JumpKind::Air => {
                self.air_jumps_remaining = self.air_jumps_remaining.saturating_sub(1);
                VelocityRequest::set_vertical(movement.jump_power)
            }
            JumpKind::Wall => {
                let away = if ctx.wall.normal.x.abs() > MIN_DIRECTION_LENGTH {
                    ctx.wall.normal.x.signum()
                } else {
                    -ctx.wall.side.toward()
                };
                let push = away * movement.jump_power * movement.wall_jump_push;
                let kept = ctx.horizontal_velocity * physics.wall_jump_momentum_keep;
                self.wall_jump_lock = Some(ActionWindow::open(now, movement.wall_jump_lock_duration));
                self.air_jumps_remaining = movement.max_air_jumps;
                VelocityRequest::set(Vec2::new(push + kept, movement.jump_power))
            }
        };

        Some(JumpOutcome { kind, request })
    }

    // ---- dash -------------------------------------------------------------

    pub fn can_dash(&self, now: f32, grounded: bool, movement: &MovementConfiguration) -> bool {
        self.accepts_input(now)
            && !self.is_dashing(now)
            && now >= self.dash_ready_at
            && (grounded || movement.allow_air_dash)
    }

    /// Start a dash along `direction`. Zero-length directions are a no-op.
    pub fn start_dash(
        &mut self,
        now: f32,
        direction: Vec2,
        grounded: bool,
        movement: &MovementConfiguration,
    ) -> Option<VelocityRequest> {
        if direction.length() <= MIN_DIRECTION_LENGTH || !self.can_dash(now, grounded, movement) {
            return None;
        }

        self.dash = Some(ActionWindow::open(now, movement.dash_duration));
        self.dash_ready_at = now + movement.dash_cooldown;
        Some(VelocityRequest::set(direction.normalize() * movement.dash_speed))
    }

    /// End an active dash early. Returns true when one was running.
    pub fn cancel_dash(&mut self) -> bool {
        self.dash.take().is_some()
    }

    // ---- knockback --------------------------------------------------------

    /// Unconditional override. Zero-length directions are a no-op.
    pub fn knockback(
        &mut self,
        now: f32,
        direction: Vec2,
        force: f32,
        movement: &MovementConfiguration,
    ) -> Option<KnockbackOutcome> {
        if direction.length() <= MIN_DIRECTION_LENGTH {
            return None;
        }

        let cancelled_dash = self.cancel_dash();
        self.jump_buffer = None;
        self.knockback = Some(ActionWindow::open(now, movement.knockback_duration));

        Some(KnockbackOutcome {
            request: VelocityRequest::set(direction.normalize() * force),
            cancelled_dash,
        })
    }

    // ---- gameplay lock ----------------------------------------------------

    /// Enter or leave Hit/Death. Locking ends a dash; returns true if it did.
    pub fn set_gameplay_lock(&mut self, lock: GameplayLock) -> bool {
        self.lock = lock;
        if lock != GameplayLock::None {
            self.jump_buffer = None;
            return self.cancel_dash();
        }
        false
    }
}
