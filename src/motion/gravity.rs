//! Motion domain: gravity state machine.
//!
//! Evaluated once per tick in priority order, first match wins:
//!
//! 1. `Dashing` while a dash is active. When it ends the engine drops to
//!    `Falling` if airborne, `Normal` if grounded.
//! 2. `JumpCut` while a jump is still rising and jump is not held, including
//!    a press released before the first airborne tick.
//! 3. `Apex` inside the `[falling_threshold, rising_threshold]` band, unless
//!    already falling.
//! 4. `Falling` below `falling_threshold`, or staying in `Falling` once there.
//! 5. `JumpHold` while rising with jump held.
//! 6. `Normal` when grounded, or when nothing else applies.
//!
//! Wall-slide gravity replaces fall gravity inside `Falling` and is not a
//! state of its own.

use bevy::prelude::*;

use crate::config::PhysicsConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum GravityState {
    #[default]
    Normal,
    JumpHold,
    JumpCut,
    Falling,
    Apex,
    Dashing,
}

/// Per-tick inputs to the gravity evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GravityContext {
    pub dashing: bool,
    pub grounded: bool,
    pub vertical_velocity: f32,
    pub jump_held: bool,
    /// Airborne, touching a wall and pushing into it
    pub wall_sliding: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct GravityEngine {
    state: GravityState,
    wall_slide_active: bool,
    /// Set when a jump starts, cleared at the top of the arc or on landing
    jump_ascent: bool,
}

impl GravityEngine {
    pub fn state(&self) -> GravityState {
        self.state
    }

    /// True when the last evaluation substituted wall-slide gravity.
    pub fn is_wall_sliding(&self) -> bool {
        self.wall_slide_active
    }

    pub fn evaluate(&mut self, ctx: &GravityContext, physics: &PhysicsConfiguration) -> GravityState {
        let vy = ctx.vertical_velocity;
        let airborne = !ctx.grounded;
        let rising = vy > physics.rising_threshold;
        if ctx.dashing || !airborne || !rising {
            self.jump_ascent = false;
        }

        let next = if ctx.dashing {
            GravityState::Dashing
        } else if self.state == GravityState::Dashing {
            if airborne {
                GravityState::Falling
            } else {
                GravityState::Normal
            }
        } else if airborne
            && rising
            && !ctx.jump_held
            && (self.jump_ascent
                || matches!(self.state, GravityState::JumpHold | GravityState::JumpCut))
        {
            GravityState::JumpCut
        } else if airborne
            && vy >= physics.falling_threshold
            && vy <= physics.rising_threshold
            && self.state != GravityState::Falling
        {
            GravityState::Apex
        } else if airborne
            && (vy < physics.falling_threshold
                || (self.state == GravityState::Falling && vy <= physics.rising_threshold))
        {
            GravityState::Falling
        } else if airborne && rising && ctx.jump_held {
            GravityState::JumpHold
        } else {
            GravityState::Normal
        };

        self.state = next;
        self.wall_slide_active = next == GravityState::Falling && ctx.wall_sliding;
        next
    }

    /// Signed vertical gravity for the current state.
    pub fn gravity(&self, physics: &PhysicsConfiguration) -> f32 {
        match self.state {
            GravityState::Normal => physics.normal_gravity,
            GravityState::JumpHold => physics.jump_hold_gravity,
            GravityState::JumpCut => physics.jump_cut_gravity,
            GravityState::Apex => physics.apex_gravity,
            GravityState::Falling if self.wall_slide_active => physics.wall_slide_gravity,
            GravityState::Falling => physics.fall_gravity,
            GravityState::Dashing => physics.dash_gravity,
        }
    }

    pub fn acceleration(&self, physics: &PhysicsConfiguration) -> Vec2 {
        Vec2::new(0.0, self.gravity(physics))
    }

    /// Evaluate and return this tick's acceleration.
    pub fn step(&mut self, ctx: &GravityContext, physics: &PhysicsConfiguration) -> Vec2 {
        self.evaluate(ctx, physics);
        self.acceleration(physics)
    }

    /// A jump just set the take-off velocity.
    pub fn begin_jump(&mut self) {
        self.jump_ascent = true;
    }

    /// Whether the body is still rising from a jump.
    pub fn in_jump_ascent(&self) -> bool {
        self.jump_ascent
    }

    /// Forget the current jump; a rise from now on is not a jump.
    pub fn cancel_jump(&mut self) {
        self.jump_ascent = false;
    }

    /// Switch to `Dashing` immediately when a dash starts.
    pub fn enter_dash(&mut self) {
        self.state = GravityState::Dashing;
        self.wall_slide_active = false;
        self.jump_ascent = false;
    }

    /// Leave `Dashing` right away (knockback, gameplay lock).
    pub fn interrupt_dash(&mut self, grounded: bool) {
        self.jump_ascent = false;
        if self.state == GravityState::Dashing {
            self.state = if grounded {
                GravityState::Normal
            } else {
                GravityState::Falling
            };
        }
    }
}
