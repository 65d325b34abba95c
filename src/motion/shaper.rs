//! Motion domain: horizontal velocity shaping.

use bevy::prelude::*;

use crate::config::{MovementConfiguration, PhysicsConfiguration};

/// Axis values inside this band count as no input.
pub const INPUT_DEADZONE: f32 = 0.1;
/// Speeds below this snap to rest.
pub const STOP_EPSILON: f32 = 1.0;
/// How close to the target speed counts as running.
pub const RUN_TOLERANCE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum MovementState {
    #[default]
    Idle,
    Accelerating,
    Running,
    Decelerating,
    TurningAround,
}

fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Target horizontal speed for an input axis.
pub fn target_speed(axis: f32, grounded: bool, movement: &MovementConfiguration) -> f32 {
    let multiplier = if grounded {
        1.0
    } else {
        movement.air_move_multiplier
    };
    movement.run_speed * axis.clamp(-1.0, 1.0) * multiplier
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct MovementShaper {
    state: MovementState,
}

impl MovementShaper {
    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn force_idle(&mut self) {
        self.state = MovementState::Idle;
    }

    /// Advance one tick and return the new horizontal velocity.
    pub fn shape(
        &mut self,
        axis: f32,
        grounded: bool,
        current: f32,
        dt: f32,
        movement: &MovementConfiguration,
        physics: &PhysicsConfiguration,
    ) -> f32 {
        let axis = axis.clamp(-1.0, 1.0);
        // Air control scales how fast speed changes, never the cap
        let rate_scale = if grounded {
            1.0
        } else {
            physics.air_control_strength
        };
        let decay = if grounded {
            physics.ground_friction
        } else {
            physics.air_resistance
        };

        if axis.abs() <= INPUT_DEADZONE {
            return self.release(current, rate_scale, decay, dt, movement);
        }

        let target = target_speed(axis, grounded, movement);
        let reversing = current.abs() > STOP_EPSILON && current.signum() != axis.signum();

        if reversing {
            self.state = MovementState::TurningAround;
            return move_toward(current, target, movement.turn_around_rate * rate_scale * dt);
        }

        if current.abs() < target.abs() - RUN_TOLERANCE {
            let next = move_toward(current, target, movement.acceleration * rate_scale * dt);
            self.state = if (next - target).abs() <= RUN_TOLERANCE {
                MovementState::Running
            } else {
                MovementState::Accelerating
            };
            return next;
        }

        self.state = MovementState::Running;
        if current.abs() > target.abs() + RUN_TOLERANCE {
            // Faster than the target along the input: nothing opposes, so decay
            let slowed = move_toward(current, target, movement.deceleration * rate_scale * dt)
                * (1.0 - decay);
            if slowed.abs() < target.abs() {
                target
            } else {
                slowed
            }
        } else {
            target
        }
    }

    fn release(
        &mut self,
        current: f32,
        rate_scale: f32,
        decay: f32,
        dt: f32,
        movement: &MovementConfiguration,
    ) -> f32 {
        if !movement.use_gradual_stop || current.abs() <= STOP_EPSILON {
            self.state = MovementState::Idle;
            return 0.0;
        }

        let slowed = move_toward(current, 0.0, movement.deceleration * rate_scale * dt) * (1.0 - decay);
        if slowed.abs() <= STOP_EPSILON {
            self.state = MovementState::Idle;
            0.0
        } else {
            self.state = MovementState::Decelerating;
            slowed
        }
    }
}
