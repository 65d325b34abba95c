//! Motion domain: velocity storage, one-shot requests and clamping.

use bevy::prelude::*;

/// Which axes a [`VelocityRequest`] touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum VelocityAxis {
    Horizontal,
    Vertical,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum RequestMode {
    Set,
    Add,
}

/// One-shot velocity instruction, consumed by [`VelocityStore::apply`] on the
/// tick it is issued. Scalar requests carry their value in the matching
/// component of `value`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct VelocityRequest {
    pub axis: VelocityAxis,
    pub value: Vec2,
    pub mode: RequestMode,
}

impl VelocityRequest {
    pub fn set(value: Vec2) -> Self {
        Self {
            axis: VelocityAxis::Both,
            value,
            mode: RequestMode::Set,
        }
    }

    pub fn add(value: Vec2) -> Self {
        Self {
            axis: VelocityAxis::Both,
            value,
            mode: RequestMode::Add,
        }
    }

    pub fn set_horizontal(x: f32) -> Self {
        Self {
            axis: VelocityAxis::Horizontal,
            value: Vec2::new(x, 0.0),
            mode: RequestMode::Set,
        }
    }

    pub fn set_vertical(y: f32) -> Self {
        Self {
            axis: VelocityAxis::Vertical,
            value: Vec2::new(0.0, y),
            mode: RequestMode::Set,
        }
    }

    pub fn add_horizontal(x: f32) -> Self {
        Self {
            axis: VelocityAxis::Horizontal,
            value: Vec2::new(x, 0.0),
            mode: RequestMode::Add,
        }
    }

    pub fn add_vertical(y: f32) -> Self {
        Self {
            axis: VelocityAxis::Vertical,
            value: Vec2::new(0.0, y),
            mode: RequestMode::Add,
        }
    }
}

/// Current 2D velocity with per-axis limits. Holds no policy beyond clamping.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct VelocityStore {
    velocity: Vec2,
    max_horizontal: f32,
    max_vertical: f32,
    /// Cap on downward speed, never above `max_vertical`
    terminal_velocity: f32,
}

impl VelocityStore {
    pub fn new(max_horizontal: f32, max_vertical: f32, terminal_velocity: f32) -> Self {
        let max_horizontal = max_horizontal.abs();
        let max_vertical = max_vertical.abs();
        Self {
            velocity: Vec2::ZERO,
            max_horizontal,
            max_vertical,
            terminal_velocity: terminal_velocity.abs().min(max_vertical),
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn horizontal(&self) -> f32 {
        self.velocity.x
    }

    pub fn vertical(&self) -> f32 {
        self.velocity.y
    }

    pub fn limits(&self) -> (f32, f32) {
        (self.max_horizontal, self.max_vertical)
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.clamp();
    }

    pub fn set_horizontal(&mut self, x: f32) {
        self.velocity.x = x;
        self.clamp();
    }

    pub fn set_vertical(&mut self, y: f32) {
        self.velocity.y = y;
        self.clamp();
    }

    /// Explicit Euler step: `v += a * dt`.
    pub fn integrate(&mut self, acceleration: Vec2, dt: f32) {
        self.velocity += acceleration * dt;
        self.clamp();
    }

    /// Replace the limits and clamp the current velocity to them.
    pub fn clamp_to_limits(&mut self, max_horizontal: f32, max_vertical: f32) {
        self.max_horizontal = max_horizontal.abs();
        self.max_vertical = max_vertical.abs();
        self.terminal_velocity = self.terminal_velocity.min(self.max_vertical);
        self.clamp();
    }

    pub fn apply(&mut self, request: VelocityRequest) {
        let current = self.velocity;
        let combine = |current: f32, value: f32| match request.mode {
            RequestMode::Set => value,
            RequestMode::Add => current + value,
        };

        self.velocity = match request.axis {
            VelocityAxis::Horizontal => Vec2::new(combine(current.x, request.value.x), current.y),
            VelocityAxis::Vertical => Vec2::new(current.x, combine(current.y, request.value.y)),
            VelocityAxis::Both => Vec2::new(
                combine(current.x, request.value.x),
                combine(current.y, request.value.y),
            ),
        };
        self.clamp();
    }

    fn clamp(&mut self) {
        // NaN collapses to rest
        if self.velocity.x.is_nan() {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.is_nan() {
            self.velocity.y = 0.0;
        }
        self.velocity.x = self.velocity.x.clamp(-self.max_horizontal, self.max_horizontal);
        self.velocity.y = self.velocity.y.clamp(-self.terminal_velocity, self.max_vertical);
    }
}
