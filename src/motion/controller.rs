//! Motion domain: the per-tick composition of every motion component.
//!
//! Tick order: timers, action requests, horizontal shaping, gravity,
//! integration and clamping, contact re-classification, then publication of
//! state changes and edge events.

use bevy::prelude::*;

use super::actions::{
    ActionController, GameplayLock, JumpContext, JumpKind, MIN_DIRECTION_LENGTH, SpecialAction,
};
use super::events::{MotionEvent, MotionEventHub, SubscriptionId, Watched};
use super::gravity::{GravityContext, GravityEngine, GravityState};
use super::ground::{GroundContactTracker, GroundEdge, probe_ground};
use super::probe::ContactProbe;
use super::shaper::{INPUT_DEADZONE, MovementShaper, MovementState};
use super::velocity::{VelocityRequest, VelocityStore};
use super::wall::{Facing, WallDetector, WallSide};
use crate::config::{MovementConfiguration, PhysicsConfiguration};

/// Input for one character, sampled once per tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionInput {
    /// Normalized direction; x drives running, the full vector aims dashes
    pub axis: Vec2,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub dash_pressed: bool,
}

impl MotionInput {
    pub fn clear_pulses(&mut self) {
        self.jump_pressed = false;
        self.dash_pressed = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct ContactState {
    pub grounded: bool,
    pub was_grounded_last_frame: bool,
    pub wall_detected: bool,
    pub wall_side: WallSide,
    pub wall_normal: Vec2,
}

/// Read-only view published after every tick.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct MotionSnapshot {
    pub velocity: Vec2,
    pub is_rising: bool,
    pub is_falling: bool,
    pub is_grounded: bool,
    pub is_wall_detected: bool,
    pub is_wall_sliding: bool,
    pub wall_side: WallSide,
    pub gravity_state: GravityState,
    pub movement_state: MovementState,
    pub facing: Facing,
    pub is_dashing: bool,
    pub is_knocked_back: bool,
    pub gameplay_lock: GameplayLock,
}

#[derive(Component, Debug)]
pub struct CharacterMotionController {
    physics: PhysicsConfiguration,
    movement: MovementConfiguration,
    clock: f32,
    velocity: VelocityStore,
    ground: GroundContactTracker,
    wall: WallDetector,
    gravity: GravityEngine,
    shaper: MovementShaper,
    actions: ActionController,
    contact: ContactState,
    /// Axis set through `move_axis`; used when live input is idle
    commanded_axis: f32,
    /// Set by `jump`, cleared by `release_jump`
    jump_hold_latch: bool,
    published_gravity: Watched<GravityState>,
    published_movement: Watched<MovementState>,
    events: MotionEventHub,
}

impl CharacterMotionController {
    pub fn new(physics: PhysicsConfiguration, movement: MovementConfiguration) -> Self {
        let velocity = VelocityStore::new(
            physics.max_horizontal_speed,
            physics.max_vertical_speed,
            physics.terminal_velocity,
        );
        let wall = WallDetector::new(&physics);
        let actions = ActionController::new(&movement);

        Self {
            physics,
            movement,
            clock: 0.0,
            velocity,
            ground: GroundContactTracker::default(),
            wall,
            gravity: GravityEngine::default(),
            shaper: MovementShaper::default(),
            actions,
            contact: ContactState::default(),
            commanded_axis: 0.0,
            jump_hold_latch: false,
            published_gravity: Watched::default(),
            published_movement: Watched::default(),
            events: MotionEventHub::default(),
        }
    }

    // ---- per-tick pipeline ------------------------------------------------

    pub fn tick(&mut self, dt: f32, input: &MotionInput, body: &impl ContactProbe) -> MotionSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock += dt;
        let now = self.clock;

        for ended in self.actions.expire(now) {
            debug!("Special action ended: {:?}", ended);
            self.events.emit(MotionEvent::SpecialActionEnded(ended));
        }

        let accepts_input = self.actions.accepts_input(now);
        let axis = if accepts_input {
            self.effective_axis(input)
        } else {
            0.0
        };

        if accepts_input && !self.actions.is_dashing(now) && !self.actions.wall_reattach_locked(now) {
            if let Some(facing) = Facing::from_axis(axis, INPUT_DEADZONE) {
                self.wall.set_facing(facing);
            }
        }

        if accepts_input {
            if input.dash_pressed {
                let aim = if input.axis.length() > INPUT_DEADZONE {
                    input.axis
                } else {
                    Vec2::new(self.facing().sign(), 0.0)
                };
                self.dash(aim);
            }
            if input.jump_pressed {
                self.actions.buffer_jump(now, &self.movement);
            }
            self.try_buffered_jump(body);
        }

        if !self.actions.shaping_suppressed(now) {
            let vx = self.shaper.shape(
                axis,
                self.contact.grounded,
                self.velocity.horizontal(),
                dt,
                &self.movement,
                &self.physics,
            );
            self.velocity.set_horizontal(vx);
        }

        let gravity_ctx = GravityContext {
            dashing: self.actions.is_dashing(now),
            grounded: self.contact.grounded,
            vertical_velocity: self.velocity.vertical(),
            jump_held: accepts_input && (input.jump_held || self.jump_hold_latch),
            wall_sliding: self.pushing_into_wall(axis),
        };
        let acceleration = self.gravity.step(&gravity_ctx, &self.physics);
        self.velocity.integrate(acceleration, dt);

        self.update_contacts(body);
        self.publish_state_changes();
        self.snapshot()
    }

    fn effective_axis(&self, input: &MotionInput) -> f32 {
        if input.axis.x.abs() > INPUT_DEADZONE {
            input.axis.x.clamp(-1.0, 1.0)
        } else {
            self.commanded_axis
        }
    }

    fn pushing_into_wall(&self, axis: f32) -> bool {
        if self.contact.grounded || !self.contact.wall_detected {
            return false;
        }
        match self.contact.wall_side {
            WallSide::Left => axis < -INPUT_DEADZONE,
            WallSide::Right => axis > INPUT_DEADZONE,
            WallSide::None => false,
        }
    }

    fn update_contacts(&mut self, body: &impl ContactProbe) {
        let now = self.clock;
        let vertical_before = self.velocity.vertical();

        // A body rising faster than the threshold is leaving the surface
        let hit = probe_ground(body, &self.physics);
        let accept = vertical_before <= self.physics.rising_threshold;
        let edge = self.ground.update_from_hit(hit, accept);

        match edge {
            Some(GroundEdge::Entered) => {
                self.events.emit(MotionEvent::GroundEntered);
                if vertical_before < 0.0 {
                    debug!("Landed: impact_speed={:.1}", -vertical_before);
                    self.events.emit(MotionEvent::Landed(-vertical_before));
                }
                self.actions.on_ground_entered(now, &self.movement);
            }
            Some(GroundEdge::Exited) => {
                debug!("Left ground: air_jumps_remaining={}", self.actions.air_jumps_remaining());
                self.events.emit(MotionEvent::GroundExited);
                self.actions.on_ground_exited(now, &self.movement);
            }
            None => {}
        }

        if self.ground.is_grounded() && self.velocity.vertical() < 0.0 {
            self.velocity.set_vertical(0.0);
        }

        self.wall.check_wall_state(body);
        if self.actions.wall_reattach_locked(now) || self.actions.is_dashing(now) {
            self.wall.force_wall_state(false);
        }
        self.refresh_contact();

        // Buffered press from before touchdown fires on the landing tick
        if edge == Some(GroundEdge::Entered) && self.actions.has_buffered_jump(now) {
            self.try_buffered_jump(body);
        }
    }

    /// Re-read contact from the trackers and raise wall edges, forced
    /// changes included.
    fn refresh_contact(&mut self) {
        let previous = self.contact;
        self.contact = ContactState {
            grounded: self.ground.is_grounded(),
            was_grounded_last_frame: self.ground.was_grounded_last_frame(),
            wall_detected: self.wall.is_wall_detected(),
            wall_side: self.wall.wall_side(),
            wall_normal: self.wall.wall_normal(),
        };

        if !previous.wall_detected && self.contact.wall_detected {
            debug!("Wall contact: side={:?}", self.contact.wall_side);
            self.events.emit(MotionEvent::WallEntered(self.contact.wall_side));
        } else if previous.wall_detected && !self.contact.wall_detected {
            self.events.emit(MotionEvent::WallExited(previous.wall_side));
        }
    }

    fn try_buffered_jump(&mut self, body: &impl ContactProbe) -> bool {
        let now = self.clock;
        if !self.actions.has_buffered_jump(now) {
            return false;
        }

        let mut wall = self.wall.result();
        if !self.contact.grounded && !wall.detected && !self.actions.wall_reattach_locked(now) {
            // Facing away from the wall is the usual way to wall-jump
            wall = self.wall.check_around(body);
        }

        let ctx = JumpContext {
            grounded: self.contact.grounded,
            wall,
            horizontal_velocity: self.velocity.horizontal(),
        };
        let Some(outcome) = self.actions.try_jump(now, &ctx, &self.movement, &self.physics) else {
            return false;
        };

        self.velocity.apply(outcome.request);
        self.gravity.begin_jump();
        if self.ground.force_airborne().is_some() {
            self.events.emit(MotionEvent::GroundExited);
        }
        if outcome.kind == JumpKind::Wall {
            self.wall.force_wall_state(false);
            if let Some(facing) = Facing::from_axis(self.velocity.horizontal(), 0.0) {
                self.wall.set_facing(facing);
            }
            self.events.emit(MotionEvent::SpecialActionStarted(SpecialAction::WallJump));
        }
        self.refresh_contact();

        debug!(
            "Jump: kind={:?}, velocity={:?}, air_jumps_remaining={}",
            outcome.kind,
            self.velocity.velocity(),
            self.actions.air_jumps_remaining()
        );
        self.events.emit(MotionEvent::JumpStarted(outcome.kind));
        true
    }

    fn publish_state_changes(&mut self) {
        if let Some(state) = self.published_gravity.publish(self.gravity.state()) {
            self.events.emit(MotionEvent::GravityStateChanged(state));
        }
        if let Some(state) = self.published_movement.publish(self.shaper.state()) {
            self.events.emit(MotionEvent::MovementStateChanged(state));
        }
    }

    // ---- imperative entry points ------------------------------------------

    /// Press jump: buffers the press and executes at once when eligible.
    /// Without a probe only grounded, coyote and air jumps can fire here;
    /// wall jumps need the facing-side wall from the last tick.
    pub fn jump(&mut self) -> bool {
        let now = self.clock;
        if !self.actions.accepts_input(now) {
            return false;
        }
        self.actions.buffer_jump(now, &self.movement);
        self.jump_hold_latch = true;
        let executed = self.try_buffered_jump(&NoProbe);
        self.publish_state_changes();
        executed
    }

    pub fn release_jump(&mut self) {
        self.jump_hold_latch = false;
    }

    /// Dash along `direction`. Rejected silently when not allowed.
    pub fn dash(&mut self, direction: Vec2) -> bool {
        let now = self.clock;
        let Some(request) =
            self.actions
                .start_dash(now, direction, self.contact.grounded, &self.movement)
        else {
            return false;
        };

        self.velocity.apply(request);
        self.gravity.enter_dash();
        self.wall.force_wall_state(false);
        self.refresh_contact();
        if let Some(facing) = Facing::from_axis(direction.x, MIN_DIRECTION_LENGTH) {
            self.wall.set_facing(facing);
        }

        debug!("Dash started: velocity={:?}", self.velocity.velocity());
        self.events.emit(MotionEvent::SpecialActionStarted(SpecialAction::Dash));
        self.publish_state_changes();
        true
    }

    /// Highest-priority override: replaces velocity and pre-empts any dash.
    pub fn knockback(&mut self, direction: Vec2, force: f32) -> bool {
        let now = self.clock;
        let Some(outcome) = self.actions.knockback(now, direction, force, &self.movement) else {
            return false;
        };

        self.velocity.apply(outcome.request);
        self.gravity.cancel_jump();
        if outcome.cancelled_dash {
            self.events.emit(MotionEvent::SpecialActionEnded(SpecialAction::Dash));
        }
        if self.velocity.vertical() > 0.0 && self.ground.force_airborne().is_some() {
            self.events.emit(MotionEvent::GroundExited);
        }
        self.gravity.interrupt_dash(self.ground.is_grounded());
        self.refresh_contact();

        debug!(
            "Knockback applied: direction={:?}, force={:.1}, velocity={:?}",
            direction,
            force,
            self.velocity.velocity()
        );
        self.events.emit(MotionEvent::SpecialActionStarted(SpecialAction::Knockback));
        self.publish_state_changes();
        true
    }

    /// Keep moving along `axis` until `stop` or another `move_axis`.
    pub fn move_axis(&mut self, axis: f32) {
        self.commanded_axis = if axis.is_finite() {
            axis.clamp(-1.0, 1.0)
        } else {
            0.0
        };
    }

    /// Zero horizontal velocity and force `Idle`, whatever the input.
    pub fn stop(&mut self) {
        self.commanded_axis = 0.0;
        self.velocity.set_horizontal(0.0);
        self.shaper.force_idle();
        self.publish_state_changes();
    }

    pub fn request_velocity(&mut self, request: VelocityRequest) {
        self.velocity.apply(request);
    }

    /// Enter Hit/Death (or leave with `GameplayLock::None`).
    pub fn set_gameplay_lock(&mut self, lock: GameplayLock) {
        if self.actions.set_gameplay_lock(lock) {
            self.gravity.interrupt_dash(self.ground.is_grounded());
            self.events.emit(MotionEvent::SpecialActionEnded(SpecialAction::Dash));
        }
        if lock != GameplayLock::None {
            self.jump_hold_latch = false;
            self.commanded_axis = 0.0;
        }
        self.publish_state_changes();
    }

    pub fn set_direction_provider(&mut self, provider: impl Fn() -> Facing + Send + Sync + 'static) {
        self.wall.set_direction_provider(provider);
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.wall.set_facing(facing);
    }

    // ---- subscriptions ----------------------------------------------------

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&MotionEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn clear_subscribers(&mut self) {
        self.events.clear_subscribers();
    }

    /// Events raised since the last call. Poll every tick to keep this short.
    pub fn drain_events(&mut self) -> Vec<MotionEvent> {
        self.events.drain()
    }

    // ---- read-only state --------------------------------------------------

    pub fn velocity(&self) -> Vec2 {
        self.velocity.velocity()
    }

    pub fn is_rising(&self) -> bool {
        self.velocity.vertical() > self.physics.rising_threshold
    }

    pub fn is_falling(&self) -> bool {
        self.velocity.vertical() < self.physics.falling_threshold
    }

    pub fn is_grounded(&self) -> bool {
        self.contact.grounded
    }

    pub fn is_wall_detected(&self) -> bool {
        self.contact.wall_detected
    }

    pub fn gravity_state(&self) -> GravityState {
        self.gravity.state()
    }

    pub fn movement_state(&self) -> MovementState {
        self.shaper.state()
    }

    pub fn contact(&self) -> ContactState {
        self.contact
    }

    pub fn facing(&self) -> Facing {
        self.wall.facing()
    }

    pub fn is_dashing(&self) -> bool {
        self.actions.is_dashing(self.clock)
    }

    pub fn is_knocked_back(&self) -> bool {
        self.actions.is_knocked_back(self.clock)
    }

    pub fn air_jumps_remaining(&self) -> u8 {
        self.actions.air_jumps_remaining()
    }

    pub fn gameplay_lock(&self) -> GameplayLock {
        self.actions.gameplay_lock()
    }

    /// Seconds simulated since construction.
    pub fn elapsed(&self) -> f32 {
        self.clock
    }

    pub fn physics(&self) -> &PhysicsConfiguration {
        &self.physics
    }

    pub fn movement(&self) -> &MovementConfiguration {
        &self.movement
    }

    pub fn snapshot(&self) -> MotionSnapshot {
        MotionSnapshot {
            velocity: self.velocity(),
            is_rising: self.is_rising(),
            is_falling: self.is_falling(),
            is_grounded: self.is_grounded(),
            is_wall_detected: self.is_wall_detected(),
            is_wall_sliding: self.gravity.is_wall_sliding(),
            wall_side: self.contact.wall_side,
            gravity_state: self.gravity_state(),
            movement_state: self.movement_state(),
            facing: self.facing(),
            is_dashing: self.is_dashing(),
            is_knocked_back: self.is_knocked_back(),
            gameplay_lock: self.gameplay_lock(),
        }
    }
}

/// Probe used by entry points called between ticks; sees nothing.
struct NoProbe;

impl ContactProbe for NoProbe {
    fn position(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn cast(&self, _origin: Vec2, _direction: Dir2, _distance: f32) -> Option<super::probe::ProbeHit> {
        None
    }
}
