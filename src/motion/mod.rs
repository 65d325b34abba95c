//! Motion domain: the platformer movement and physics state engine.
//!
//! Everything here is plain data driven by [`CharacterMotionController::tick`];
//! the Bevy bridge in `crate::movement` only feeds it input and a
//! [`ContactProbe`] and copies the resulting velocity back to the body.

mod actions;
mod controller;
mod events;
mod gravity;
mod ground;
mod probe;
mod shaper;
mod velocity;
mod wall;


pub use actions::{
    ActionController, ActionWindow, GameplayLock, JumpContext, JumpKind, JumpOutcome,
    KnockbackOutcome, MIN_DIRECTION_LENGTH, SpecialAction,
};
pub use controller::{CharacterMotionController, ContactState, MotionInput, MotionSnapshot};
pub use events::{MAX_PENDING_EVENTS, MotionEvent, MotionEventHub, SubscriptionId, Watched};
pub use gravity::{GravityContext, GravityEngine, GravityState};
pub use ground::{GroundContactTracker, GroundEdge, probe_ground};
pub use probe::{ContactProbe, ProbeHit, SnapType};
pub use shaper::{
    INPUT_DEADZONE, MovementShaper, MovementState, RUN_TOLERANCE, STOP_EPSILON, target_speed,
};
pub use velocity::{RequestMode, VelocityAxis, VelocityRequest, VelocityStore};
pub use wall::{Facing, WallDetectionResult, WallDetector, WallSide};
