//! Gameplay domain: state classification and animation lookup tests.

use bevy::prelude::*;

use super::{PlatformerState, PlatformerStateType, StateAnimations, classify};
use crate::config::{MovementConfiguration, PhysicsConfiguration};
use crate::motion::{
    CharacterMotionController, ContactProbe, Facing, GameplayLock, GravityState, MotionInput,
    MotionSnapshot, MovementState, ProbeHit, SnapType, WallSide,
};

fn grounded_idle() -> MotionSnapshot {
    MotionSnapshot {
        velocity: Vec2::ZERO,
        is_rising: false,
        is_falling: false,
        is_grounded: true,
        is_wall_detected: false,
        is_wall_sliding: false,
        wall_side: WallSide::None,
        gravity_state: GravityState::Normal,
        movement_state: MovementState::Idle,
        facing: Facing::Right,
        is_dashing: false,
        is_knocked_back: false,
        gameplay_lock: GameplayLock::None,
    }
}

struct Floor;

impl ContactProbe for Floor {
    fn position(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn cast(&self, _origin: Vec2, direction: Dir2, _distance: f32) -> Option<ProbeHit> {
        (direction.y < -0.5).then_some(ProbeHit {
            distance: 0.0,
            normal: Vec2::Y,
            snap: SnapType::Ground,
        })
    }
}

// -----------------------------------------------------------------------------
// Classification
// -----------------------------------------------------------------------------

#[test]
fn test_classify_grounded_states() {
    let idle = grounded_idle();
    assert_eq!(classify(&idle), PlatformerStateType::Idle);

    let running = MotionSnapshot {
        velocity: Vec2::new(200.0, 0.0),
        movement_state: MovementState::Accelerating,
        ..idle
    };
    assert_eq!(classify(&running), PlatformerStateType::Run);
}

#[test]
fn test_classify_airborne_states() {
    let base = MotionSnapshot {
        is_grounded: false,
        ..grounded_idle()
    };

    let rising = MotionSnapshot {
        velocity: Vec2::new(0.0, 500.0),
        gravity_state: GravityState::JumpHold,
        ..base
    };
    assert_eq!(classify(&rising), PlatformerStateType::Jump);

    let apex_up = MotionSnapshot {
        velocity: Vec2::new(0.0, 10.0),
        gravity_state: GravityState::Apex,
        ..base
    };
    assert_eq!(classify(&apex_up), PlatformerStateType::Jump);

    let falling = MotionSnapshot {
        velocity: Vec2::new(0.0, -300.0),
        gravity_state: GravityState::Falling,
        ..base
    };
    assert_eq!(classify(&falling), PlatformerStateType::Fall);

    let sliding = MotionSnapshot {
        is_wall_sliding: true,
        is_wall_detected: true,
        ..falling
    };
    assert_eq!(classify(&sliding), PlatformerStateType::WallSlide);
}

#[test]
fn test_classify_priorities() {
    let dashing = MotionSnapshot {
        is_dashing: true,
        gravity_state: GravityState::Dashing,
        is_grounded: false,
        ..grounded_idle()
    };
    assert_eq!(classify(&dashing), PlatformerStateType::Dash);

    let knocked = MotionSnapshot {
        is_knocked_back: true,
        ..dashing
    };
    assert_eq!(classify(&knocked), PlatformerStateType::Hit);

    let dead = MotionSnapshot {
        gameplay_lock: GameplayLock::Death,
        ..knocked
    };
    assert_eq!(classify(&dead), PlatformerStateType::Death);
    assert!(!PlatformerStateType::Death.is_controllable());
}

#[test]
fn test_classify_live_controller() {
    let mut controller =
        CharacterMotionController::new(PhysicsConfiguration::default(), MovementConfiguration::default());
    let input = MotionInput::default();
    controller.tick(0.01, &input, &Floor);
    controller.tick(0.01, &input, &Floor);
    assert_eq!(classify(&controller.snapshot()), PlatformerStateType::Idle);

    assert!(controller.jump());
    assert_eq!(classify(&controller.snapshot()), PlatformerStateType::Jump);

    controller.set_gameplay_lock(GameplayLock::Hit);
    assert_eq!(classify(&controller.snapshot()), PlatformerStateType::Hit);
}

#[test]
fn test_state_transition_tracks_previous() {
    let mut state = PlatformerState::default();
    assert!(!state.transition(PlatformerStateType::Idle));

    assert!(state.transition(PlatformerStateType::Run));
    assert!(state.transition(PlatformerStateType::Jump));
    assert_eq!(state.previous, PlatformerStateType::Run);
    assert_eq!(state.current, PlatformerStateType::Jump);
}

// -----------------------------------------------------------------------------
// Animation lookup
// -----------------------------------------------------------------------------

#[test]
fn test_animation_lookup_falls_back_to_idle() {
    let animations = StateAnimations::new()
        .with(PlatformerStateType::Idle, "idle")
        .with(PlatformerStateType::Run, "run");

    assert_eq!(animations.clip(PlatformerStateType::Run), Some(&"run"));
    assert_eq!(animations.clip(PlatformerStateType::Dash), Some(&"idle"));
    assert!(!animations.has_clip(PlatformerStateType::Dash));
    assert_eq!(animations.missing().len(), 6);
}

#[test]
fn test_animation_lookup_empty_table() {
    let mut animations: StateAnimations<u32> = StateAnimations::default();
    assert_eq!(animations.clip(PlatformerStateType::Fall), None);

    assert_eq!(animations.insert(PlatformerStateType::Fall, 3), None);
    assert_eq!(animations.insert(PlatformerStateType::Fall, 4), Some(3));
    assert_eq!(animations.clip(PlatformerStateType::Fall), Some(&4));
    assert_eq!(animations.remove(PlatformerStateType::Fall), Some(4));
}

#[test]
fn test_default_tints_cover_every_state() {
    let tints = super::StateTints::default();
    assert!(tints.missing().is_empty());
}
