//! Movement domain: bridge systems run in a headless app.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::systems::{apply_gameplay_lock_requests, apply_knockback_requests, read_input};
use super::{GameplayLockRequest, KnockbackRequest, Player};
use crate::config::{MovementConfiguration, PhysicsConfiguration};
use crate::motion::{CharacterMotionController, GameplayLock, MotionInput};

fn input_app() -> (App, Entity) {
    let mut app = App::new();
    app.init_resource::<ButtonInput<KeyCode>>()
        .add_systems(Update, read_input);
    let player = app.world_mut().spawn((Player, MotionInput::default())).id();
    (app, player)
}

fn input_of(app: &App, entity: Entity) -> MotionInput {
    *app.world().get::<MotionInput>(entity).unwrap()
}

fn request_app() -> App {
    let mut app = App::new();
    app.add_message::<KnockbackRequest>()
        .add_message::<GameplayLockRequest>()
        .add_systems(
            Update,
            (apply_knockback_requests, apply_gameplay_lock_requests).chain(),
        );
    app
}

fn spawn_character(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            CharacterMotionController::new(
                PhysicsConfiguration::default(),
                MovementConfiguration::default(),
            ),
            LinearVelocity::default(),
        ))
        .id()
}

// -----------------------------------------------------------------------------
// Input sampling
// -----------------------------------------------------------------------------

#[test]
fn test_read_input_keeps_press_until_cleared() {
    let (mut app, player) = input_app();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Space);
    app.update();

    // Next frame: still held, no longer just pressed
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
    app.update();

    let input = input_of(&app, player);
    assert!(input.jump_pressed);
    assert!(input.jump_held);

    app.world_mut()
        .get_mut::<MotionInput>(player)
        .unwrap()
        .clear_pulses();
    app.update();
    let input = input_of(&app, player);
    assert!(!input.jump_pressed);
    assert!(input.jump_held);
}

#[test]
fn test_read_input_normalizes_diagonals() {
    let (mut app, player) = input_app();
    {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.press(KeyCode::KeyD);
        keyboard.press(KeyCode::KeyW);
    }
    app.update();

    let axis = input_of(&app, player).axis;
    assert!((axis.length() - 1.0).abs() < 1e-5);
    assert!(axis.x > 0.0 && axis.y > 0.0);
}

#[test]
fn test_read_input_only_drives_the_player() {
    let (mut app, player) = input_app();
    let other = app.world_mut().spawn(MotionInput::default()).id();
    {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.press(KeyCode::KeyD);
        keyboard.press(KeyCode::Space);
    }
    app.update();

    assert_eq!(input_of(&app, player).axis, Vec2::X);
    assert!(input_of(&app, player).jump_pressed);
    assert_eq!(input_of(&app, other), MotionInput::default());
}

// -----------------------------------------------------------------------------
// Requests from other domains
// -----------------------------------------------------------------------------

#[test]
fn test_knockback_request_writes_body_velocity() {
    let mut app = request_app();
    let entity = spawn_character(&mut app);

    app.world_mut().write_message(KnockbackRequest {
        target: entity,
        direction: Vec2::NEG_X,
        force: 400.0,
    });
    app.update();

    let velocity = app.world().get::<LinearVelocity>(entity).unwrap();
    assert_eq!(velocity.0, Vec2::new(-400.0, 0.0));
    let controller = app.world().get::<CharacterMotionController>(entity).unwrap();
    assert!(controller.is_knocked_back());
}

#[test]
fn test_zero_knockback_request_leaves_body_alone() {
    let mut app = request_app();
    let entity = spawn_character(&mut app);
    app.world_mut().get_mut::<LinearVelocity>(entity).unwrap().0 = Vec2::new(50.0, 0.0);

    app.world_mut().write_message(KnockbackRequest {
        target: entity,
        direction: Vec2::ZERO,
        force: 400.0,
    });
    app.update();

    let velocity = app.world().get::<LinearVelocity>(entity).unwrap();
    assert_eq!(velocity.0, Vec2::new(50.0, 0.0));
}

#[test]
fn test_gameplay_lock_request() {
    let mut app = request_app();
    let entity = spawn_character(&mut app);

    app.world_mut().write_message(GameplayLockRequest {
        target: entity,
        lock: GameplayLock::Death,
    });
    app.update();

    let controller = app.world().get::<CharacterMotionController>(entity).unwrap();
    assert_eq!(controller.gameplay_lock(), GameplayLock::Death);
}
