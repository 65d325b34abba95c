//! Movement domain: player bootstrap from the loaded motion tuning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::config::{MovementConfiguration, PhysicsConfiguration};
use crate::gameplay::PlatformerState;
use crate::motion::{CharacterMotionController, MotionInput};
use crate::movement::{GameLayer, Player};

/// Spawn the player with a motion controller built from the tuning resources.
pub(crate) fn spawn_player(
    mut commands: Commands,
    physics: Option<Res<PhysicsConfiguration>>,
    movement: Option<Res<MovementConfiguration>>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let (physics, movement) = match (physics, movement) {
        (Some(physics), Some(movement)) => (physics.clone(), movement.clone()),
        _ => {
            warn!("Motion tuning not available, using default player tuning");
            (PhysicsConfiguration::default(), MovementConfiguration::default())
        }
    };

    let size = physics.body_half_extents() * 2.0;
    info!(
        "Spawning player: size={}x{}, run_speed={}, jump_power={}, air_jumps={}",
        size.x, size.y, movement.run_speed, movement.jump_power, movement.max_air_jumps
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            CharacterMotionController::new(physics, movement),
            MotionInput::default(),
            PlatformerState::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(0.0, 100.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // The motion controller owns gravity
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}
