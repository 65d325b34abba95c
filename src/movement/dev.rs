//! Movement domain: debug-only sandbox room and hit triggers.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::motion::{CharacterMotionController, GameplayLock};
use crate::movement::{GameLayer, GameplayLockRequest, Ground, KnockbackRequest, Player, Wall};

const DEV_KNOCKBACK_FORCE: f32 = 550.0;

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    let blocks = [
        // Floor
        (Vec2::new(0.0, -200.0), Vec2::new(800.0, 40.0), true),
        // Outer walls
        (Vec2::new(-420.0, 50.0), Vec2::new(40.0, 500.0), false),
        (Vec2::new(420.0, 50.0), Vec2::new(40.0, 500.0), false),
        // Platforms, rising toward the middle
        (Vec2::new(-250.0, -50.0), Vec2::new(150.0, 20.0), true),
        (Vec2::new(250.0, 50.0), Vec2::new(150.0, 20.0), true),
        (Vec2::new(0.0, 150.0), Vec2::new(120.0, 20.0), true),
        // Pillar for wall jumping practice
        (Vec2::new(-100.0, -80.0), Vec2::new(30.0, 200.0), false),
    ];

    for (position, size, is_ground) in blocks {
        let mut block = commands.spawn((
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        ));
        if is_ground {
            let color = if size.x >= 800.0 {
                ground_color
            } else {
                platform_color
            };
            block.insert((
                Ground,
                ground_layers,
                Sprite {
                    color,
                    custom_size: Some(size),
                    ..default()
                },
            ));
        } else {
            block.insert((
                Wall,
                wall_layers,
                Sprite {
                    color: wall_color,
                    custom_size: Some(size),
                    ..default()
                },
            ));
        }
    }

    info!("Sandbox room spawned with {} blocks", blocks.len());
}

/// H knocks the player back from the direction they face; X toggles Death.
pub(crate) fn dev_hit_on_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<(Entity, &CharacterMotionController), With<Player>>,
    mut knockbacks: MessageWriter<KnockbackRequest>,
    mut locks: MessageWriter<GameplayLockRequest>,
) {
    for (entity, controller) in &query {
        if keyboard.just_pressed(KeyCode::KeyH) {
            let away = -controller.facing().sign();
            knockbacks.write(KnockbackRequest {
                target: entity,
                direction: Vec2::new(away, 1.0),
                force: DEV_KNOCKBACK_FORCE,
            });
        }
        if keyboard.just_pressed(KeyCode::KeyX) {
            let lock = match controller.gameplay_lock() {
                GameplayLock::Death => GameplayLock::None,
                _ => GameplayLock::Death,
            };
            locks.write(GameplayLockRequest {
                target: entity,
                lock,
            });
        }
    }
}
