//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::motion::MotionInput;
use crate::movement::Player;

/// Sample the keyboard every frame into the player's input. Press pulses are
/// OR-ed in so a press between two fixed ticks is not lost; the fixed tick
/// clears them.
pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<&mut MotionInput, With<Player>>,
) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (aims dashes)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    let axis = Vec2::new(x, y).normalize_or_zero();
    let jump_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    let jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    let dash_pressed =
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ);

    for mut input in &mut players {
        input.axis = axis;
        input.jump_pressed |= jump_pressed;
        input.jump_held = jump_held;
        input.dash_pressed |= dash_pressed;
    }
}
