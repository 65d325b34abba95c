//! Gameplay domain: discrete character states on top of the motion engine.

mod animations;
mod state;

#[cfg(test)]
mod tests;

pub use animations::StateAnimations;
pub use state::{PlatformerState, PlatformerStateType, classify};

use bevy::prelude::*;

use crate::motion::CharacterMotionController;
use crate::movement::MotionSet;

/// Placeholder art: one sprite tint per gameplay state.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct StateTints(pub StateAnimations<Color>);

impl Default for StateTints {
    fn default() -> Self {
        Self(
            StateAnimations::new()
                .with(PlatformerStateType::Idle, Color::srgb(0.9, 0.9, 0.9))
                .with(PlatformerStateType::Run, Color::srgb(0.85, 0.95, 0.85))
                .with(PlatformerStateType::Jump, Color::srgb(0.85, 0.85, 0.95))
                .with(PlatformerStateType::Fall, Color::srgb(0.7, 0.7, 0.9))
                .with(PlatformerStateType::WallSlide, Color::srgb(0.95, 0.93, 0.8))
                .with(PlatformerStateType::Dash, Color::srgb(0.6, 0.95, 0.95))
                .with(PlatformerStateType::Hit, Color::srgb(0.95, 0.5, 0.5))
                .with(PlatformerStateType::Death, Color::srgb(0.4, 0.4, 0.4)),
        )
    }
}

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StateTints>()
            .register_type::<PlatformerState>()
            .add_systems(FixedUpdate, update_platformer_state.in_set(MotionSet::Publish))
            .add_systems(Update, tint_by_state);
    }
}

pub(crate) fn update_platformer_state(
    mut query: Query<(Entity, &CharacterMotionController, &mut PlatformerState)>,
) {
    for (entity, controller, mut state) in &mut query {
        let next = classify(&controller.snapshot());
        // Read before writing so unchanged states stay out of `Changed`
        if state.current != next && state.transition(next) {
            debug!("{:?} state: {:?} -> {:?}", entity, state.previous, state.current);
        }
    }
}

fn tint_by_state(
    tints: Res<StateTints>,
    mut query: Query<(&PlatformerState, &mut Sprite), Changed<PlatformerState>>,
) {
    for (state, mut sprite) in &mut query {
        if let Some(color) = tints.clip(state.current) {
            sprite.color = *color;
        }
    }
}
