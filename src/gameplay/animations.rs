//! Gameplay domain: per-state animation lookup.

use std::collections::HashMap;

use super::state::PlatformerStateType;

/// Maps each gameplay state to a clip handle of any type (sprite atlas
/// range, animation graph node, colour for placeholder art).
///
/// States without a clip fall back to the `Idle` clip.
#[derive(Debug, Clone, PartialEq)]
pub struct StateAnimations<C> {
    clips: HashMap<PlatformerStateType, C>,
}

impl<C> Default for StateAnimations<C> {
    fn default() -> Self {
        Self {
            clips: HashMap::new(),
        }
    }
}

impl<C> StateAnimations<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, state: PlatformerStateType, clip: C) -> Self {
        self.insert(state, clip);
        self
    }

    /// Returns the clip previously stored for `state`.
    pub fn insert(&mut self, state: PlatformerStateType, clip: C) -> Option<C> {
        self.clips.insert(state, clip)
    }

    pub fn remove(&mut self, state: PlatformerStateType) -> Option<C> {
        self.clips.remove(&state)
    }

    /// Clip for `state`, or the `Idle` clip when none is registered.
    pub fn clip(&self, state: PlatformerStateType) -> Option<&C> {
        self.clips
            .get(&state)
            .or_else(|| self.clips.get(&PlatformerStateType::Idle))
    }

    pub fn has_clip(&self, state: PlatformerStateType) -> bool {
        self.clips.contains_key(&state)
    }

    /// States that would fall back to `Idle`.
    pub fn missing(&self) -> Vec<PlatformerStateType> {
        PlatformerStateType::ALL
            .into_iter()
            .filter(|state| !self.clips.contains_key(state))
            .collect()
    }
}
