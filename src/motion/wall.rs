//! Motion domain: direction-aware wall probing with one-tick memory.

use bevy::prelude::*;

use super::probe::{ContactProbe, SnapType};
use crate::config::PhysicsConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn dir(self) -> Dir2 {
        match self {
            Facing::Right => Dir2::X,
            Facing::Left => Dir2::NEG_X,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Facing for a horizontal value, `None` inside the deadzone.
    pub fn from_axis(x: f32, deadzone: f32) -> Option<Self> {
        if x > deadzone {
            Some(Facing::Right)
        } else if x < -deadzone {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

impl WallSide {
    pub fn from_facing(facing: Facing) -> Self {
        match facing {
            Facing::Right => WallSide::Right,
            Facing::Left => WallSide::Left,
        }
    }

    /// Unit x pointing from the body toward the wall, 0 for `None`.
    pub fn toward(self) -> f32 {
        match self {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
            WallSide::None => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct WallDetectionResult {
    pub detected: bool,
    pub side: WallSide,
    pub normal: Vec2,
    pub distance: f32,
}

impl WallDetectionResult {
    pub const NONE: Self = Self {
        detected: false,
        side: WallSide::None,
        normal: Vec2::ZERO,
        distance: f32::INFINITY,
    };
}

impl Default for WallDetectionResult {
    fn default() -> Self {
        Self::NONE
    }
}

type DirectionProvider = Box<dyn Fn() -> Facing + Send + Sync>;

pub struct WallDetector {
    direction_provider: Option<DirectionProvider>,
    /// Used when no provider is installed
    facing: Facing,
    probe_distance: f32,
    probe_offset: f32,
    half_width: f32,
    current: WallDetectionResult,
    previous_side: WallSide,
    was_detected_last_frame: bool,
    forced: Option<bool>,
}

impl std::fmt::Debug for WallDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WallDetector")
            .field("has_direction_provider", &self.direction_provider.is_some())
            .field("facing", &self.facing)
            .field("current", &self.current)
            .field("was_detected_last_frame", &self.was_detected_last_frame)
            .field("forced", &self.forced)
            .finish()
    }
}

impl WallDetector {
    pub fn new(physics: &PhysicsConfiguration) -> Self {
        Self {
            direction_provider: None,
            facing: Facing::default(),
            probe_distance: physics.wall_probe_distance,
            probe_offset: physics.wall_probe_offset,
            half_width: physics.body_half_width,
            current: WallDetectionResult::NONE,
            previous_side: WallSide::None,
            was_detected_last_frame: false,
            forced: None,
        }
    }

    pub fn set_direction_provider(&mut self, provider: impl Fn() -> Facing + Send + Sync + 'static) {
        self.direction_provider = Some(Box::new(provider));
    }

    pub fn clear_direction_provider(&mut self) {
        self.direction_provider = None;
    }

    /// Facing used when no provider is installed.
    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub fn facing(&self) -> Facing {
        match &self.direction_provider {
            Some(provider) => provider(),
            None => self.facing,
        }
    }

    /// Natural probe along the current facing. Clears any forced state.
    pub fn check_wall_state(&mut self, body: &impl ContactProbe) -> WallDetectionResult {
        self.was_detected_last_frame = self.is_wall_detected();
        self.previous_side = self.wall_side();
        self.forced = None;

        let origin = self.probe_origin(body);
        let reach = self.half_width + self.probe_distance;
        self.current = self.check_at_position(body, origin, self.facing().dir(), reach);
        self.current
    }

    /// Explicit probe from `origin`; does not touch the detector's state.
    pub fn check_at_position(
        &self,
        body: &impl ContactProbe,
        origin: Vec2,
        direction: Dir2,
        distance: f32,
    ) -> WallDetectionResult {
        match body.cast(origin, direction, distance) {
            Some(hit) if hit.snap == SnapType::Wall && hit.distance <= distance => {
                WallDetectionResult {
                    detected: true,
                    side: if direction.x < 0.0 {
                        WallSide::Left
                    } else {
                        WallSide::Right
                    },
                    normal: hit.normal,
                    distance: hit.distance,
                }
            }
            _ => WallDetectionResult::NONE,
        }
    }

    /// Probe left and right; the nearer wall wins, facing breaks ties.
    pub fn check_both_sides(
        &self,
        body: &impl ContactProbe,
        origin: Vec2,
        distance: f32,
    ) -> WallDetectionResult {
        let left = self.check_at_position(body, origin, Dir2::NEG_X, distance);
        let right = self.check_at_position(body, origin, Dir2::X, distance);

        match (left.detected, right.detected) {
            (true, false) => left,
            (false, true) => right,
            (true, true) => {
                if left.distance < right.distance {
                    left
                } else if right.distance < left.distance {
                    right
                } else if self.facing() == Facing::Left {
                    left
                } else {
                    right
                }
            }
            (false, false) => WallDetectionResult::NONE,
        }
    }

    /// Both-sides probe from the body, reaching as far as a natural probe.
    pub fn check_around(&self, body: &impl ContactProbe) -> WallDetectionResult {
        let origin = self.probe_origin(body);
        self.check_both_sides(body, origin, self.half_width + self.probe_distance)
    }

    /// Override detection until the next natural probe.
    pub fn force_wall_state(&mut self, detected: bool) {
        self.forced = Some(detected);
    }

    pub fn is_forced(&self) -> bool {
        self.forced.is_some()
    }

    pub fn is_wall_detected(&self) -> bool {
        self.forced.unwrap_or(self.current.detected)
    }

    pub fn was_wall_detected_last_frame(&self) -> bool {
        self.was_detected_last_frame
    }

    /// Side reported before the latest natural probe.
    pub fn previous_side(&self) -> WallSide {
        self.previous_side
    }

    pub fn wall_side(&self) -> WallSide {
        match self.forced {
            Some(false) => WallSide::None,
            Some(true) if !self.current.detected => WallSide::from_facing(self.facing()),
            _ => self.current.side,
        }
    }

    pub fn wall_normal(&self) -> Vec2 {
        match self.forced {
            Some(false) => Vec2::ZERO,
            Some(true) if !self.current.detected => Vec2::new(-self.facing().sign(), 0.0),
            _ => self.current.normal,
        }
    }

    pub fn result(&self) -> WallDetectionResult {
        WallDetectionResult {
            detected: self.is_wall_detected(),
            side: self.wall_side(),
            normal: self.wall_normal(),
            distance: self.current.distance,
        }
    }

    fn probe_origin(&self, body: &impl ContactProbe) -> Vec2 {
        body.position() + Vec2::new(0.0, self.probe_offset)
    }
}
