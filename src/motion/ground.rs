//! Motion domain: grounded tracking with one-tick history.

use bevy::prelude::*;

use super::probe::{ContactProbe, ProbeHit, SnapType};
use crate::config::PhysicsConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum GroundEdge {
    Entered,
    Exited,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct GroundContactTracker {
    grounded: bool,
    was_grounded_last_frame: bool,
    snap: SnapType,
}

impl GroundContactTracker {
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Grounded flag as it was before the latest `update`.
    pub fn was_grounded_last_frame(&self) -> bool {
        self.was_grounded_last_frame
    }

    pub fn snap_type(&self) -> SnapType {
        self.snap
    }

    /// Feed this tick's probe result. Returns the edge when the flag flips.
    pub fn update(&mut self, probe: bool) -> Option<GroundEdge> {
        self.was_grounded_last_frame = self.grounded;
        let edge = match (self.grounded, probe) {
            (false, true) => Some(GroundEdge::Entered),
            (true, false) => Some(GroundEdge::Exited),
            _ => None,
        };
        self.grounded = probe;
        if !probe && self.snap == SnapType::Ground {
            self.snap = SnapType::None;
        }
        edge
    }

    /// Like `update`, also recording what the probe touched.
    pub fn update_from_hit(&mut self, hit: Option<ProbeHit>, accept: bool) -> Option<GroundEdge> {
        self.snap = hit.map_or(SnapType::None, |h| h.snap);
        let grounded = accept && self.snap == SnapType::Ground;
        self.update(grounded)
    }

    /// Leave the ground immediately (jump, upward knockback).
    /// Returns `Exited` when the body was grounded.
    pub fn force_airborne(&mut self) -> Option<GroundEdge> {
        if !self.grounded {
            return None;
        }
        self.grounded = false;
        self.snap = SnapType::None;
        Some(GroundEdge::Exited)
    }
}

/// Cast downward from the feet of the body.
pub fn probe_ground(body: &impl ContactProbe, physics: &PhysicsConfiguration) -> Option<ProbeHit> {
    let feet = body.position() - Vec2::new(0.0, physics.body_half_height);
    body.cast(feet, Dir2::NEG_Y, physics.ground_probe_distance)
}
