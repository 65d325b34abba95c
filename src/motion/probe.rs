//! Motion domain: the physics-body boundary used for contact probes.

use bevy::prelude::*;

/// What kind of surface a probe touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SnapType {
    #[default]
    None,
    Ground,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ProbeHit {
    pub distance: f32,
    /// Surface normal, pointing away from the surface
    pub normal: Vec2,
    pub snap: SnapType,
}

/// Read-only view of the physics body the controller is bound to.
pub trait ContactProbe {
    /// Center of the body in world space.
    fn position(&self) -> Vec2;

    /// Cast a short ray and report the nearest ground- or wall-tagged surface
    /// within `distance`.
    fn cast(&self, origin: Vec2, direction: Dir2, distance: f32) -> Option<ProbeHit>;
}

impl<T: ContactProbe + ?Sized> ContactProbe for &T {
    fn position(&self) -> Vec2 {
        (**self).position()
    }

    fn cast(&self, origin: Vec2, direction: Dir2, distance: f32) -> Option<ProbeHit> {
        (**self).cast(origin, direction, distance)
    }
}
