//! Movement domain: ground and wall probes over the avian2d spatial query.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::{ContactProbe, ProbeHit, SnapType};
use crate::movement::GameLayer;

/// Contact probe for one character, backed by ray casts against the
/// `Ground` and `Wall` layers. The character's own collider is excluded.
pub(crate) struct SpatialProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    position: Vec2,
    ground_filter: SpatialQueryFilter,
    wall_filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> SpatialProbe<'a, 'w, 's> {
    pub(crate) fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        entity: Entity,
        position: Vec2,
    ) -> Self {
        Self {
            spatial_query,
            position,
            ground_filter: SpatialQueryFilter::from_mask(GameLayer::Ground)
                .with_excluded_entities([entity]),
            wall_filter: SpatialQueryFilter::from_mask(GameLayer::Wall)
                .with_excluded_entities([entity]),
        }
    }

    fn cast_layer(
        &self,
        origin: Vec2,
        direction: Dir2,
        distance: f32,
        filter: &SpatialQueryFilter,
        snap: SnapType,
    ) -> Option<ProbeHit> {
        self.spatial_query
            .cast_ray(origin, direction, distance, true, filter)
            .map(|hit| ProbeHit {
                distance: hit.distance,
                normal: hit.normal,
                snap,
            })
    }
}

impl ContactProbe for SpatialProbe<'_, '_, '_> {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn cast(&self, origin: Vec2, direction: Dir2, distance: f32) -> Option<ProbeHit> {
        let ground = self.cast_layer(origin, direction, distance, &self.ground_filter, SnapType::Ground);
        let wall = self.cast_layer(origin, direction, distance, &self.wall_filter, SnapType::Wall);

        // Nearest surface wins; on a tie prefer the one matching the cast axis
        match (ground, wall) {
            (Some(g), Some(w)) if g.distance < w.distance => Some(g),
            (Some(g), Some(w)) if w.distance < g.distance => Some(w),
            (Some(g), Some(w)) => {
                if direction.y.abs() > direction.x.abs() {
                    Some(g)
                } else {
                    Some(w)
                }
            }
            (g, w) => g.or(w),
        }
    }
}
