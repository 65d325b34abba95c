//! Movement domain: fixed-tick systems driving the motion controllers.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::collisions::SpatialProbe;
use crate::motion::{CharacterMotionController, Facing, MotionInput, VelocityRequest};
use crate::movement::{GameplayLockRequest, KnockbackRequest, MotionMessage};

pub(crate) fn apply_knockback_requests(
    mut requests: MessageReader<KnockbackRequest>,
    mut query: Query<(&mut CharacterMotionController, &mut LinearVelocity)>,
) {
    for request in requests.read() {
        let Ok((mut controller, mut velocity)) = query.get_mut(request.target) else {
            warn!("Knockback requested for {:?} which has no motion controller", request.target);
            continue;
        };

        // Start from what the solver left on the body
        controller.request_velocity(VelocityRequest::set(velocity.0));
        if controller.knockback(request.direction, request.force) {
            velocity.0 = controller.velocity();
        }
    }
}

pub(crate) fn apply_gameplay_lock_requests(
    mut requests: MessageReader<GameplayLockRequest>,
    mut query: Query<&mut CharacterMotionController>,
) {
    for request in requests.read() {
        let Ok(mut controller) = query.get_mut(request.target) else {
            continue;
        };
        if controller.gameplay_lock() != request.lock {
            info!("Gameplay lock for {:?}: {:?}", request.target, request.lock);
            controller.set_gameplay_lock(request.lock);
        }
    }
}

/// One controller tick per character: read back the solved velocity, tick
/// with that character's own input, write the result and forward the raised
/// events. Characters without [`MotionInput`] tick idle.
pub(crate) fn tick_motion(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut query: Query<(
        Entity,
        &Transform,
        &mut CharacterMotionController,
        &mut LinearVelocity,
        Option<&mut MotionInput>,
    )>,
    mut motion_messages: MessageWriter<MotionMessage>,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut controller, mut velocity, input) in &mut query {
        // Collisions resolved by the solver (landing, wall hits) show up here
        controller.request_velocity(VelocityRequest::set(velocity.0));

        let probe = SpatialProbe::new(&spatial_query, entity, transform.translation.truncate());
        let snapshot = match input {
            Some(mut input) => {
                let snapshot = controller.tick(dt, &input, &probe);
                input.clear_pulses();
                snapshot
            }
            None => controller.tick(dt, &MotionInput::default(), &probe),
        };
        velocity.0 = snapshot.velocity;

        for event in controller.drain_events() {
            motion_messages.write(MotionMessage { entity, event });
        }
    }
}

pub(crate) fn sync_facing(mut query: Query<(&CharacterMotionController, &mut Sprite)>) {
    for (controller, mut sprite) in &mut query {
        let flip = controller.facing() == Facing::Left;
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }
}

/// Debug trace of what the controllers raised this frame.
pub(crate) fn log_motion_messages(mut motion_messages: MessageReader<MotionMessage>) {
    for message in motion_messages.read() {
        debug!("Motion {:?}: {:?}", message.entity, message.event);
    }
}
