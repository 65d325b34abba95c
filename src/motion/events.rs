//! Motion domain: edge notifications and change-guarded publication.

use std::collections::VecDeque;

use super::actions::{JumpKind, SpecialAction};
use super::gravity::GravityState;
use super::shaper::MovementState;
use super::wall::WallSide;

/// Edge notification raised by the controller. Each carries at most one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionEvent {
    GroundEntered,
    GroundExited,
    WallEntered(WallSide),
    WallExited(WallSide),
    /// Downward speed at the moment of touching ground
    Landed(f32),
    JumpStarted(JumpKind),
    SpecialActionStarted(SpecialAction),
    SpecialActionEnded(SpecialAction),
    GravityStateChanged(GravityState),
    MovementStateChanged(MovementState),
}

pub type SubscriptionId = u64;

/// Events kept for polling between drains; older ones are dropped first.
pub const MAX_PENDING_EVENTS: usize = 256;

type Subscriber = Box<dyn FnMut(&MotionEvent) + Send + Sync>;

/// Fans events out to subscribers and keeps them for polling.
///
/// Subscribers must be detached with [`MotionEventHub::unsubscribe`] (or
/// [`MotionEventHub::clear_subscribers`]) before whatever they capture is
/// dropped. Subscribers see every event; the polling queue keeps only the
/// newest [`MAX_PENDING_EVENTS`].
#[derive(Default)]
pub struct MotionEventHub {
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    pending: VecDeque<MotionEvent>,
}

impl std::fmt::Debug for MotionEventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionEventHub")
            .field("subscribers", &self.subscribers.len())
            .field("pending", &self.pending)
            .finish()
    }
}

impl MotionEventHub {
    pub fn subscribe(&mut self, subscriber: impl FnMut(&MotionEvent) + Send + Sync + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn emit(&mut self, event: MotionEvent) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&event);
        }
        if self.pending.len() == MAX_PENDING_EVENTS {
            self.pending.pop_front();
        }
        self.pending.push_back(event);
    }

    pub fn pending(&self) -> impl Iterator<Item = &MotionEvent> {
        self.pending.iter()
    }

    /// Take every event still queued since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<MotionEvent> {
        self.pending.drain(..).collect()
    }
}

/// Last published value of some state; `publish` reports only real changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Watched<T: PartialEq + Copy> {
    value: T,
}

impl<T: PartialEq + Copy> Watched<T> {
    pub fn get(&self) -> T {
        self.value
    }

    /// Store `value`, returning it only when it differs from the previous one.
    pub fn publish(&mut self, value: T) -> Option<T> {
        if self.value == value {
            return None;
        }
        self.value = value;
        Some(value)
    }
}
