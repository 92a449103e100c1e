//! Sticky event store.
//!
//! Posted events stay here until they are unstuck or consumed, so adapters
//! registered later can still observe them. The store is kept in arrival
//! order, or sorted by the registry comparator when one is configured.

use crate::ordering::{Comparator, binary_insert};
use razor_core::{Adapter, PostedEvent, Validators};

/// The stored events of one registry.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<PostedEvent>,
}

impl EventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing events, keeping their order.
    pub fn from_events(events: Vec<PostedEvent>) -> Self {
        Self { events }
    }

    /// Store an event, returning its position.
    pub fn insert(&mut self, event: PostedEvent, comparator: Option<&Comparator>) -> usize {
        match comparator {
            Some(compare) => binary_insert(&mut self.events, event, Some(&**compare)),
            None => binary_insert(&mut self.events, event, None),
        }
    }

    /// The stored events in store order.
    pub fn as_slice(&self) -> &[PostedEvent] {
        &self.events
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove every event whose arguments satisfy `predicate`.
    ///
    /// Returns how many events were removed.
    pub fn remove_matching(&mut self, predicate: &Validators) -> usize {
        let before = self.events.len();
        self.events.retain(|event| !predicate.validates(&event.args));
        before - self.events.len()
    }

    /// Replay the store against a newly registered adapter.
    ///
    /// Walks the events in store order and returns those the adapter accepts,
    /// spending one of the adapter's invocations per event and stopping once
    /// it is exhausted. A consuming adapter takes the events it accepts out
    /// of the store.
    pub fn replay(&mut self, adapter: &mut Adapter) -> Vec<PostedEvent> {
        let matched: Vec<usize> = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, event)| adapter.score(&event.args).is_some())
            .map(|(position, _)| position)
            .collect();

        let mut replayed = Vec::with_capacity(matched.len());
        let mut taken = Vec::new();
        for position in matched {
            if adapter.is_exhausted() {
                break;
            }
            adapter.countdown();
            replayed.push(self.events[position].clone());
            if adapter.consumes() {
                taken.push(position);
            }
        }

        if !taken.is_empty() {
            let mut position = 0;
            self.events.retain(|_| {
                let keep = !taken.contains(&position);
                position += 1;
                keep
            });
        }
        replayed
    }
}
