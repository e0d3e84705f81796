//! Append-only health timeline, newest insert first.

use crate::errors::{AppError, AppResult};
use crate::models::{EventKind, TimelineEvent};
use crate::storage::{KeyValueStore, TIMELINE_KEY, read_json, write_json};

/// In-memory event list mirrored to one storage key.
///
/// Order is insertion order (most recent insert first), not timestamp order.
/// There is no retention policy: the stored list grows without bound.
pub struct TimelineLog<S: KeyValueStore> {
    store: S,
    events: Vec<TimelineEvent>,
}

impl<S: KeyValueStore> TimelineLog<S> {
    /// Empty log; call [`TimelineLog::load_events`] to pick up persisted data.
    pub fn new(store: S) -> Self {
        Self {
            store,
            events: Vec::new(),
        }
    }

    /// Replace the in-memory list with what storage holds.
    ///
    /// Nothing stored, unreadable storage and malformed data all leave an empty log.
    pub fn load_events(&mut self) {
        self.events = read_json(&self.store, TIMELINE_KEY).unwrap_or_default();
        tracing::debug!(count = self.events.len(), "Timeline loaded");
    }

    /// Prepend `event` and persist the whole list.
    ///
    /// A failed write is logged; the event stays visible in memory.
    pub fn add_event(&mut self, event: TimelineEvent) -> AppResult<()> {
        if self.contains(&event.id) {
            return Err(AppError::DuplicateEvent(event.id));
        }

        self.events.insert(0, event);
        self.persist();
        Ok(())
    }

    /// First `limit` events in insertion order.
    pub fn get_recent_events(&self, limit: usize) -> Vec<TimelineEvent> {
        self.events.iter().take(limit).cloned().collect()
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn events_of_kind(&self, kind: EventKind) -> Vec<TimelineEvent> {
        self.events
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.events.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn persist(&mut self) {
        write_json(&mut self.store, TIMELINE_KEY, &self.events);
    }
}
