//! Last-request-wins bookkeeping for concurrent advice calls.
//!
//! Each key (typically caller + defect id) has a latest generation number.
//! A call takes a ticket when it starts; when it finishes, a ticket that is no
//! longer the latest means a newer call superseded it and its result should
//! be dropped.
//!
//! Tickets clear their key when dropped, so a call abandoned mid-flight
//! (client disconnect, caller timeout) leaves nothing behind.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::debug;

/// Proof that a call started at a given generation for a key.
///
/// Settles itself on drop if [`GenerationTicket::finish`] was never called.
#[derive(Debug)]
pub struct GenerationTicket<'a> {
    tracker: &'a GenerationTracker,
    key: String,
    generation: u64,
    settled: bool,
}

impl GenerationTicket<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True if no newer ticket was issued for the same key.
    pub fn is_current(&self) -> bool {
        self.tracker.state().latest.get(&self.key) == Some(&self.generation)
    }

    /// Completes the ticket; returns whether it was still current.
    pub fn finish(mut self) -> bool {
        self.settled = true;
        self.tracker.settle(&self.key, self.generation)
    }
}

impl Drop for GenerationTicket<'_> {
    fn drop(&mut self) {
        if !self.settled && self.tracker.settle(&self.key, self.generation) {
            debug!(
                key = %self.key,
                generation = self.generation,
                "abandoned ticket cleared"
            );
        }
    }
}

#[derive(Debug, Default)]
pub struct GenerationTracker {
    state: Mutex<TrackerState>,
}

#[derive(Debug, Default)]
struct TrackerState {
    /// Last issued generation, shared by all keys.
    issued: u64,
    latest: HashMap<String, u64>,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation for `key`, superseding any in-flight ticket.
    pub fn begin(&self, key: impl Into<String>) -> GenerationTicket<'_> {
        let key = key.into();
        let mut state = self.state();
        state.issued += 1;
        let generation = state.issued;
        state.latest.insert(key.clone(), generation);
        GenerationTicket {
            tracker: self,
            key,
            generation,
            settled: false,
        }
    }

    /// Number of keys with work in flight.
    pub fn in_flight(&self) -> usize {
        self.state().latest.len()
    }

    /// Clears `key` if `generation` is still its latest; returns whether it was.
    fn settle(&self, key: &str, generation: u64) -> bool {
        let mut state = self.state();
        if state.latest.get(key) == Some(&generation) {
            state.latest.remove(key);
            true
        } else {
            false
        }
    }

    // Critical sections never panic midway; a poisoned map is still consistent.
    fn state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
