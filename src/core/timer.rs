//! One-shot deferred callbacks
//!
//! Nothing here runs on its own: the tick loop polls with the current time and
//! collects whatever became due. Cancelling is always allowed, including after the
//! timer fired or was already cancelled.

use serde::{Deserialize, Serialize};

use crate::core::types::Seconds;

/// Lifecycle of a deferred call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredState {
    Pending,
    Fired,
    Cancelled,
}

/// A single deferred call owned by whoever scheduled it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    pub due: Seconds,
    pub state: DeferredState,
}

impl Deferred {
    pub fn schedule(now: Seconds, delay: Seconds) -> Self {
        Self {
            due: now + delay.max(0.0),
            state: DeferredState::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == DeferredState::Pending
    }

    /// Fire if due. Returns true exactly once.
    pub fn poll(&mut self, now: Seconds) -> bool {
        if self.is_pending() && now >= self.due {
            self.state = DeferredState::Fired;
            true
        } else {
            false
        }
    }

    /// Cancel if still pending. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.is_pending() {
            self.state = DeferredState::Cancelled;
            true
        } else {
            false
        }
    }
}

/// Handle to a call in a [`TimerQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

#[derive(Debug, Clone)]
struct Entry<E> {
    handle: TimerHandle,
    deferred: Deferred,
    event: E,
}

/// Queue of deferred world events (timed detonations and the like)
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    entries: Vec<Entry<E>>,
    next_handle: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Seconds, delay: Seconds, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            deferred: Deferred::schedule(now, delay),
            event,
        });
        handle
    }

    /// Cancel a pending call. Unknown, fired and cancelled handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(index) => {
                let mut entry = self.entries.swap_remove(index);
                entry.deferred.cancel()
            }
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every call due at `now`, earliest first
    pub fn drain_due(&mut self, now: Seconds) -> Vec<(TimerHandle, E)> {
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.entries.len() {
            if self.entries[index].deferred.poll(now) {
                let entry = self.entries.swap_remove(index);
                due.push((entry.deferred.due, entry.handle, entry.event));
            } else {
                index += 1;
            }
        }

        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1 .0.cmp(&b.1 .0)));
        due.into_iter().map(|(_, handle, event)| (handle, event)).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
