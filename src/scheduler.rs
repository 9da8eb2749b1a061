use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::session::TaskHandle;

/// Deadlines for deferred actions, polled from the event loop's tick.
///
/// Nothing sleeps here: a task is only ever observed as due when the caller
/// asks with the current time.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    due: BTreeMap<TaskHandle, Instant>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, handle: TaskHandle, delay: Duration, now: Instant) {
        self.due.insert(handle, now + delay);
    }

    /// Returns whether the handle was still pending
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.due.remove(&handle).is_some()
    }

    pub fn clear(&mut self) {
        self.due.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.due.is_empty()
    }

    /// Removes and returns every task whose deadline has passed, oldest handle first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TaskHandle> {
        let ready: Vec<TaskHandle> = self
            .due
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(handle, _)| *handle)
            .collect();

        for handle in &ready {
            self.due.remove(handle);
        }
        ready
    }
}
