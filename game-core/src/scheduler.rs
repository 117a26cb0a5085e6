use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::warn;

use crate::{ScheduledTick, TickScheduler};

/// Scheduler for hosts that run their own timer loop (or tests): ticks are
/// queued and the host hands each one back to the controller when due.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Arc<Mutex<VecDeque<ScheduledTick>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest scheduled tick.
    pub fn pop(&self) -> Option<ScheduledTick> {
        self.pending.lock().ok()?.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().map(|q| q.len()).unwrap_or(0)
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, tick: ScheduledTick) {
        match self.pending.lock() {
            Ok(mut pending) => pending.push_back(tick),
            Err(_) => warn!("Tick queue lock poisoned, dropping {:?} tick", tick.timer),
        }
    }
}
