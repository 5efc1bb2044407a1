//! # Timer Slots
//!
//! One-shot deferred tasks keyed by a slot. Scheduling into a slot aborts
//! whatever was pending there, so at most one callback per slot can ever be
//! outstanding (last writer wins). Dropping the slots aborts everything.

use crate::config::MockTiming;
use rand::Rng;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::debug;

pub struct TimerSlots<K> {
    pending: Mutex<HashMap<K, AbortHandle>>,
}

impl<K: Eq + Hash + Copy + Debug> TimerSlots<K> {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Runs `task` after `delay`, replacing anything pending in `slot`.
    ///
    /// A zero delay runs `task` inline, after cancelling the slot.
    /// Otherwise this must be called from within a Tokio runtime.
    pub fn schedule<F>(&self, slot: K, delay: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if delay.is_zero() {
            self.cancel(slot);
            task();
            return;
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });

        if let Some(previous) = self.lock().insert(slot, handle.abort_handle()) {
            if !previous.is_finished() {
                debug!(?slot, "Replacing pending timer");
            }
            previous.abort();
        }
    }

    /// Aborts the pending task in `slot`. Returns `true` if one was still running.
    pub fn cancel(&self, slot: K) -> bool {
        match self.lock().remove(&slot) {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        let mut pending = self.lock();
        for (slot, handle) in pending.drain() {
            if !handle.is_finished() {
                debug!(?slot, "Cancelling pending timer");
            }
            handle.abort();
        }
    }

    pub fn is_pending(&self, slot: K) -> bool {
        self.lock()
            .get(&slot)
            .is_some_and(|handle| !handle.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, AbortHandle>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Draws a latency uniformly from the timing's bounds.
pub fn sample_delay<R: Rng + ?Sized>(rng: &mut R, timing: &MockTiming) -> Duration {
    let timing = timing.normalized();
    if timing.max_delay <= timing.min_delay {
        return timing.min_duration();
    }
    Duration::from_secs_f64(rng.gen_range(timing.min_delay..=timing.max_delay))
}

/// Returns `true` with probability `chance`.
pub fn roll_failure<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    chance > 0.0 && rng.gen::<f64>() < chance
}

impl<K: Eq + Hash + Copy + Debug> Default for TimerSlots<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for TimerSlots<K> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, handle) in pending.drain() {
            handle.abort();
        }
    }
}
