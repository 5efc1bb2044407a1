//! # Store State Tracker
//!
//! The store is "ready" only when nothing else is going on. Every in-flight
//! operation adds its own busy state, and the tracker derives readiness from
//! the set of busy states instead of keeping a single status enum.
//!
//! ```text
//! new()              -> {Uninitialized}
//! remove(Uninit.)    -> {Ready}
//! add(LoadingItems)  -> {LoadingItems}
//! add(Purchasing)    -> {LoadingItems, Purchasing}
//! remove(both)       -> {Ready}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A reason the store is (or is not) available for new transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoreState {
    /// Nobody has looked at the store yet. Cleared on first access.
    Uninitialized,
    LoadingItems,
    LoadingOwned,
    LoadingCurrency,
    Purchasing,
    Selling,
    /// Sticky until a refresh or an explicit clear.
    Error,
    /// Derived: present exactly when no other state is.
    Ready,
}

impl StoreState {
    pub fn label(&self) -> &'static str {
        match self {
            StoreState::Uninitialized => "Uninitialized",
            StoreState::LoadingItems => "Loading items",
            StoreState::LoadingOwned => "Loading owned items",
            StoreState::LoadingCurrency => "Loading currency",
            StoreState::Purchasing => "Purchasing",
            StoreState::Selling => "Selling",
            StoreState::Error => "Error",
            StoreState::Ready => "Ready",
        }
    }

    pub fn is_busy(&self) -> bool {
        *self != StoreState::Ready
    }

    /// Loading or transacting: something will complete on its own.
    pub fn is_in_flight(&self) -> bool {
        self.is_loading() || matches!(self, StoreState::Purchasing | StoreState::Selling)
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            StoreState::LoadingItems | StoreState::LoadingOwned | StoreState::LoadingCurrency
        )
    }
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of active store states with `Ready` maintained automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStateTracker {
    states: BTreeSet<StoreState>,
}

impl StoreStateTracker {
    pub fn new() -> Self {
        Self {
            states: BTreeSet::from([StoreState::Uninitialized]),
        }
    }

    /// Adds a busy state. Returns `true` if it was not already present.
    ///
    /// `Ready` cannot be added directly; it only comes back when the last
    /// busy state is removed.
    pub fn add(&mut self, state: StoreState) -> bool {
        if state == StoreState::Ready {
            return false;
        }
        let inserted = self.states.insert(state);
        self.states.remove(&StoreState::Ready);
        inserted
    }

    /// Removes a busy state. Returns `true` if it was present.
    pub fn remove(&mut self, state: StoreState) -> bool {
        if state == StoreState::Ready {
            return false;
        }
        let removed = self.states.remove(&state);
        if self.states.is_empty() {
            self.states.insert(StoreState::Ready);
        }
        removed
    }

    pub fn has(&self, state: StoreState) -> bool {
        self.states.contains(&state)
    }

    pub fn is_ready(&self) -> bool {
        self.has(StoreState::Ready)
    }

    /// Active states in declaration order.
    pub fn states(&self) -> impl Iterator<Item = StoreState> + '_ {
        self.states.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<StoreState> {
        self.states().collect()
    }

    /// Comma separated labels, e.g. `"Loading items, Purchasing"`.
    pub fn status_text(&self) -> String {
        self.states()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for StoreStateTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const BUSY: [StoreState; 7] = [
        StoreState::Uninitialized,
        StoreState::LoadingItems,
        StoreState::LoadingOwned,
        StoreState::LoadingCurrency,
        StoreState::Purchasing,
        StoreState::Selling,
        StoreState::Error,
    ];

    #[test]
    fn test_starts_uninitialized() {
        let tracker = StoreStateTracker::new();
        assert!(tracker.has(StoreState::Uninitialized));
        assert!(!tracker.is_ready());
        assert_eq!(tracker.to_vec(), vec![StoreState::Uninitialized]);
    }

    #[test]
    fn test_ready_returns_when_last_busy_state_leaves() {
        let mut tracker = StoreStateTracker::new();
        tracker.remove(StoreState::Uninitialized);
        assert!(tracker.is_ready());

        assert!(tracker.add(StoreState::LoadingItems));
        assert!(tracker.add(StoreState::Purchasing));
        assert!(!tracker.is_ready());
        assert_eq!(tracker.status_text(), "Loading items, Purchasing");

        tracker.remove(StoreState::LoadingItems);
        assert!(!tracker.is_ready());
        tracker.remove(StoreState::Purchasing);
        assert!(tracker.is_ready());
        assert_eq!(tracker.status_text(), "Ready");
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut tracker = StoreStateTracker::new();
        assert!(tracker.add(StoreState::Error));
        assert!(!tracker.add(StoreState::Error));

        // One removal clears it even though it was added twice.
        tracker.remove(StoreState::Uninitialized);
        tracker.remove(StoreState::Error);
        assert!(tracker.is_ready());
    }

    #[test]
    fn test_ready_cannot_be_forced() {
        let mut tracker = StoreStateTracker::new();
        assert!(!tracker.add(StoreState::Ready));
        assert!(!tracker.is_ready());

        tracker.remove(StoreState::Uninitialized);
        assert!(!tracker.remove(StoreState::Ready));
        assert!(tracker.is_ready());
    }

    #[test]
    fn test_error_is_additive_with_purchasing() {
        let mut tracker = StoreStateTracker::new();
        tracker.remove(StoreState::Uninitialized);
        tracker.add(StoreState::Purchasing);
        tracker.add(StoreState::Error);
        assert!(tracker.has(StoreState::Purchasing));
        assert!(tracker.has(StoreState::Error));

        tracker.remove(StoreState::Purchasing);
        assert!(tracker.has(StoreState::Error));
        assert!(!tracker.is_ready());
    }

    #[test]
    fn test_ready_iff_no_busy_state_for_random_sequences() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut tracker = StoreStateTracker::new();
            for _ in 0..50 {
                let state = BUSY[rng.gen_range(0..BUSY.len())];
                if rng.gen_bool(0.5) {
                    tracker.add(state);
                } else {
                    tracker.remove(state);
                }

                let any_busy = tracker.states().any(|s| s.is_busy());
                assert_eq!(tracker.is_ready(), !any_busy);
                assert!(tracker.states().next().is_some(), "set must never be empty");
            }
        }
    }
}
