//! # Observable Properties
//!
//! A view-model field that notifies subscribers when its value changes.
//! Each field is backed by its own [`tokio::sync::watch`] channel, so a front
//! end can subscribe to just the fields it renders.
//!
//! Setting a value equal to the current one is a no-op: no notification, no
//! version bump. This is what lets an intent channel be "cleared" without
//! re-triggering whoever is listening for a new request.
//!
//! "Equal" is `PartialEq` unless the field is built with
//! [`Observable::with_comparator`]. Item fields use that to compare every
//! field of an item, since `StoreItem` equality only looks at the id.

use std::fmt;
use tokio::sync::watch;

pub struct Observable<T> {
    sender: watch::Sender<T>,
    version: u64,
    same: fn(&T, &T) -> bool,
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self::with_comparator(value, <T as PartialEq>::eq)
    }

    /// A field whose changes are detected by `same` instead of `==`.
    pub fn with_comparator(value: T, same: fn(&T, &T) -> bool) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            sender,
            version: 0,
            same,
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Stores `value` and notifies subscribers. Returns `false` if it was
    /// equal to the current value.
    pub fn set(&mut self, value: T) -> bool {
        let same = self.same;
        let changed = self.sender.send_if_modified(|current| {
            if same(current, &value) {
                false
            } else {
                *current = value;
                true
            }
        });
        if changed {
            self.version += 1;
        }
        changed
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Number of changes since creation.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.sender.borrow())
            .field("version", &self.version)
            .finish()
    }
}

impl<T: Clone + PartialEq + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
