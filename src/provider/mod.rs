//! Data providers: the backend contract the store depends on, plus a
//! simulated backend and a scripted test double.
//!
//! # Main Components
//!
//! - [`StoreDataProvider`] - Callback based contract for fetching data and running transactions
//! - [`MockStoreDataProvider`] - Simulated backend with random latency and failures
//! - [`ScriptedProvider`] - Expectation driven double for tests
//! - [`TimerSlots`] - One cancellable timer per operation

pub mod dummy;
pub mod mock;
pub mod scheduler;
pub mod scripted;

pub use mock::*;
pub use scheduler::*;
pub use scripted::*;

use crate::error::StoreError;
use crate::model::{StoreItem, TransactionRequest};
use std::fmt;

/// Called with the fetched items and a status message.
pub type ItemsCallback = Box<dyn FnOnce(Vec<StoreItem>, String) + Send + 'static>;
/// Called with the player's balance and a status message.
pub type CurrencyCallback = Box<dyn FnOnce(u32, String) + Send + 'static>;
/// Called with a status message when a transaction succeeds.
pub type StatusCallback = Box<dyn FnOnce(String) + Send + 'static>;
/// Called when an operation fails.
pub type FailureCallback = Box<dyn FnOnce(StoreError) + Send + 'static>;

/// The operations a provider serves. Each one owns its own timer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProviderOperation {
    StoreItems,
    OwnedItems,
    PlayerCurrency,
    Purchase,
    Sell,
}

impl ProviderOperation {
    /// Status text reported when the operation succeeds.
    pub fn success_message(&self) -> &'static str {
        match self {
            ProviderOperation::StoreItems => "Store items loaded.",
            ProviderOperation::OwnedItems => "Owned items loaded.",
            ProviderOperation::PlayerCurrency => "Currency loaded.",
            ProviderOperation::Purchase => "Purchase successful.",
            ProviderOperation::Sell => "Sale successful.",
        }
    }

    /// Error text reported when the backend call itself fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ProviderOperation::StoreItems => "Failed to load store items.",
            ProviderOperation::OwnedItems => "Failed to load owned items.",
            ProviderOperation::PlayerCurrency => "Failed to load currency.",
            ProviderOperation::Purchase => "Purchase failed.",
            ProviderOperation::Sell => "Sale failed.",
        }
    }
}

impl fmt::Display for ProviderOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderOperation::StoreItems => "store_items",
            ProviderOperation::OwnedItems => "owned_items",
            ProviderOperation::PlayerCurrency => "player_currency",
            ProviderOperation::Purchase => "purchase",
            ProviderOperation::Sell => "sell",
        };
        f.write_str(label)
    }
}

/// Contract between the store and whatever backend serves it.
///
/// Every method returns immediately. Exactly one of the two callbacks is
/// invoked later, possibly on another task, unless the operation is
/// cancelled first. The store never depends on anything beyond this trait,
/// so a real backend can replace the mock.
pub trait StoreDataProvider: Send + Sync + 'static {
    fn fetch_store_items(&self, on_success: ItemsCallback, on_failure: FailureCallback);

    fn fetch_owned_items(&self, on_success: ItemsCallback, on_failure: FailureCallback);

    fn fetch_player_currency(&self, on_success: CurrencyCallback, on_failure: FailureCallback);

    fn purchase_item(
        &self,
        request: TransactionRequest,
        on_success: StatusCallback,
        on_failure: FailureCallback,
    );

    fn sell_item(
        &self,
        request: TransactionRequest,
        on_success: StatusCallback,
        on_failure: FailureCallback,
    );

    /// Drops every pending callback. Called when the store shuts down.
    fn cancel_pending(&self) {}
}
