//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur while loading store data or processing a transaction.
///
/// None of these are fatal. The store actor surfaces them as an error message
/// on the view model and raises the `Error` state until a refresh or an
/// explicit clear.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A transaction was requested while the store was busy or not yet opened.
    #[error("Store not ready. Please try again later.")]
    NotReady,

    /// The item is not in the list the operation expected it in.
    #[error("Item {0} not found.")]
    NotFound(String),

    /// The player cannot afford the item, or already owns it.
    #[error("Insufficient currency or item owned: {item_id} costs {cost}, balance is {balance}.")]
    InsufficientFundsOrOwned {
        item_id: String,
        cost: u32,
        balance: u32,
    },

    /// The item is in the owned list but is not flagged as owned.
    #[error("Item {0} is not owned and cannot be sold.")]
    NotOwned(String),

    /// The backend (or its simulation) reported a failure.
    #[error("{0}")]
    ProviderFailure(String),

    /// The store actor is no longer accepting requests.
    #[error("Store actor closed")]
    ActorClosed,

    /// The store actor dropped the response channel.
    #[error("Store actor dropped response channel")]
    ActorDropped,
}
