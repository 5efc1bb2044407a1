//! Messages accepted by the store actor.

use super::registry::ItemView;
use super::view_model::{StoreSnapshot, StoreSubscriptions};
use crate::error::StoreError;
use crate::model::{Interaction, StoreItem, TransactionRequest, TransactionType};
use crate::provider::ProviderOperation;
use crate::state::StoreState;
use tokio::sync::{oneshot, watch};

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<T>;

/// Intents written by the UI layer.
///
/// Each variant carries a `respond_to` channel. Setters answer once the
/// intent has been applied, so a caller that awaits them observes the
/// effects in the next snapshot.
#[derive(Debug)]
pub enum StoreRequest {
    /// First access. Triggers the initial load, once.
    Open {
        respond_to: Response<StoreSnapshot>,
    },
    SetFilterText {
        text: String,
        respond_to: Response<()>,
    },
    SetSelectedCategories {
        categories: Vec<String>,
        respond_to: Response<()>,
    },
    RequestTransaction {
        request: TransactionRequest,
        respond_to: Response<Result<(), StoreError>>,
    },
    SetTransactionType {
        kind: TransactionType,
        respond_to: Response<()>,
    },
    Refresh {
        respond_to: Response<()>,
    },
    ClearError {
        respond_to: Response<()>,
    },
    InteractItem {
        item_id: String,
        interaction: Interaction,
        respond_to: Response<()>,
    },
    InteractCategory {
        tag: String,
        interaction: Interaction,
        respond_to: Response<()>,
    },
    Snapshot {
        respond_to: Response<StoreSnapshot>,
    },
    Subscribe {
        respond_to: Response<watch::Receiver<StoreSnapshot>>,
    },
    SubscribeFields {
        respond_to: Response<StoreSubscriptions>,
    },
    States {
        respond_to: Response<Vec<StoreState>>,
    },
    ItemView {
        item_id: String,
        respond_to: Response<Option<ItemView>>,
    },
}

/// Provider completions, delivered back to the actor's own mailbox.
///
/// `generation` identifies the dispatch that produced the completion. A
/// completion from a call that has since been reissued is stale.
#[derive(Debug)]
pub enum ProviderEvent {
    StoreItemsLoaded {
        generation: u64,
        result: Result<(Vec<StoreItem>, String), StoreError>,
    },
    OwnedItemsLoaded {
        generation: u64,
        result: Result<(Vec<StoreItem>, String), StoreError>,
    },
    CurrencyLoaded {
        generation: u64,
        result: Result<(u32, String), StoreError>,
    },
    TransactionFinished {
        generation: u64,
        request: TransactionRequest,
        result: Result<String, StoreError>,
    },
}

impl ProviderEvent {
    /// The provider slot this completion belongs to, and its dispatch generation.
    pub fn slot(&self) -> (ProviderOperation, u64) {
        match self {
            ProviderEvent::StoreItemsLoaded { generation, .. } => (ProviderOperation::StoreItems, *generation),
            ProviderEvent::OwnedItemsLoaded { generation, .. } => (ProviderOperation::OwnedItems, *generation),
            ProviderEvent::CurrencyLoaded { generation, .. } => (ProviderOperation::PlayerCurrency, *generation),
            ProviderEvent::TransactionFinished { generation, request, .. } => {
                (transaction_slot(request.kind), *generation)
            }
        }
    }
}

pub(crate) fn transaction_slot(kind: TransactionType) -> ProviderOperation {
    match kind {
        TransactionType::Sell => ProviderOperation::Sell,
        _ => ProviderOperation::Purchase,
    }
}
