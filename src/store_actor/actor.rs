//! # Store Actor
//!
//! The single owner of all store state. Client intents and provider
//! completions both arrive as messages and are handled one at a time, so
//! handlers never race each other and no locks guard the view model.
//!
//! ```text
//!  StoreClient ──StoreRequest──►┐
//!                               ├─► StoreActor ──► StoreDataProvider
//!  provider callbacks ─Event───►┘        │
//!                                        └─► watch<StoreSnapshot>
//! ```
//!
//! Provider events are drained before client requests, so a caller that
//! awaits one intent and then reads a snapshot sees every completion the
//! provider had already delivered.
//!
//! Every dispatch to the provider bumps a per-operation generation, and a
//! completion is only applied if it carries the current one. A reload issued
//! while an older call is in flight therefore wins, even if the older call
//! still manages to answer.

use super::messages::{transaction_slot, ProviderEvent, StoreRequest};
use super::registry::ItemViewRegistry;
use super::view_model::{StoreSnapshot, StoreViewModel};
use crate::error::StoreError;
use crate::filter::filter_items;
use crate::model::{Interaction, InteractionKind, StoreItem, TransactionRequest, TransactionType};
use crate::provider::{FailureCallback, ProviderOperation, StatusCallback, StoreDataProvider};
use crate::selection::{SelectionMode, SelectionModel};
use crate::state::StoreState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    events: mpsc::UnboundedReceiver<ProviderEvent>,
    event_sender: mpsc::UnboundedSender<ProviderEvent>,
    provider: Arc<dyn StoreDataProvider>,
    view_model: StoreViewModel,
    registry: ItemViewRegistry,
    /// Unfiltered store items from the last successful load.
    cached_items: Vec<StoreItem>,
    item_selection: SelectionModel<StoreItem>,
    category_selection: SelectionModel<String>,
    snapshots: watch::Sender<StoreSnapshot>,
    published_revision: u64,
    /// Latest dispatch per provider operation.
    generations: HashMap<ProviderOperation, u64>,
}

impl StoreActor {
    pub fn new(receiver: mpsc::Receiver<StoreRequest>, provider: Arc<dyn StoreDataProvider>) -> Self {
        let (event_sender, events) = mpsc::unbounded_channel();
        let view_model = StoreViewModel::new();
        let published_revision = view_model.revision();
        let (snapshots, _) = watch::channel(view_model.snapshot());
        Self {
            receiver,
            events,
            event_sender,
            provider,
            view_model,
            registry: ItemViewRegistry::new(),
            cached_items: Vec::new(),
            item_selection: SelectionModel::new(SelectionMode::Single),
            category_selection: SelectionModel::new(SelectionMode::Multi),
            snapshots,
            published_revision,
            generations: HashMap::new(),
        }
    }

    /// Runs the actor's event loop until every client is dropped.
    pub async fn run(mut self) {
        info!("Store actor started");

        loop {
            tokio::select! {
                biased;
                Some(event) = self.events.recv() => self.handle_event(event),
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
            }
            self.publish();
        }

        self.teardown();
        info!("Store actor shutdown");
    }

    fn handle_request(&mut self, request: StoreRequest) {
        match request {
            StoreRequest::Open { respond_to } => {
                self.open();
                let _ = respond_to.send(self.view_model.snapshot());
            }
            StoreRequest::SetFilterText { text, respond_to } => {
                debug!(%text, "Set filter text");
                if self.view_model.filter_text.set(text) {
                    self.filter_available_items();
                }
                let _ = respond_to.send(());
            }
            StoreRequest::SetSelectedCategories { categories, respond_to } => {
                debug!(?categories, "Set selected categories");
                self.category_selection.set_selected(categories);
                self.sync_selected_categories();
                let _ = respond_to.send(());
            }
            StoreRequest::RequestTransaction { request, respond_to } => {
                let result = self.request_transaction(request);
                let _ = respond_to.send(result);
            }
            StoreRequest::SetTransactionType { kind, respond_to } => {
                self.view_model.transaction_type.set(kind);
                let _ = respond_to.send(());
            }
            StoreRequest::Refresh { respond_to } => {
                info!("Refresh requested");
                self.refresh();
                let _ = respond_to.send(());
            }
            StoreRequest::ClearError { respond_to } => {
                self.view_model.error_message.set(String::new());
                self.view_model.remove_state(StoreState::Error);
                let _ = respond_to.send(());
            }
            StoreRequest::InteractItem { item_id, interaction, respond_to } => {
                self.interact_item(&item_id, &interaction);
                let _ = respond_to.send(());
            }
            StoreRequest::InteractCategory { tag, interaction, respond_to } => {
                self.interact_category(&tag, &interaction);
                let _ = respond_to.send(());
            }
            StoreRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.view_model.snapshot());
            }
            StoreRequest::Subscribe { respond_to } => {
                // Bring the watch up to date before handing out a receiver.
                self.publish();
                let _ = respond_to.send(self.snapshots.subscribe());
            }
            StoreRequest::SubscribeFields { respond_to } => {
                let _ = respond_to.send(self.view_model.subscribe());
            }
            StoreRequest::States { respond_to } => {
                let _ = respond_to.send(self.view_model.store_states.get());
            }
            StoreRequest::ItemView { item_id, respond_to } => {
                let _ = respond_to.send(self.registry.get(&item_id).cloned());
            }
        }
    }

    fn handle_event(&mut self, event: ProviderEvent) {
        let (op, generation) = event.slot();
        if self.generations.get(&op) != Some(&generation) {
            debug!(%op, generation, "Ignoring stale provider completion");
            return;
        }

        match event {
            ProviderEvent::StoreItemsLoaded { result, .. } => {
                self.view_model.remove_state(StoreState::LoadingItems);
                match result {
                    Ok((items, status)) => {
                        info!(count = items.len(), "Store items loaded");
                        for item in &items {
                            self.register_item(item);
                        }
                        self.cached_items = items;
                        self.filter_available_items();
                        self.view_model.status_message.set(status);
                    }
                    Err(e) => self.fail("Store items", e),
                }
            }
            ProviderEvent::OwnedItemsLoaded { result, .. } => {
                self.view_model.remove_state(StoreState::LoadingOwned);
                match result {
                    Ok((items, status)) => {
                        info!(count = items.len(), "Owned items loaded");
                        for item in &items {
                            self.register_item(item);
                        }
                        self.view_model.owned_items.set(items);
                        self.view_model.status_message.set(status);
                    }
                    Err(e) => self.fail("Owned items", e),
                }
            }
            ProviderEvent::CurrencyLoaded { result, .. } => {
                self.view_model.remove_state(StoreState::LoadingCurrency);
                match result {
                    Ok((currency, status)) => {
                        info!(currency, "Player currency loaded");
                        self.view_model.player_currency.set(Some(currency));
                        self.view_model.status_message.set(status);
                    }
                    Err(e) => self.fail("Player currency", e),
                }
            }
            ProviderEvent::TransactionFinished { request, result, .. } => {
                self.view_model.remove_state(busy_state_for(request.kind));
                match result {
                    Ok(status) => {
                        info!(%request, "Transaction complete");
                        self.view_model.transaction_request.set(TransactionRequest::default());
                        self.view_model.transaction_type.set(TransactionType::None);
                        self.refresh();
                        self.view_model.status_message.set(status);
                    }
                    Err(e) => {
                        warn!(%request, error = %e, "Transaction failed");
                        self.view_model.add_state(StoreState::Error);
                        self.view_model.error_message.set(e.to_string());
                    }
                }
            }
        }
    }

    /// Clears `Uninitialized` and kicks off the first load. Later calls do nothing.
    fn open(&mut self) {
        if self.view_model.has_state(StoreState::Uninitialized) {
            info!("Store opened, loading initial data");
            self.view_model.remove_state(StoreState::Uninitialized);
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.view_model.error_message.set(String::new());
        self.view_model.remove_state(StoreState::Error);

        self.load_store_items();
        self.load_owned_items();
        self.load_player_currency();

        self.item_selection.clear_selection();
        self.item_selection.clear_preview();
        self.sync_item_selection();
    }

    /// Starts a new generation for `op`, making any in-flight completion stale.
    fn dispatch(&mut self, op: ProviderOperation) -> u64 {
        let generation = self.generations.entry(op).or_default();
        *generation += 1;
        *generation
    }

    fn load_store_items(&mut self) {
        self.view_model.add_state(StoreState::LoadingItems);
        let generation = self.dispatch(ProviderOperation::StoreItems);
        let ok = self.event_sender.clone();
        let err = self.event_sender.clone();
        self.provider.fetch_store_items(
            Box::new(move |items, status| {
                let _ = ok.send(ProviderEvent::StoreItemsLoaded {
                    generation,
                    result: Ok((items, status)),
                });
            }),
            Box::new(move |e| {
                let _ = err.send(ProviderEvent::StoreItemsLoaded {
                    generation,
                    result: Err(e),
                });
            }),
        );
    }

    fn load_owned_items(&mut self) {
        self.view_model.add_state(StoreState::LoadingOwned);
        let generation = self.dispatch(ProviderOperation::OwnedItems);
        let ok = self.event_sender.clone();
        let err = self.event_sender.clone();
        self.provider.fetch_owned_items(
            Box::new(move |items, status| {
                let _ = ok.send(ProviderEvent::OwnedItemsLoaded {
                    generation,
                    result: Ok((items, status)),
                });
            }),
            Box::new(move |e| {
                let _ = err.send(ProviderEvent::OwnedItemsLoaded {
                    generation,
                    result: Err(e),
                });
            }),
        );
    }

    fn load_player_currency(&mut self) {
        self.view_model.add_state(StoreState::LoadingCurrency);
        let generation = self.dispatch(ProviderOperation::PlayerCurrency);
        let ok = self.event_sender.clone();
        let err = self.event_sender.clone();
        self.provider.fetch_player_currency(
            Box::new(move |currency, status| {
                let _ = ok.send(ProviderEvent::CurrencyLoaded {
                    generation,
                    result: Ok((currency, status)),
                });
            }),
            Box::new(move |e| {
                let _ = err.send(ProviderEvent::CurrencyLoaded {
                    generation,
                    result: Err(e),
                });
            }),
        );
    }

    fn request_transaction(&mut self, request: TransactionRequest) -> Result<(), StoreError> {
        if !request.is_valid() {
            debug!(%request, "Ignoring invalid transaction request");
            return Ok(());
        }

        self.view_model.transaction_request.set(request.clone());

        if !self.view_model.is_ready() {
            info!(%request, states = %self.view_model.status_text(), "Store not ready, failing transaction");
            let error = StoreError::NotReady;
            self.view_model.transaction_request.set(TransactionRequest::default());
            self.view_model.error_message.set(error.to_string());
            self.view_model.add_state(StoreState::Error);
            return Err(error);
        }

        info!(%request, "Processing transaction");
        self.view_model.add_state(busy_state_for(request.kind));
        let generation = self.dispatch(transaction_slot(request.kind));

        let ok = self.event_sender.clone();
        let err = self.event_sender.clone();
        let ok_request = request.clone();
        let err_request = request.clone();
        let on_success: StatusCallback = Box::new(move |status| {
            let _ = ok.send(ProviderEvent::TransactionFinished {
                generation,
                request: ok_request,
                result: Ok(status),
            });
        });
        let on_failure: FailureCallback = Box::new(move |e| {
            let _ = err.send(ProviderEvent::TransactionFinished {
                generation,
                request: err_request,
                result: Err(e),
            });
        });

        match request.kind {
            TransactionType::Purchase => self.provider.purchase_item(request, on_success, on_failure),
            TransactionType::Sell => self.provider.sell_item(request, on_success, on_failure),
            TransactionType::None => {}
        }
        Ok(())
    }

    fn interact_item(&mut self, item_id: &str, interaction: &Interaction) {
        if !interaction.is_valid() {
            return;
        }
        let Some(view) = self.registry.get(item_id) else {
            debug!(item_id, "Interaction on unknown item ignored");
            return;
        };
        let item = view.item.clone();
        let source = &interaction.source;

        match interaction.kind {
            InteractionKind::Hovered => {
                self.view_model
                    .status_message
                    .set(format!("Previewing item: {} (from {source})", item.name()));
                self.item_selection.preview(Some(item));
            }
            InteractionKind::Unhovered => {
                self.view_model.status_message.set(String::new());
                let selected = self.item_selection.last_selected().cloned();
                self.item_selection.preview(selected);
            }
            InteractionKind::Clicked => {
                self.view_model
                    .status_message
                    .set(format!("Clicked on item: {} (from {source})", item.name()));
                let kind = if item.owned {
                    TransactionType::Sell
                } else if self.view_model.player_currency.get().is_some_and(|c| item.cost <= c) {
                    TransactionType::Purchase
                } else {
                    TransactionType::None
                };
                debug!(item_id, %kind, "Item selected");
                self.item_selection.toggle(item);
                self.view_model.transaction_type.set(kind);
            }
            InteractionKind::None => {}
        }
        self.sync_item_selection();
    }

    fn interact_category(&mut self, tag: &str, interaction: &Interaction) {
        if !interaction.is_valid() {
            return;
        }
        if !self.view_model.categories.with(|list| list.iter().any(|c| c.tag == tag)) {
            debug!(tag, "Interaction on unknown category ignored");
            return;
        }
        let source = &interaction.source;

        match interaction.kind {
            InteractionKind::Hovered => {
                self.view_model
                    .status_message
                    .set(format!("Previewing category: {tag} (from {source})"));
            }
            InteractionKind::Unhovered => {
                self.view_model.status_message.set(String::new());
            }
            InteractionKind::Clicked => {
                let tag = tag.to_string();
                let verb = if self.category_selection.is_selected(&tag) {
                    "Unselected"
                } else {
                    "Selected"
                };
                self.view_model
                    .status_message
                    .set(format!("{verb} category: {tag}, from {source}"));
                self.category_selection.toggle(tag);
                self.sync_selected_categories();
            }
            InteractionKind::None => {}
        }
    }

    /// Caches a view for `item` and registers its categories with the store.
    fn register_item(&mut self, item: &StoreItem) {
        let (view, created) = self.registry.get_or_create(item);
        if created {
            let categories = view.categories.clone();
            for category in categories {
                self.view_model.add_category(category);
            }
        }
    }

    fn filter_available_items(&mut self) {
        let text = self.view_model.filter_text.get();
        let filtered = filter_items(&self.cached_items, &text, self.category_selection.selected());
        debug!(total = self.cached_items.len(), visible = filtered.len(), "Filtered store items");
        self.view_model.available_items.set(filtered);
    }

    fn sync_selected_categories(&mut self) {
        let selected = self.category_selection.selected().to_vec();
        if self.view_model.selected_categories.set(selected) {
            self.filter_available_items();
        }
    }

    fn sync_item_selection(&mut self) {
        self.view_model
            .selected_item
            .set(self.item_selection.last_selected().cloned());
        self.view_model
            .previewed_item
            .set(self.item_selection.previewed().cloned());
    }

    fn fail(&mut self, what: &str, error: StoreError) {
        warn!(what, error = %error, "Load failed");
        self.view_model.error_message.set(error.to_string());
        self.view_model.add_state(StoreState::Error);
    }

    fn publish(&mut self) {
        let revision = self.view_model.revision();
        if revision != self.published_revision {
            self.published_revision = revision;
            self.snapshots.send_replace(self.view_model.snapshot());
        }
    }

    fn teardown(&mut self) {
        self.provider.cancel_pending();
        debug!(views = self.registry.len(), cached = self.cached_items.len(), "Releasing item views");
        self.registry.clear();
        self.cached_items.clear();
    }
}

fn busy_state_for(kind: TransactionType) -> StoreState {
    match kind {
        TransactionType::Sell => StoreState::Selling,
        _ => StoreState::Purchasing,
    }
}
