//! # Store View Model
//!
//! The state a store front end renders. Every field is an [`Observable`], so
//! a front end can watch exactly the fields it draws, or take a whole
//! [`StoreSnapshot`] at once.
//!
//! The view model is owned by the store actor and is only ever mutated from
//! its task.

use super::registry::CategoryView;
use crate::model::{
    same_item_lists, same_optional_item, StoreItem, TransactionRequest, TransactionType, CATEGORY_ALL,
};
use crate::observable::Observable;
use crate::state::{StoreState, StoreStateTracker};
use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug)]
pub struct StoreViewModel {
    /// `None` until the first successful currency load.
    pub player_currency: Observable<Option<u32>>,
    /// Filtered view of the cached store items.
    pub available_items: Observable<Vec<StoreItem>>,
    pub owned_items: Observable<Vec<StoreItem>>,
    pub categories: Observable<Vec<CategoryView>>,
    pub selected_categories: Observable<Vec<String>>,
    pub selected_item: Observable<Option<StoreItem>>,
    pub previewed_item: Observable<Option<StoreItem>>,
    pub filter_text: Observable<String>,
    pub transaction_request: Observable<TransactionRequest>,
    pub transaction_type: Observable<TransactionType>,
    pub status_message: Observable<String>,
    pub error_message: Observable<String>,
    pub store_states: Observable<Vec<StoreState>>,
    tracker: StoreStateTracker,
}

impl StoreViewModel {
    pub fn new() -> Self {
        let tracker = StoreStateTracker::new();
        Self {
            player_currency: Observable::new(None),
            available_items: item_list(),
            owned_items: item_list(),
            categories: Observable::new(vec![CategoryView::new(CATEGORY_ALL)]),
            selected_categories: Observable::default(),
            selected_item: Observable::with_comparator(None, same_optional_item),
            previewed_item: Observable::with_comparator(None, same_optional_item),
            filter_text: Observable::default(),
            transaction_request: Observable::default(),
            transaction_type: Observable::default(),
            status_message: Observable::default(),
            error_message: Observable::default(),
            store_states: Observable::new(tracker.to_vec()),
            tracker,
        }
    }

    pub fn add_state(&mut self, state: StoreState) -> bool {
        let added = self.tracker.add(state);
        self.store_states.set(self.tracker.to_vec());
        added
    }

    pub fn remove_state(&mut self, state: StoreState) -> bool {
        let removed = self.tracker.remove(state);
        self.store_states.set(self.tracker.to_vec());
        removed
    }

    pub fn has_state(&self, state: StoreState) -> bool {
        self.tracker.has(state)
    }

    pub fn is_ready(&self) -> bool {
        self.tracker.is_ready()
    }

    pub fn status_text(&self) -> String {
        self.tracker.status_text()
    }

    /// Adds a category unless one with the same tag is already listed.
    pub fn add_category(&mut self, category: CategoryView) -> bool {
        if self.categories.with(|list| list.iter().any(|c| c.tag == category.tag)) {
            return false;
        }
        let mut list = self.categories.get();
        list.push(category);
        self.categories.set(list)
    }

    /// Sum of all field versions. Changes whenever any field does.
    pub fn revision(&self) -> u64 {
        self.player_currency.version()
            + self.available_items.version()
            + self.owned_items.version()
            + self.categories.version()
            + self.selected_categories.version()
            + self.selected_item.version()
            + self.previewed_item.version()
            + self.filter_text.version()
            + self.transaction_request.version()
            + self.transaction_type.version()
            + self.status_message.version()
            + self.error_message.version()
            + self.store_states.version()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            player_currency: self.player_currency.get(),
            available_items: self.available_items.get(),
            owned_items: self.owned_items.get(),
            categories: self.categories.get(),
            selected_categories: self.selected_categories.get(),
            selected_item: self.selected_item.get(),
            previewed_item: self.previewed_item.get(),
            filter_text: self.filter_text.get(),
            transaction_request: self.transaction_request.get(),
            transaction_type: self.transaction_type.get(),
            status_message: self.status_message.get(),
            error_message: self.error_message.get(),
            states: self.tracker.to_vec(),
        }
    }

    pub fn subscribe(&self) -> StoreSubscriptions {
        StoreSubscriptions {
            player_currency: self.player_currency.subscribe(),
            available_items: self.available_items.subscribe(),
            owned_items: self.owned_items.subscribe(),
            categories: self.categories.subscribe(),
            selected_categories: self.selected_categories.subscribe(),
            selected_item: self.selected_item.subscribe(),
            previewed_item: self.previewed_item.subscribe(),
            filter_text: self.filter_text.subscribe(),
            transaction_request: self.transaction_request.subscribe(),
            transaction_type: self.transaction_type.subscribe(),
            status_message: self.status_message.subscribe(),
            error_message: self.error_message.subscribe(),
            store_states: self.store_states.subscribe(),
        }
    }
}

fn item_list() -> Observable<Vec<StoreItem>> {
    Observable::with_comparator(Vec::new(), |a: &Vec<StoreItem>, b: &Vec<StoreItem>| {
        same_item_lists(a, b)
    })
}

impl Default for StoreViewModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only copy of the whole view model.
///
/// Two snapshots are equal only when their items match field by field.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    pub player_currency: Option<u32>,
    pub available_items: Vec<StoreItem>,
    pub owned_items: Vec<StoreItem>,
    pub categories: Vec<CategoryView>,
    pub selected_categories: Vec<String>,
    pub selected_item: Option<StoreItem>,
    pub previewed_item: Option<StoreItem>,
    pub filter_text: String,
    pub transaction_request: TransactionRequest,
    pub transaction_type: TransactionType,
    pub status_message: String,
    pub error_message: String,
    pub states: Vec<StoreState>,
}

impl StoreSnapshot {
    pub fn is_ready(&self) -> bool {
        self.states.contains(&StoreState::Ready)
    }

    pub fn has_state(&self, state: StoreState) -> bool {
        self.states.contains(&state)
    }

    /// No load or transaction is still waiting on the backend.
    pub fn is_idle(&self) -> bool {
        !self.states.iter().any(StoreState::is_in_flight)
    }

    pub fn find_available(&self, item_id: &str) -> Option<&StoreItem> {
        self.available_items.iter().find(|item| item.id == item_id)
    }

    pub fn find_owned(&self, item_id: &str) -> Option<&StoreItem> {
        self.owned_items.iter().find(|item| item.id == item_id)
    }
}

impl PartialEq for StoreSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.player_currency == other.player_currency
            && same_item_lists(&self.available_items, &other.available_items)
            && same_item_lists(&self.owned_items, &other.owned_items)
            && self.categories == other.categories
            && self.selected_categories == other.selected_categories
            && same_optional_item(&self.selected_item, &other.selected_item)
            && same_optional_item(&self.previewed_item, &other.previewed_item)
            && self.filter_text == other.filter_text
            && self.transaction_request == other.transaction_request
            && self.transaction_type == other.transaction_type
            && self.status_message == other.status_message
            && self.error_message == other.error_message
            && self.states == other.states
    }
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        StoreViewModel::new().snapshot()
    }
}

/// One receiver per view-model field.
#[derive(Debug, Clone)]
pub struct StoreSubscriptions {
    pub player_currency: watch::Receiver<Option<u32>>,
    pub available_items: watch::Receiver<Vec<StoreItem>>,
    pub owned_items: watch::Receiver<Vec<StoreItem>>,
    pub categories: watch::Receiver<Vec<CategoryView>>,
    pub selected_categories: watch::Receiver<Vec<String>>,
    pub selected_item: watch::Receiver<Option<StoreItem>>,
    pub previewed_item: watch::Receiver<Option<StoreItem>>,
    pub filter_text: watch::Receiver<String>,
    pub transaction_request: watch::Receiver<TransactionRequest>,
    pub transaction_type: watch::Receiver<TransactionType>,
    pub status_message: watch::Receiver<String>,
    pub error_message: watch::Receiver<String>,
    pub store_states: watch::Receiver<Vec<StoreState>>,
}
