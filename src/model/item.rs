use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category tag that matches every item when selected in the filter.
pub const CATEGORY_ALL: &str = "Item.Category.All";

/// Category tag given to generated items that have no better home.
pub const CATEGORY_OTHER: &str = "Item.Category.Other";

/// Display data that only the UI cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUiData {
    pub name: String,
    pub description: String,
    /// Reference to an icon asset, resolved by the front end.
    pub icon: String,
}

/// A single item that can be bought from or sold back to the store.
///
/// # Identity
/// Two items are equal when their `id` matches. Cost, ownership and display
/// data are ignored, so `Vec::contains` and unique-add treat a re-priced copy
/// of an item as the same item. Use [`StoreItem::same_data`] to detect that a
/// re-priced copy differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreItem {
    pub id: String,
    pub cost: u32,
    pub owned: bool,
    pub ui: ItemUiData,
    pub categories: BTreeSet<String>,
}

impl StoreItem {
    /// Creates an unowned item with no categories.
    ///
    /// # Arguments
    /// * `id` - Unique key of the item
    /// * `name` - Display name, also used by the text filter
    /// * `cost` - Purchase price in player currency
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: u32) -> Self {
        Self {
            id: id.into(),
            cost,
            owned: false,
            ui: ItemUiData {
                name: name.into(),
                ..ItemUiData::default()
            },
            categories: BTreeSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.ui.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.ui.icon = icon.into();
        self
    }

    pub fn with_category(mut self, tag: impl Into<String>) -> Self {
        self.categories.insert(tag.into());
        self
    }

    pub fn owned(mut self, owned: bool) -> Self {
        self.owned = owned;
        self
    }

    pub fn name(&self) -> &str {
        &self.ui.name
    }

    pub fn has_category(&self, tag: &str) -> bool {
        self.categories.contains(tag)
    }

    /// Field-by-field comparison, unlike `==`.
    pub fn same_data(&self, other: &StoreItem) -> bool {
        self.id == other.id
            && self.cost == other.cost
            && self.owned == other.owned
            && self.ui == other.ui
            && self.categories == other.categories
    }
}

pub fn same_item_lists(a: &[StoreItem], b: &[StoreItem]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_data(y))
}

pub fn same_optional_item(a: &Option<StoreItem>, b: &Option<StoreItem>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x.same_data(y),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for StoreItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StoreItem {}
