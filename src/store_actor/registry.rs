//! Per-item view cache.
//!
//! The store hands out one [`ItemView`] per item id for as long as the store
//! lives. Reloading an item refreshes the cached data in place instead of
//! creating a second view, so anything keyed on the view stays valid across
//! refreshes.

use crate::model::StoreItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A category tag with the display data shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    pub tag: String,
    pub name: String,
    pub description: String,
}

impl CategoryView {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            name: tag.clone(),
            description: format!("Category: {tag}"),
            tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub item: StoreItem,
    pub categories: Vec<CategoryView>,
}

impl ItemView {
    fn new(item: StoreItem) -> Self {
        let categories = item.categories.iter().map(CategoryView::new).collect();
        Self { item, categories }
    }
}

#[derive(Debug, Default)]
pub struct ItemViewRegistry {
    views: HashMap<String, ItemView>,
}

impl ItemViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the view for `item`, creating it on first sight.
    ///
    /// The second value is `true` when the view was just created, so the
    /// caller can register its categories.
    pub fn get_or_create(&mut self, item: &StoreItem) -> (&ItemView, bool) {
        let mut created = false;
        let view = self
            .views
            .entry(item.id.clone())
            .and_modify(|view| view.item = item.clone())
            .or_insert_with(|| {
                created = true;
                ItemView::new(item.clone())
            });
        (view, created)
    }

    pub fn get(&self, item_id: &str) -> Option<&ItemView> {
        self.views.get(item_id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CATEGORY_OTHER;

    #[test]
    fn test_get_or_create_reuses_and_updates() {
        let mut registry = ItemViewRegistry::new();
        let item = StoreItem::new("sword", "Sword", 100).with_category(CATEGORY_OTHER);

        let (view, created) = registry.get_or_create(&item);
        assert!(created);
        assert_eq!(view.categories, vec![CategoryView::new(CATEGORY_OTHER)]);
        assert_eq!(view.categories[0].description, "Category: Item.Category.Other");

        let (view, created) = registry.get_or_create(&item.clone().owned(true));
        assert!(!created);
        assert!(view.item.owned);
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.get("sword").is_none());
    }
}
