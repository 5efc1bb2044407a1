//! Item filter for the "available items" view.

use crate::model::{StoreItem, CATEGORY_ALL};

/// Returns the items that should be visible in the available-items list.
///
/// An item passes when it is not owned, its display name contains `text`
/// (case-sensitive, empty matches everything), and it carries one of the
/// selected `categories`. No selection, or a selection that includes
/// [`CATEGORY_ALL`], accepts every category.
pub fn filter_items(items: &[StoreItem], text: &str, categories: &[String]) -> Vec<StoreItem> {
    items
        .iter()
        .filter(|item| matches(item, text, categories))
        .cloned()
        .collect()
}

pub fn matches(item: &StoreItem, text: &str, categories: &[String]) -> bool {
    if item.owned {
        return false;
    }

    if !text.is_empty() && !item.name().contains(text) {
        return false;
    }

    categories.is_empty()
        || categories.iter().any(|tag| tag == CATEGORY_ALL)
        || categories.iter().any(|tag| item.has_category(tag))
}
