//! Generated stand-in data for the simulated backend.

use crate::model::{StoreItem, CATEGORY_OTHER};

/// Balance the simulated player starts with.
pub const DUMMY_PLAYER_CURRENCY: u32 = 500;

pub const MAX_DUMMY_ITEMS: usize = 10_000;

const DEFAULT_ICON: &str = "icons/store_item_default";

/// Generates `count` store items, clamped to `1..=10000`.
///
/// Item `n` (1-based) is `item_{n}`, named `Mock Store Item {n}`, costs
/// `10 + 5 * (n - 1)` and is tagged with the "other" category.
pub fn store_items(count: usize) -> Vec<StoreItem> {
    let count = count.clamp(1, MAX_DUMMY_ITEMS);
    (1..=count)
        .map(|n| {
            let id = format!("item_{n}");
            let name = format!("Mock Store Item {n}");
            let cost = 10 + 5 * (n as u32 - 1);
            StoreItem::new(id.clone(), name.clone(), cost)
                .with_description(format!("Dummy description for {name} (Id: {id})"))
                .with_icon(DEFAULT_ICON)
                .with_category(CATEGORY_OTHER)
        })
        .collect()
}

/// The owned list is whatever the store list already flags as owned.
pub fn owned_items(available: &[StoreItem]) -> Vec<StoreItem> {
    available.iter().filter(|item| item.owned).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_items_layout() {
        let items = store_items(3);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, "item_1");
        assert_eq!(items[0].name(), "Mock Store Item 1");
        assert_eq!(items[0].cost, 10);
        assert_eq!(items[2].cost, 20);
        assert!(items.iter().all(|item| item.has_category(CATEGORY_OTHER) && !item.owned));
        assert!(items[1].ui.description.contains("item_2"));
    }

    #[test]
    fn test_count_is_clamped() {
        assert_eq!(store_items(0).len(), 1);
        assert_eq!(store_items(MAX_DUMMY_ITEMS + 5).len(), MAX_DUMMY_ITEMS);
    }

    #[test]
    fn test_owned_items_copies_flagged_entries() {
        let mut items = store_items(4);
        items[1].owned = true;
        let owned = owned_items(&items);
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, "item_2");
    }
}
