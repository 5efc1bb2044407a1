use std::sync::Arc;
use std::time::Duration;
use storefront::clients::StoreApi;
use storefront::config::{MockConfig, MockTiming, StoreConfig};
use storefront::error::StoreError;
use storefront::lifecycle::StoreSystem;
use storefront::model::{Interaction, TransactionRequest, TransactionType, CATEGORY_ALL, CATEGORY_OTHER};
use storefront::provider::MockStoreDataProvider;
use storefront::state::StoreState;

fn instant_system(items: usize) -> StoreSystem {
    StoreSystem::new(StoreConfig {
        mock: MockConfig::instant().with_seed(7).with_dummy_item_count(items),
        ..StoreConfig::default()
    })
}

/// Full system: real actor, simulated backend with zero latency.
#[tokio::test]
async fn test_open_purchase_and_sell_round_trip() {
    let system = instant_system(3);
    let store = &system.store_client;

    store.open().await.unwrap();
    let snapshot = store.wait_until_ready().await.unwrap();
    assert_eq!(snapshot.player_currency, Some(500));
    assert_eq!(snapshot.available_items.len(), 3);
    assert!(snapshot.owned_items.is_empty());
    let tags: Vec<_> = snapshot.categories.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, vec![CATEGORY_ALL, CATEGORY_OTHER]);

    // Clicking an affordable item selects it for purchase
    store.click_item("item_2".into(), "grid".into()).await.unwrap();
    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot.transaction_type, TransactionType::Purchase);
    assert_eq!(snapshot.selected_item.as_ref().map(|i| i.id.as_str()), Some("item_2"));
    assert_eq!(snapshot.status_message, "Clicked on item: Mock Store Item 2 (from grid)");

    store.purchase("item_2".into()).await.unwrap();
    let snapshot = store.wait_until_ready().await.unwrap();
    assert_eq!(snapshot.player_currency, Some(485));
    assert!(snapshot.find_available("item_2").is_none());
    assert!(snapshot.find_owned("item_2").is_some_and(|i| i.owned));
    assert_eq!(snapshot.transaction_request, TransactionRequest::default());
    assert_eq!(snapshot.transaction_type, TransactionType::None);
    assert_eq!(snapshot.selected_item, None);

    // Owned items flip the click to a sale
    store.click_item("item_2".into(), "inventory".into()).await.unwrap();
    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot.transaction_type, TransactionType::Sell);

    store.sell("item_2".into()).await.unwrap();
    let snapshot = store.wait_until_ready().await.unwrap();
    assert_eq!(snapshot.player_currency, Some(492));
    assert!(snapshot.find_owned("item_2").is_none());
    assert!(snapshot.find_available("item_2").is_some());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_purchase_surfaces_backend_error() {
    // item_100 costs 505, one more than the starting balance can cover
    let system = instant_system(100);
    let store = &system.store_client;

    store.open().await.unwrap();
    store.wait_until_ready().await.unwrap();

    store.click_item("item_100".into(), "grid".into()).await.unwrap();
    assert_eq!(store.snapshot().await.unwrap().transaction_type, TransactionType::None);

    store.purchase("item_100".into()).await.unwrap();
    let snapshot = store.wait_until_idle().await.unwrap();
    assert!(snapshot.has_state(StoreState::Error));
    assert!(snapshot.error_message.starts_with("Insufficient currency or item owned"));
    assert_eq!(snapshot.player_currency, Some(500));
    assert!(snapshot.find_available("item_100").is_some());

    store.request_refresh().await.unwrap();
    let snapshot = store.wait_until_ready().await.unwrap();
    assert!(snapshot.error_message.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_transaction_while_loading_is_not_ready() {
    let slow = MockTiming::new(0.0, 1.0, 2.0);
    let config = StoreConfig {
        mock: MockConfig {
            store_items: slow,
            owned_items: slow,
            player_currency: slow,
            ..MockConfig::instant().with_seed(1)
        },
        ..StoreConfig::default()
    };
    let system = StoreSystem::new(config);
    let store = &system.store_client;

    let opened = store.open().await.unwrap();
    assert!(opened.has_state(StoreState::LoadingItems));
    assert!(opened.has_state(StoreState::LoadingOwned));
    assert!(opened.has_state(StoreState::LoadingCurrency));
    assert!(!opened.has_state(StoreState::Uninitialized));

    let result = store.purchase("item_1".into()).await;
    assert_eq!(result, Err(StoreError::NotReady));

    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot.error_message, "Store not ready. Please try again later.");
    assert_eq!(snapshot.transaction_request, TransactionRequest::default());
    assert!(snapshot.has_state(StoreState::Error));

    // Loads still finish; the error keeps the store from becoming ready
    let snapshot = store.wait_until_idle().await.unwrap();
    assert_eq!(snapshot.states, vec![StoreState::Error]);
    assert_eq!(snapshot.player_currency, Some(500));

    store.clear_error().await.unwrap();
    assert_eq!(store.states().await.unwrap(), vec![StoreState::Ready]);

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_refresh_during_load_waits_for_the_new_fetch() {
    let config = StoreConfig {
        mock: MockConfig {
            store_items: MockTiming::new(0.0, 1.0, 1.0),
            ..MockConfig::instant().with_seed(5).with_dummy_item_count(2)
        },
        ..StoreConfig::default()
    };
    let system = StoreSystem::new(config);
    let store = &system.store_client;

    store.open().await.unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;
    store.request_refresh().await.unwrap();

    // Past the first fetch's deadline, short of the second's
    tokio::time::sleep(Duration::from_millis(600)).await;
    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot.states, vec![StoreState::LoadingItems]);
    assert!(snapshot.available_items.is_empty());
    assert_eq!(store.purchase("item_1".into()).await, Err(StoreError::NotReady));
    store.clear_error().await.unwrap();

    let snapshot = store.wait_until_ready().await.unwrap();
    assert_eq!(snapshot.available_items.len(), 2);

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_store_items_that_always_fail_give_up_after_retries() {
    let config = MockConfig {
        store_items: MockTiming::new(1.0, 0.5, 0.5),
        ..MockConfig::instant().with_seed(3)
    };
    let provider = Arc::new(MockStoreDataProvider::new(config));
    let system = StoreSystem::with_provider(provider.clone(), 8);
    let store = &system.store_client;

    store.open().await.unwrap();
    let snapshot = store.wait_until_idle().await.unwrap();
    assert_eq!(snapshot.error_message, "Failed to load store items.");
    assert!(snapshot.available_items.is_empty());
    assert_eq!(snapshot.player_currency, Some(500));

    store.request_refresh().await.unwrap();
    assert!(provider.is_pending(storefront::provider::ProviderOperation::StoreItems));
    let snapshot = store.wait_until_idle().await.unwrap();
    assert_eq!(snapshot.error_message, "Failed to load store items.");

    assert_eq!(
        store.refresh_until_ready(3).await,
        Err(StoreError::ProviderFailure("Failed to load store items.".into()))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_hover_preview_and_category_filter() {
    let system = instant_system(12);
    let store = &system.store_client;

    store.open().await.unwrap();
    store.wait_until_ready().await.unwrap();

    store
        .interact_item("item_3", Interaction::hovered("grid"))
        .await
        .unwrap();
    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot.previewed_item.as_ref().map(|i| i.id.as_str()), Some("item_3"));
    assert_eq!(snapshot.status_message, "Previewing item: Mock Store Item 3 (from grid)");

    store
        .interact_item("item_3", Interaction::unhovered("grid"))
        .await
        .unwrap();
    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot.previewed_item, None);
    assert!(snapshot.status_message.is_empty());

    store.set_filter_text("Item 1").await.unwrap();
    let snapshot = store.snapshot().await.unwrap();
    let ids: Vec<_> = snapshot.available_items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["item_1", "item_10", "item_11", "item_12"]);

    store
        .interact_category("Item.Category.Weapon", Interaction::clicked("tabs"))
        .await
        .unwrap();
    assert!(store.snapshot().await.unwrap().selected_categories.is_empty());

    store.set_selected_categories(vec!["Item.Category.Weapon".into()]).await.unwrap();
    assert!(store.snapshot().await.unwrap().available_items.is_empty());

    store
        .interact_category(CATEGORY_ALL, Interaction::clicked("tabs"))
        .await
        .unwrap();
    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot.available_items.len(), 4);
    assert_eq!(snapshot.status_message, "Selected category: Item.Category.All, from tabs");

    system.shutdown().await.unwrap();
}
