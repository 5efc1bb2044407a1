//! # Storefront demo
//!
//! Opens a store backed by the simulated provider, waits for it to load,
//! buys the cheapest affordable item and sells it back.
//!
//! Timings come from `STOREFRONT_*` environment variables (see
//! [`storefront::config`]). Store items take several seconds to load by
//! default and fail now and then; the demo refreshes until they arrive.

use storefront::clients::{StoreApi, StoreClient};
use storefront::config::StoreConfig;
use storefront::lifecycle::{setup_tracing, StoreSystem};
use storefront::model::TransactionType;
use tracing::{error, info, warn, Instrument};

const MAX_REFRESHES: usize = 5;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = StoreConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting storefront demo");

    let system = StoreSystem::new(config);
    let outcome = run(&system.store_client).await;
    if let Err(e) = &outcome {
        error!(error = %e, "Demo stopped early");
    }

    system.shutdown().await?;
    outcome
}

async fn run(store: &StoreClient) -> Result<(), String> {
    let span = tracing::info_span!("store_open");
    let snapshot = async {
        store.open().await.map_err(|e| e.to_string())?;
        store.refresh_until_ready(MAX_REFRESHES).await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(
        currency = ?snapshot.player_currency,
        available = snapshot.available_items.len(),
        owned = snapshot.owned_items.len(),
        "Store ready"
    );

    let Some(item) = snapshot.available_items.iter().min_by_key(|item| item.cost).cloned() else {
        warn!("Nothing for sale");
        return Ok(());
    };

    let span = tracing::info_span!("purchase", item_id = %item.id);
    let bought = async {
        store
            .click_item(item.id.clone(), "demo".to_string())
            .await
            .map_err(|e| e.to_string())?;
        let selected = store.snapshot().await.map_err(|e| e.to_string())?;
        if selected.transaction_type != TransactionType::Purchase {
            return Err(format!("{} cannot be purchased", item.id));
        }

        store.purchase(item.id.clone()).await.map_err(|e| e.to_string())?;
        let outcome = store.wait_until_idle().await.map_err(|e| e.to_string())?;
        // The purchase itself may succeed while the reload after it fails.
        let after = store.refresh_until_ready(MAX_REFRESHES).await.map_err(|e| e.to_string())?;
        let bought = after.find_owned(&item.id).is_some();
        if bought {
            info!(currency = ?after.player_currency, "Purchased");
        } else {
            warn!(error = %outcome.error_message, "Purchase did not go through");
        }
        Ok::<_, String>(bought)
    }
    .instrument(span)
    .await?;

    if !bought {
        return Ok(());
    }

    let span = tracing::info_span!("sale", item_id = %item.id);
    async {
        store.sell(item.id.clone()).await.map_err(|e| e.to_string())?;
        let outcome = store.wait_until_idle().await.map_err(|e| e.to_string())?;
        let after = store.refresh_until_ready(MAX_REFRESHES).await.map_err(|e| e.to_string())?;
        if after.find_owned(&item.id).is_some() {
            warn!(error = %outcome.error_message, "Sale did not go through");
        } else {
            info!(currency = ?after.player_currency, "Sold");
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await
}
