use crate::clients::StoreClient;
use crate::error::StoreError;
use crate::model::{Interaction, TransactionRequest};
use crate::store_actor::StoreSnapshot;
use async_trait::async_trait;
use tokio::sync::watch;

/// Higher level store operations built on a handful of primitive intents.
///
/// Implementors only provide the primitives; purchase, sale, clicks and the
/// waiting helpers come for free.
#[async_trait]
pub trait StoreApi: Send + Sync {
    async fn request_transaction(&self, request: TransactionRequest) -> Result<(), StoreError>;

    async fn interact_item(&self, item_id: String, interaction: Interaction) -> Result<(), StoreError>;

    async fn subscribe(&self) -> Result<watch::Receiver<StoreSnapshot>, StoreError>;

    async fn request_refresh(&self) -> Result<(), StoreError>;

    /// Submit a purchase of `item_id`.
    #[tracing::instrument(skip(self))]
    async fn purchase(&self, item_id: String) -> Result<(), StoreError> {
        tracing::debug!("Sending request");
        self.request_transaction(TransactionRequest::purchase(item_id)).await
    }

    /// Submit a sale of `item_id`.
    #[tracing::instrument(skip(self))]
    async fn sell(&self, item_id: String) -> Result<(), StoreError> {
        tracing::debug!("Sending request");
        self.request_transaction(TransactionRequest::sell(item_id)).await
    }

    /// Hover then click an item, as a pointer would.
    async fn click_item(&self, item_id: String, source: String) -> Result<(), StoreError> {
        self.interact_item(item_id.clone(), Interaction::hovered(source.clone())).await?;
        self.interact_item(item_id, Interaction::clicked(source)).await
    }

    /// Resolves with the first snapshot that has no load or transaction in flight.
    async fn wait_until_idle(&self) -> Result<StoreSnapshot, StoreError> {
        let mut snapshots = self.subscribe().await?;
        let snapshot = snapshots
            .wait_for(StoreSnapshot::is_idle)
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        Ok(snapshot.clone())
    }

    /// Waits for in-flight work, then refreshes after each failure until the
    /// store is ready or `max_refreshes` reloads have been tried.
    ///
    /// # Errors
    /// The last error message as [`StoreError::ProviderFailure`] when the
    /// store never became ready.
    async fn refresh_until_ready(&self, max_refreshes: usize) -> Result<StoreSnapshot, StoreError> {
        let mut snapshot = self.wait_until_idle().await?;
        let mut refreshes = 0;
        while !snapshot.is_ready() {
            if refreshes == max_refreshes {
                return Err(StoreError::ProviderFailure(snapshot.error_message));
            }
            refreshes += 1;
            tracing::warn!(error = %snapshot.error_message, attempt = refreshes, "Store not ready, refreshing");
            self.request_refresh().await?;
            snapshot = self.wait_until_idle().await?;
        }
        Ok(snapshot)
    }

    /// Resolves with the first snapshot in which the store is ready.
    async fn wait_until_ready(&self) -> Result<StoreSnapshot, StoreError> {
        let mut snapshots = self.subscribe().await?;
        let snapshot = snapshots
            .wait_for(StoreSnapshot::is_ready)
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        Ok(snapshot.clone())
    }
}

#[async_trait]
impl StoreApi for StoreClient {
    async fn request_transaction(&self, request: TransactionRequest) -> Result<(), StoreError> {
        StoreClient::request_transaction(self, request).await
    }

    async fn interact_item(&self, item_id: String, interaction: Interaction) -> Result<(), StoreError> {
        StoreClient::interact_item(self, item_id, interaction).await
    }

    async fn subscribe(&self) -> Result<watch::Receiver<StoreSnapshot>, StoreError> {
        StoreClient::subscribe(self).await
    }

    async fn request_refresh(&self) -> Result<(), StoreError> {
        StoreClient::request_refresh(self).await
    }
}
