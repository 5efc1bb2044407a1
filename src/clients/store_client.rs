//! # Store Client
//!
//! Typed handle to the store actor. Every method sends one
//! [`StoreRequest`] and awaits the actor's answer; nothing here touches
//! store state directly.

use crate::error::StoreError;
use crate::model::{Interaction, TransactionRequest, TransactionType};
use crate::state::StoreState;
use crate::store_actor::{ItemView, Response, StoreRequest, StoreSnapshot, StoreSubscriptions};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Client for interacting with the store actor.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn call<T>(&self, make: impl FnOnce(Response<T>) -> StoreRequest) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)
    }

    /// Opens the store. The first call starts loading items, owned items and
    /// currency; later calls just return the current snapshot.
    #[instrument(skip(self))]
    pub async fn open(&self) -> Result<StoreSnapshot, StoreError> {
        debug!("Sending request");
        self.call(|respond_to| StoreRequest::Open { respond_to }).await
    }

    #[instrument(skip(self))]
    pub async fn set_filter_text(&self, text: impl Into<String> + std::fmt::Debug) -> Result<(), StoreError> {
        let text = text.into();
        self.call(|respond_to| StoreRequest::SetFilterText { text, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn set_selected_categories(&self, categories: Vec<String>) -> Result<(), StoreError> {
        self.call(|respond_to| StoreRequest::SetSelectedCategories {
            categories,
            respond_to,
        })
        .await
    }

    /// Submits a purchase or sale.
    ///
    /// Returns once the request has been accepted or rejected. The backend
    /// outcome arrives later through the view model: a cleared request and a
    /// refresh on success, an error message and the `Error` state on failure.
    ///
    /// An invalid request (no item or no direction) is silently ignored.
    ///
    /// # Errors
    /// [`StoreError::NotReady`] if the store is loading, transacting, in error
    /// or not yet opened.
    #[instrument(skip(self, request), fields(request = %request))]
    pub async fn request_transaction(&self, request: TransactionRequest) -> Result<(), StoreError> {
        debug!("Sending request");
        self.call(|respond_to| StoreRequest::RequestTransaction { request, respond_to })
            .await?
    }

    #[instrument(skip(self))]
    pub async fn set_transaction_type(&self, kind: TransactionType) -> Result<(), StoreError> {
        self.call(|respond_to| StoreRequest::SetTransactionType { kind, respond_to })
            .await
    }

    /// Clears any error and reloads everything.
    #[instrument(skip(self))]
    pub async fn request_refresh(&self) -> Result<(), StoreError> {
        debug!("Sending request");
        self.call(|respond_to| StoreRequest::Refresh { respond_to }).await
    }

    #[instrument(skip(self))]
    pub async fn clear_error(&self) -> Result<(), StoreError> {
        self.call(|respond_to| StoreRequest::ClearError { respond_to }).await
    }

    #[instrument(skip(self))]
    pub async fn interact_item(
        &self,
        item_id: impl Into<String> + std::fmt::Debug,
        interaction: Interaction,
    ) -> Result<(), StoreError> {
        let item_id = item_id.into();
        self.call(|respond_to| StoreRequest::InteractItem {
            item_id,
            interaction,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn interact_category(
        &self,
        tag: impl Into<String> + std::fmt::Debug,
        interaction: Interaction,
    ) -> Result<(), StoreError> {
        let tag = tag.into();
        self.call(|respond_to| StoreRequest::InteractCategory {
            tag,
            interaction,
            respond_to,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        self.call(|respond_to| StoreRequest::Snapshot { respond_to }).await
    }

    /// Watch channel that receives a new snapshot after every change.
    pub async fn subscribe(&self) -> Result<watch::Receiver<StoreSnapshot>, StoreError> {
        self.call(|respond_to| StoreRequest::Subscribe { respond_to }).await
    }

    /// One watch channel per view-model field.
    pub async fn subscribe_fields(&self) -> Result<StoreSubscriptions, StoreError> {
        self.call(|respond_to| StoreRequest::SubscribeFields { respond_to })
            .await
    }

    pub async fn states(&self) -> Result<Vec<StoreState>, StoreError> {
        self.call(|respond_to| StoreRequest::States { respond_to }).await
    }

    pub async fn item_view(&self, item_id: impl Into<String>) -> Result<Option<ItemView>, StoreError> {
        let item_id = item_id.into();
        self.call(|respond_to| StoreRequest::ItemView { item_id, respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InteractionKind;

    fn create_mock_client(buffer_size: usize) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (StoreClient::new(sender), receiver)
    }

    #[tokio::test]
    async fn test_request_transaction_passes_actor_error_through() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move {
            client
                .request_transaction(TransactionRequest::purchase("item_1"))
                .await
        });

        match receiver.recv().await {
            Some(StoreRequest::RequestTransaction { request, respond_to }) => {
                assert_eq!(request, TransactionRequest::purchase("item_1"));
                respond_to.send(Err(StoreError::NotReady)).unwrap();
            }
            other => panic!("Expected RequestTransaction, got {other:?}"),
        }

        assert_eq!(task.await.unwrap(), Err(StoreError::NotReady));
    }

    #[tokio::test]
    async fn test_interact_item_sends_interaction() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move {
            client
                .interact_item("item_3", Interaction::clicked("grid"))
                .await
        });

        match receiver.recv().await {
            Some(StoreRequest::InteractItem { item_id, interaction, respond_to }) => {
                assert_eq!(item_id, "item_3");
                assert_eq!(interaction.kind, InteractionKind::Clicked);
                assert_eq!(interaction.source, "grid");
                respond_to.send(()).unwrap();
            }
            other => panic!("Expected InteractItem, got {other:?}"),
        }

        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_closed_actor_is_reported() {
        let (client, receiver) = create_mock_client(1);
        drop(receiver);
        assert_eq!(client.snapshot().await, Err(StoreError::ActorClosed));
    }

    #[tokio::test]
    async fn test_dropped_response_is_reported() {
        let (client, mut receiver) = create_mock_client(1);

        let task = tokio::spawn(async move { client.request_refresh().await });
        // Receive the request and drop its responder unanswered.
        drop(receiver.recv().await);

        assert_eq!(task.await.unwrap(), Err(StoreError::ActorDropped));
    }
}
