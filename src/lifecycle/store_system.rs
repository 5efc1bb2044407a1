use crate::clients::StoreClient;
use crate::config::StoreConfig;
use crate::provider::{MockStoreDataProvider, StoreDataProvider};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the store.
///
/// `StoreSystem` is responsible for:
/// - **Lifecycle Management**: Starting the store actor and stopping it again
/// - **Dependency Wiring**: Handing the actor the data provider it talks to
///
/// # Example
///
/// ```ignore
/// let system = StoreSystem::new(StoreConfig::from_env()?);
///
/// let snapshot = system.store_client.open().await?;
/// system.store_client.purchase("item_1".into()).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    /// Client for interacting with the store actor
    pub store_client: StoreClient,

    /// Task handle for the store actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl StoreSystem {
    /// Starts a store backed by the simulated provider described in `config`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: StoreConfig) -> Self {
        info!(seed = ?config.mock.seed, items = config.mock.dummy_item_count, "Starting store with mock provider");
        let provider = Arc::new(MockStoreDataProvider::new(config.mock));
        Self::with_provider(provider, config.mailbox_capacity)
    }

    /// Starts a store backed by an arbitrary provider.
    pub fn with_provider(provider: Arc<dyn StoreDataProvider>, mailbox_capacity: usize) -> Self {
        let (store_actor, store_client) = crate::store_actor::new(provider, mailbox_capacity);
        let handle = tokio::spawn(store_actor.run());
        Self {
            store_client,
            handle,
        }
    }

    /// Gracefully shuts down the store.
    ///
    /// Dropping the client closes the actor's mailbox. The actor then
    /// cancels every pending provider call, releases its item views and
    /// exits. Clones of the client held elsewhere keep the actor alive, so
    /// drop those first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store...");

        drop(self.store_client);

        if let Err(e) = self.handle.await {
            error!("Store actor task failed: {:?}", e);
            return Err(format!("Store actor task failed: {:?}", e));
        }

        info!("Store shutdown complete.");
        Ok(())
    }
}
