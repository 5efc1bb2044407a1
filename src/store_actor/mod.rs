//! The store actor: view-model state, intents, and the loop that ties them
//! to a [`StoreDataProvider`].

mod actor;
pub mod messages;
pub mod registry;
pub mod view_model;

pub use actor::*;
pub use messages::*;
pub use registry::*;
pub use view_model::*;

use crate::clients::StoreClient;
use crate::provider::StoreDataProvider;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Creates a new store actor and its client.
///
/// The actor does nothing until it is spawned with [`StoreActor::run`].
pub fn new(provider: Arc<dyn StoreDataProvider>, buffer_size: usize) -> (StoreActor, StoreClient) {
    let (sender, receiver) = mpsc::channel(buffer_size.max(1));
    let actor = StoreActor::new(receiver, provider);
    let client = StoreClient::new(sender);
    (actor, client)
}
