//! Typed handles to the store actor.

pub mod store_api;
pub mod store_client;

pub use store_api::*;
pub use store_client::*;
