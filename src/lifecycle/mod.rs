//! Runtime orchestration and lifecycle management.
//!
//! # Main Components
//!
//! - [`StoreSystem`] - Wires a data provider to the store actor and shuts it down
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod store_system;
pub mod tracing;

pub use store_system::*;
pub use tracing::*;
