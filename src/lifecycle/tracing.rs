//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber filtered by the
//! `RUST_LOG` environment variable. Module paths are hidden
//! (`with_target(false)`); the structured fields carry the context instead.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Store lifecycle, loads and transactions
//! RUST_LOG=info cargo run
//!
//! # Also show intents, filter passes and simulated delays
//! RUST_LOG=debug cargo run
//!
//! # Only the simulated backend
//! RUST_LOG=storefront::provider=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: Startup, shutdown and teardown of item views
//! - **Loads**: Each dataset as it arrives, with counts
//! - **Transactions**: Request, backend outcome and the resulting balance
//! - **Errors**: Provider failures and rejected transactions, with the reason
//!
//! With `RUST_LOG=info` a purchase reads roughly like:
//!
//! ```text
//! INFO Processing transaction request=Purchase(item_1)
//! INFO Backend purchase requested request=Purchase(item_1)
//! INFO Purchased item_id="item_1" cost=10 balance=490
//! INFO Transaction complete request=Purchase(item_1)
//! INFO Store items loaded count=11
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Field names carry the context, module paths are noise
        .compact() // Compact format shows spans inline (e.g., "request_transaction: ...")
        .init();
}
