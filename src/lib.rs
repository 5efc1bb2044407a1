//! # Storefront
//!
//! > **An in-game store backend built as a single Tokio actor.**
//!
//! This crate models a store screen the way an MVVM front end sees it: a view
//! model of observable fields (currency, items, selection, status and error
//! messages, busy states) and a model that reacts to intents written by the
//! UI. The model talks to its backend only through the
//! [`StoreDataProvider`](provider::StoreDataProvider) contract, and ships
//! with a simulated backend that has random latency and failures.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why an Actor?
//!
//! Store state is touched from two directions: UI intents and backend
//! completions. Putting all of it in one task and turning both into messages
//! gives:
//! - **No Locks**: Handlers run one at a time, so the view model is plain data.
//! - **Deterministic Ordering**: Completions are drained before new intents.
//! - **Clean Teardown**: Dropping the last client stops the actor, which cancels
//!   whatever the backend still has in flight.
//!
//! ### Ready Is Derived
//!
//! There is no single status enum. Every in-flight operation adds its own
//! [`StoreState`](state::StoreState); the store is ready exactly when none are
//! left. Errors are one more such state, so an error during a purchase is
//! reported alongside `Purchasing` instead of replacing it.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Domain ([`model`], [`state`], [`ledger`], [`filter`], [`selection`])
//! Plain data and pure rules.
//! - **Key items**: [`StoreItem`](model::StoreItem), [`StoreStateTracker`](state::StoreStateTracker),
//!   [`Ledger`](ledger::Ledger), [`filter_items`](filter::filter_items).
//!
//! ### 2. The Backend ([`provider`])
//! - **Role**: The callback contract plus the simulated backend and a scripted test double.
//! - **Key items**: [`MockStoreDataProvider`](provider::MockStoreDataProvider),
//!   [`ScriptedProvider`](provider::ScriptedProvider), [`TimerSlots`](provider::TimerSlots).
//!
//! ### 3. The Engine ([`store_actor`])
//! - **Role**: Owns the [`StoreViewModel`](store_actor::StoreViewModel) and applies
//!   intents and provider completions to it.
//!
//! ### 4. The Interface ([`clients`])
//! We don't expose raw message passing to the rest of the app.
//! - **Key items**: [`StoreClient`](clients::StoreClient), [`StoreApi`](clients::StoreApi).
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: Loads configuration, starts the actor with its provider and shuts it down.
//! - **Key items**: [`StoreSystem`](lifecycle::StoreSystem), [`StoreConfig`](config::StoreConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs and fast, reliable loads
//! RUST_LOG=info STOREFRONT_STORE_ITEMS_MIN_DELAY=0.5 STOREFRONT_STORE_ITEMS_MAX_DELAY=1 cargo run
//!
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod observable;
pub mod provider;
pub mod selection;
pub mod state;
pub mod store_actor;
