//! # Mock Store Data Provider
//!
//! A simulated backend. Every call draws a random latency from its
//! [`MockTiming`], then rolls against the failure chance when the timer
//! fires. On success the call is served from an in-memory [`Ledger`] that is
//! filled with dummy data the first time any call reaches the backend.
//!
//! Each [`ProviderOperation`] has its own timer slot. Issuing the same
//! operation again while one is in flight cancels the earlier one, so its
//! callbacks never run.

use super::dummy;
use super::scheduler::{roll_failure, sample_delay, TimerSlots};
use super::{
    CurrencyCallback, FailureCallback, ItemsCallback, ProviderOperation, StatusCallback,
    StoreDataProvider,
};
use crate::config::{MockConfig, MockTiming};
use crate::error::StoreError;
use crate::ledger::Ledger;
use crate::model::TransactionRequest;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct BackendState {
    ledger: Ledger,
    seeded: bool,
}

impl BackendState {
    /// Fills the ledger with dummy data on first touch. Store items, owned
    /// items and currency are seeded together, so a transaction that runs
    /// before one of the fetches is never overwritten by a late seed.
    fn seeded(&mut self, count: usize) -> &mut Ledger {
        if !self.seeded {
            let available = dummy::store_items(count);
            let owned = dummy::owned_items(&available);
            self.ledger = Ledger::new(available, Vec::new(), dummy::DUMMY_PLAYER_CURRENCY);
            self.ledger.set_owned(owned);
            self.seeded = true;
            info!(
                items = self.ledger.available().len(),
                owned = self.ledger.owned().len(),
                currency = self.ledger.currency(),
                "Generated dummy store data"
            );
        }
        &mut self.ledger
    }
}

struct MockBackend {
    config: MockConfig,
    rng: Mutex<StdRng>,
    state: Mutex<BackendState>,
}

impl MockBackend {
    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_ledger<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        let mut state = self.state();
        f(state.seeded(self.config.dummy_item_count))
    }
}

/// Simulated [`StoreDataProvider`] with random latency and failures.
///
/// Timers are spawned on the current Tokio runtime unless the configured
/// delay is zero, in which case the call completes inline.
pub struct MockStoreDataProvider {
    backend: Arc<MockBackend>,
    timers: TimerSlots<ProviderOperation>,
}

impl MockStoreDataProvider {
    pub fn new(config: MockConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            backend: Arc::new(MockBackend {
                config,
                rng: Mutex::new(rng),
                state: Mutex::new(BackendState::default()),
            }),
            timers: TimerSlots::new(),
        }
    }

    /// Whether a call for `op` is still waiting on its timer.
    pub fn is_pending(&self, op: ProviderOperation) -> bool {
        self.timers.is_pending(op)
    }

    #[cfg(test)]
    fn ledger(&self) -> Ledger {
        self.backend.with_ledger(|ledger| ledger.clone())
    }

    fn timing(&self, op: ProviderOperation) -> MockTiming {
        let config = &self.backend.config;
        let timing = match op {
            ProviderOperation::StoreItems => config.store_items,
            ProviderOperation::OwnedItems => config.owned_items,
            ProviderOperation::PlayerCurrency => config.player_currency,
            ProviderOperation::Purchase => config.purchase,
            ProviderOperation::Sell => config.sell,
        };
        timing.normalized()
    }

    /// Schedules `serve` behind a simulated delay and failure roll. An error
    /// returned by `serve` is routed to `on_failure` as well.
    fn simulate<F>(&self, op: ProviderOperation, on_failure: FailureCallback, serve: F)
    where
        F: FnOnce(&MockBackend) -> Result<(), StoreError> + Send + 'static,
    {
        let timing = self.timing(op);
        let delay = sample_delay(&mut *self.backend.rng(), &timing);
        debug!(%op, delay_ms = delay.as_millis() as u64, "Simulating backend call");

        let backend = Arc::clone(&self.backend);
        self.timers.schedule(op, delay, move || {
            if roll_failure(&mut *backend.rng(), timing.failure_chance) {
                warn!(%op, "Simulated backend failure");
                on_failure(StoreError::ProviderFailure(op.failure_message().to_string()));
                return;
            }
            if let Err(e) = serve(&backend) {
                warn!(%op, error = %e, "Backend rejected call");
                on_failure(e);
            }
        });
    }
}

impl StoreDataProvider for MockStoreDataProvider {
    fn fetch_store_items(&self, on_success: ItemsCallback, on_failure: FailureCallback) {
        self.simulate(ProviderOperation::StoreItems, on_failure, |backend| {
            let items = backend.with_ledger(|ledger| ledger.available().to_vec());
            on_success(items, ProviderOperation::StoreItems.success_message().to_string());
            Ok(())
        });
    }

    fn fetch_owned_items(&self, on_success: ItemsCallback, on_failure: FailureCallback) {
        self.simulate(ProviderOperation::OwnedItems, on_failure, |backend| {
            let items = backend.with_ledger(|ledger| ledger.owned().to_vec());
            on_success(items, ProviderOperation::OwnedItems.success_message().to_string());
            Ok(())
        });
    }

    fn fetch_player_currency(&self, on_success: CurrencyCallback, on_failure: FailureCallback) {
        self.simulate(ProviderOperation::PlayerCurrency, on_failure, |backend| {
            let currency = backend.with_ledger(|ledger| ledger.currency());
            on_success(currency, ProviderOperation::PlayerCurrency.success_message().to_string());
            Ok(())
        });
    }

    fn purchase_item(
        &self,
        request: TransactionRequest,
        on_success: StatusCallback,
        on_failure: FailureCallback,
    ) {
        info!(%request, "Backend purchase requested");
        self.simulate(ProviderOperation::Purchase, on_failure, move |backend| {
            backend.with_ledger(|ledger| ledger.purchase(&request.item_id))?;
            on_success(ProviderOperation::Purchase.success_message().to_string());
            Ok(())
        });
    }

    fn sell_item(
        &self,
        request: TransactionRequest,
        on_success: StatusCallback,
        on_failure: FailureCallback,
    ) {
        info!(%request, "Backend sale requested");
        self.simulate(ProviderOperation::Sell, on_failure, move |backend| {
            backend.with_ledger(|ledger| ledger.sell(&request.item_id))?;
            on_success(ProviderOperation::Sell.success_message().to_string());
            Ok(())
        });
    }

    fn cancel_pending(&self) {
        self.timers.cancel_all();
    }
}
