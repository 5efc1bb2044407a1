//! # Scripted Provider
//!
//! A [`StoreDataProvider`] test double driven by an expectation queue.
//!
//! Each provider call pops the next expectation and answers immediately,
//! on the caller's task. A call that does not match the head of the queue
//! panics, which surfaces as a failed test.
//!
//! ```ignore
//! let provider = ScriptedProvider::new();
//! provider.expect_fetch_store_items().return_ok(items);
//! provider.expect_fetch_owned_items().return_ok(vec![]);
//! provider.expect_fetch_player_currency().return_ok(500);
//! provider.expect_purchase("item_1").return_err(StoreError::NotReady);
//!
//! // ... drive the store ...
//! provider.verify(); // Ensures all expectations were met
//! ```

use super::{
    CurrencyCallback, FailureCallback, ItemsCallback, ProviderOperation, StatusCallback,
    StoreDataProvider,
};
use crate::error::StoreError;
use crate::model::{StoreItem, TransactionRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

enum Expectation {
    StoreItems(Result<Vec<StoreItem>, StoreError>),
    OwnedItems(Result<Vec<StoreItem>, StoreError>),
    PlayerCurrency(Result<u32, StoreError>),
    Purchase {
        item_id: String,
        response: Result<(), StoreError>,
    },
    Sell {
        item_id: String,
        response: Result<(), StoreError>,
    },
}

impl Expectation {
    fn operation(&self) -> ProviderOperation {
        match self {
            Expectation::StoreItems(_) => ProviderOperation::StoreItems,
            Expectation::OwnedItems(_) => ProviderOperation::OwnedItems,
            Expectation::PlayerCurrency(_) => ProviderOperation::PlayerCurrency,
            Expectation::Purchase { .. } => ProviderOperation::Purchase,
            Expectation::Sell { .. } => ProviderOperation::Sell,
        }
    }
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

#[derive(Clone, Default)]
pub struct ScriptedProvider {
    expectations: Queue,
    calls: Arc<Mutex<Vec<ProviderOperation>>>,
}

impl ScriptedProvider {
    /// Creates a provider with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_fetch_store_items(&self) -> ItemsExpectationBuilder {
        ItemsExpectationBuilder {
            owned: false,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_fetch_owned_items(&self) -> ItemsExpectationBuilder {
        ItemsExpectationBuilder {
            owned: true,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_fetch_player_currency(&self) -> CurrencyExpectationBuilder {
        CurrencyExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_purchase(&self, item_id: impl Into<String>) -> TransactionExpectationBuilder {
        TransactionExpectationBuilder {
            kind: ProviderOperation::Purchase,
            item_id: item_id.into(),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_sell(&self, item_id: impl Into<String>) -> TransactionExpectationBuilder {
        TransactionExpectationBuilder {
            kind: ProviderOperation::Sell,
            item_id: item_id.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Queues a full successful refresh: store items, owned items, currency.
    pub fn expect_refresh(&self, available: Vec<StoreItem>, owned: Vec<StoreItem>, currency: u32) {
        self.expect_fetch_store_items().return_ok(available);
        self.expect_fetch_owned_items().return_ok(owned);
        self.expect_fetch_player_currency().return_ok(currency);
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ProviderOperation> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let pending: Vec<_> = exps.iter().map(|e| e.operation()).collect();
            panic!("Not all expectations were met. {} remaining: {:?}", exps.len(), pending);
        }
    }

    fn next(&self, op: ProviderOperation) -> Expectation {
        self.calls.lock().unwrap().push(op);
        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(expectation) if expectation.operation() == op => expectation,
            Some(other) => panic!("Unexpected {op} call, expected {}", other.operation()),
            None => panic!("Unexpected {op} call, no expectations left"),
        }
    }
}

impl StoreDataProvider for ScriptedProvider {
    fn fetch_store_items(&self, on_success: ItemsCallback, on_failure: FailureCallback) {
        match self.next(ProviderOperation::StoreItems) {
            Expectation::StoreItems(Ok(items)) => {
                on_success(items, ProviderOperation::StoreItems.success_message().to_string())
            }
            Expectation::StoreItems(Err(e)) => on_failure(e),
            _ => unreachable!(),
        }
    }

    fn fetch_owned_items(&self, on_success: ItemsCallback, on_failure: FailureCallback) {
        match self.next(ProviderOperation::OwnedItems) {
            Expectation::OwnedItems(Ok(items)) => {
                on_success(items, ProviderOperation::OwnedItems.success_message().to_string())
            }
            Expectation::OwnedItems(Err(e)) => on_failure(e),
            _ => unreachable!(),
        }
    }

    fn fetch_player_currency(&self, on_success: CurrencyCallback, on_failure: FailureCallback) {
        match self.next(ProviderOperation::PlayerCurrency) {
            Expectation::PlayerCurrency(Ok(amount)) => {
                on_success(amount, ProviderOperation::PlayerCurrency.success_message().to_string())
            }
            Expectation::PlayerCurrency(Err(e)) => on_failure(e),
            _ => unreachable!(),
        }
    }

    fn purchase_item(
        &self,
        request: TransactionRequest,
        on_success: StatusCallback,
        on_failure: FailureCallback,
    ) {
        match self.next(ProviderOperation::Purchase) {
            Expectation::Purchase { item_id, response } => {
                assert_eq!(request.item_id, item_id, "purchase for unexpected item");
                match response {
                    Ok(()) => on_success(ProviderOperation::Purchase.success_message().to_string()),
                    Err(e) => on_failure(e),
                }
            }
            _ => unreachable!(),
        }
    }

    fn sell_item(
        &self,
        request: TransactionRequest,
        on_success: StatusCallback,
        on_failure: FailureCallback,
    ) {
        match self.next(ProviderOperation::Sell) {
            Expectation::Sell { item_id, response } => {
                assert_eq!(request.item_id, item_id, "sale for unexpected item");
                match response {
                    Ok(()) => on_success(ProviderOperation::Sell.success_message().to_string()),
                    Err(e) => on_failure(e),
                }
            }
            _ => unreachable!(),
        }
    }
}

/// Builder for store or owned item expectations.
pub struct ItemsExpectationBuilder {
    owned: bool,
    expectations: Queue,
}

impl ItemsExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, items: Vec<StoreItem>) {
        self.push(Ok(items));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<StoreItem>, StoreError>) {
        let expectation = if self.owned {
            Expectation::OwnedItems(response)
        } else {
            Expectation::StoreItems(response)
        };
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Builder for player currency expectations.
pub struct CurrencyExpectationBuilder {
    expectations: Queue,
}

impl CurrencyExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, amount: u32) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::PlayerCurrency(Ok(amount)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::PlayerCurrency(Err(error)));
    }
}

/// Builder for purchase and sale expectations.
pub struct TransactionExpectationBuilder {
    kind: ProviderOperation,
    item_id: String,
    expectations: Queue,
}

impl TransactionExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), StoreError>) {
        let item_id = self.item_id;
        let expectation = match self.kind {
            ProviderOperation::Sell => Expectation::Sell { item_id, response },
            _ => Expectation::Purchase { item_id, response },
        };
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_in_queue_order() {
        let provider = ScriptedProvider::new();
        provider.expect_fetch_player_currency().return_ok(42);
        provider
            .expect_purchase("item_1")
            .return_err(StoreError::ProviderFailure("Purchase failed.".into()));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let s1 = seen.clone();
        provider.fetch_player_currency(
            Box::new(move |amount, _| s1.lock().unwrap().push(format!("{amount}"))),
            Box::new(|_| panic!("unexpected failure")),
        );
        let s2 = seen.clone();
        provider.purchase_item(
            TransactionRequest::purchase("item_1"),
            Box::new(|_| panic!("unexpected success")),
            Box::new(move |e| s2.lock().unwrap().push(e.to_string())),
        );

        assert_eq!(*seen.lock().unwrap(), vec!["42", "Purchase failed."]);
        assert_eq!(
            provider.calls(),
            vec![ProviderOperation::PlayerCurrency, ProviderOperation::Purchase]
        );
        provider.verify();
    }

    #[test]
    #[should_panic(expected = "Unexpected sell call")]
    fn test_mismatch_panics() {
        let provider = ScriptedProvider::new();
        provider.expect_purchase("item_1").return_ok();
        provider.sell_item(
            TransactionRequest::sell("item_1"),
            Box::new(|_| {}),
            Box::new(|_| {}),
        );
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_reports_leftovers() {
        let provider = ScriptedProvider::new();
        provider.expect_fetch_store_items().return_ok(vec![]);
        provider.verify();
    }
}
