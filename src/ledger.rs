//! # Transaction Ledger
//!
//! The in-memory book of record for a player's store: the items still for
//! sale, the items the player owns and the currency balance. Purchases and
//! sales mutate all three as a unit; a rejected transaction leaves the ledger
//! untouched.
//!
//! The mock backend keeps one of these, which is where the purchase/sell
//! rules are enforced. A real backend would do the same checks server side.

use crate::error::StoreError;
use crate::model::{StoreItem, TransactionType};
use tracing::{debug, info, warn};

/// Outcome of a successful transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub item_id: String,
    pub kind: TransactionType,
    /// Currency debited (purchase) or credited (sale).
    pub amount: u32,
    /// Balance after the transaction.
    pub balance: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    available: Vec<StoreItem>,
    owned: Vec<StoreItem>,
    currency: u32,
}

impl Ledger {
    pub fn new(available: Vec<StoreItem>, owned: Vec<StoreItem>, currency: u32) -> Self {
        Self {
            available,
            owned,
            currency,
        }
    }

    pub fn available(&self) -> &[StoreItem] {
        &self.available
    }

    pub fn owned(&self) -> &[StoreItem] {
        &self.owned
    }

    pub fn currency(&self) -> u32 {
        self.currency
    }

    pub fn set_available(&mut self, items: Vec<StoreItem>) {
        self.available = items;
    }

    /// Replaces the owned list and drops those items from the available list.
    pub fn set_owned(&mut self, items: Vec<StoreItem>) {
        self.available.retain(|item| !items.contains(item));
        self.owned = items;
    }

    pub fn set_currency(&mut self, currency: u32) {
        self.currency = currency;
    }

    /// Moves an item from the available list to the owned list and debits its cost.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] if the item is not for sale.
    /// - [`StoreError::InsufficientFundsOrOwned`] if the balance is below the
    ///   cost or the item is already owned.
    pub fn purchase(&mut self, item_id: &str) -> Result<Receipt, StoreError> {
        let Some(index) = self.available.iter().position(|item| item.id == item_id) else {
            warn!(item_id, "Purchase: item not in store");
            return Err(StoreError::NotFound(item_id.to_string()));
        };

        let item = &self.available[index];
        let already_owned = item.owned || self.owned.contains(item);
        if self.currency < item.cost || already_owned {
            warn!(item_id, cost = item.cost, balance = self.currency, already_owned, "Purchase rejected");
            return Err(StoreError::InsufficientFundsOrOwned {
                item_id: item_id.to_string(),
                cost: item.cost,
                balance: self.currency,
            });
        }

        let mut item = self.available.remove(index);
        item.owned = true;
        self.currency -= item.cost;
        let cost = item.cost;
        debug!(item_id, cost, "Moving item to owned list");
        if !self.owned.contains(&item) {
            self.owned.push(item);
        }

        info!(item_id, cost, balance = self.currency, "Purchased");
        Ok(Receipt {
            item_id: item_id.to_string(),
            kind: TransactionType::Purchase,
            amount: cost,
            balance: self.currency,
        })
    }

    /// Moves an owned item back to the store and credits half its cost, rounded down.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] if the item is not in the owned list.
    /// - [`StoreError::NotOwned`] if the entry is not flagged as owned.
    pub fn sell(&mut self, item_id: &str) -> Result<Receipt, StoreError> {
        let Some(index) = self.owned.iter().position(|item| item.id == item_id) else {
            warn!(item_id, "Sell: item not in owned list");
            return Err(StoreError::NotFound(item_id.to_string()));
        };

        if !self.owned[index].owned {
            warn!(item_id, "Sell rejected: item not owned");
            return Err(StoreError::NotOwned(item_id.to_string()));
        }

        let mut item = self.owned.remove(index);
        item.owned = false;
        let refund = item.cost / 2;
        self.currency = self.currency.saturating_add(refund);
        if !self.available.contains(&item) {
            self.available.push(item);
        }

        info!(item_id, refund, balance = self.currency, "Sold");
        Ok(Receipt {
            item_id: item_id.to_string(),
            kind: TransactionType::Sell,
            amount: refund,
            balance: self.currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Ledger {
        Ledger::new(
            vec![
                StoreItem::new("potion", "Health Potion", 50),
                StoreItem::new("sword", "Sword", 100),
                StoreItem::new("shield", "Shield", 75),
            ],
            vec![StoreItem::new("stick", "Lame Sword", 5).owned(true)],
            500,
        )
    }

    #[test]
    fn test_purchase_moves_item_and_debits() {
        let mut ledger = store();
        let receipt = ledger.purchase("sword").unwrap();

        assert_eq!(receipt.amount, 100);
        assert_eq!(receipt.balance, 400);
        assert_eq!(ledger.currency(), 400);
        assert!(ledger.available().iter().all(|i| i.id != "sword"));

        let owned: Vec<_> = ledger.owned().iter().filter(|i| i.id == "sword").collect();
        assert_eq!(owned.len(), 1);
        assert!(owned[0].owned);
    }

    #[test]
    fn test_purchase_with_insufficient_currency_changes_nothing() {
        let mut ledger = store();
        ledger.set_currency(50);

        let err = ledger.purchase("sword").unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientFundsOrOwned { cost: 100, balance: 50, .. }
        ));
        assert_eq!(ledger.currency(), 50);
        assert!(ledger.available().iter().any(|i| i.id == "sword"));
        assert!(ledger.owned().iter().all(|i| i.id != "sword"));
    }

    #[test]
    fn test_purchase_of_unknown_item() {
        let mut ledger = store();
        assert_eq!(
            ledger.purchase("dragon"),
            Err(StoreError::NotFound("dragon".to_string()))
        );
    }

    #[test]
    fn test_purchase_rejected_when_already_owned() {
        // Same id on both lists; the owned copy wins.
        let mut ledger = Ledger::new(
            vec![StoreItem::new("sword", "Sword", 10)],
            vec![StoreItem::new("sword", "Sword", 10).owned(true)],
            500,
        );
        assert!(matches!(
            ledger.purchase("sword"),
            Err(StoreError::InsufficientFundsOrOwned { .. })
        ));
        assert_eq!(ledger.currency(), 500);
    }

    #[test]
    fn test_purchase_with_exact_balance() {
        let mut ledger = store();
        ledger.set_currency(75);
        let receipt = ledger.purchase("shield").unwrap();
        assert_eq!(receipt.balance, 0);
    }

    #[test]
    fn test_sell_credits_half_cost() {
        let mut ledger = store();
        ledger.purchase("sword").unwrap();
        assert_eq!(ledger.currency(), 400);

        let receipt = ledger.sell("sword").unwrap();
        assert_eq!(receipt.amount, 50);
        assert_eq!(ledger.currency(), 450);

        let sword = ledger.available().iter().find(|i| i.id == "sword").unwrap();
        assert!(!sword.owned);
        assert!(ledger.owned().iter().all(|i| i.id != "sword"));
    }

    #[test]
    fn test_sell_rounds_refund_down() {
        let mut ledger = store();
        let receipt = ledger.sell("stick").unwrap();
        assert_eq!(receipt.amount, 2);
        assert_eq!(ledger.currency(), 502);
    }

    #[test]
    fn test_sell_requires_owned_flag() {
        let mut ledger = Ledger::new(vec![], vec![StoreItem::new("stick", "Stick", 5)], 0);
        assert_eq!(ledger.sell("stick"), Err(StoreError::NotOwned("stick".to_string())));
        assert_eq!(ledger.owned().len(), 1);
        assert_eq!(ledger.currency(), 0);
    }

    #[test]
    fn test_sell_of_item_not_owned_at_all() {
        let mut ledger = store();
        assert_eq!(ledger.sell("potion"), Err(StoreError::NotFound("potion".to_string())));
    }

    #[test]
    fn test_set_owned_removes_from_available() {
        let mut ledger = store();
        ledger.set_owned(vec![StoreItem::new("potion", "Health Potion", 50).owned(true)]);
        assert!(ledger.available().iter().all(|i| i.id != "potion"));
        assert_eq!(ledger.owned().len(), 1);
    }
}
