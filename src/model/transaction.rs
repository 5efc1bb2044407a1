use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way a transaction moves an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[default]
    None,
    Purchase,
    Sell,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::None => "None",
            TransactionType::Purchase => "Purchase",
            TransactionType::Sell => "Sell",
        };
        f.write_str(label)
    }
}

/// A request written by the UI to buy or sell a single item.
///
/// This is an intent channel: the UI sets it, the store processes it and
/// resets it to the empty request once the transaction has gone through.
/// `TransactionRequest::default()` means no request is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub item_id: String,
    pub kind: TransactionType,
}

impl TransactionRequest {
    pub fn new(item_id: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
        }
    }

    pub fn purchase(item_id: impl Into<String>) -> Self {
        Self::new(item_id, TransactionType::Purchase)
    }

    pub fn sell(item_id: impl Into<String>) -> Self {
        Self::new(item_id, TransactionType::Sell)
    }

    /// A request is actionable only with an item and a direction.
    pub fn is_valid(&self) -> bool {
        !self.item_id.is_empty() && self.kind != TransactionType::None
    }
}

impl fmt::Display for TransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validity() {
        assert!(!TransactionRequest::default().is_valid());
        assert!(!TransactionRequest::new("", TransactionType::Purchase).is_valid());
        assert!(!TransactionRequest::new("item_1", TransactionType::None).is_valid());
        assert!(TransactionRequest::purchase("item_1").is_valid());
        assert!(TransactionRequest::sell("item_1").is_valid());
    }

    #[test]
    fn test_request_display() {
        assert_eq!(TransactionRequest::sell("item_7").to_string(), "Sell(item_7)");
    }
}
