//! Store configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The mock provider timings default to the tuning used by the
//! demo store: store items are slow and occasionally fail, everything else
//! answers within 300ms and never fails.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `STOREFRONT_STORE_ITEMS_FAILURE_CHANCE` | `0.15` |
//! | `STOREFRONT_STORE_ITEMS_MIN_DELAY` / `_MAX_DELAY` | `3.5` / `8.5` s |
//! | `STOREFRONT_{OWNED_ITEMS,PLAYER_CURRENCY,PURCHASE,SELL}_FAILURE_CHANCE` | `0.0` |
//! | `STOREFRONT_{OWNED_ITEMS,PLAYER_CURRENCY,PURCHASE,SELL}_MIN_DELAY` / `_MAX_DELAY` | `0.0` / `0.3` s |
//! | `STOREFRONT_DUMMY_ITEM_COUNT` | `12` |
//! | `STOREFRONT_SEED` | unset (entropy) |
//! | `STOREFRONT_MAILBOX_CAPACITY` | `32` |

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

const ENV_PREFIX: &str = "STOREFRONT";

/// Failure chance and delay bounds for one simulated backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MockTiming {
    /// Probability in `[0, 1]` that the operation fails.
    pub failure_chance: f64,
    /// Minimum simulated latency in seconds.
    pub min_delay: f64,
    /// Maximum simulated latency in seconds.
    pub max_delay: f64,
}

impl MockTiming {
    pub const fn new(failure_chance: f64, min_delay: f64, max_delay: f64) -> Self {
        Self {
            failure_chance,
            min_delay,
            max_delay,
        }
    }

    /// Answers immediately and never fails.
    pub const fn instant() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Clamps the chance into `[0, 1]`, negative or NaN delays to zero, and
    /// swaps the bounds if they are inverted.
    pub fn normalized(self) -> Self {
        let clamp_delay = |d: f64| if d.is_finite() && d > 0.0 { d } else { 0.0 };
        let failure_chance = if self.failure_chance.is_nan() {
            0.0
        } else {
            self.failure_chance.clamp(0.0, 1.0)
        };
        let (min, max) = (clamp_delay(self.min_delay), clamp_delay(self.max_delay));
        Self {
            failure_chance,
            min_delay: min.min(max),
            max_delay: min.max(max),
        }
    }

    pub fn min_duration(&self) -> Duration {
        Duration::from_secs_f64(self.min_delay)
    }
}

impl Default for MockTiming {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.3)
    }
}

/// Tuning for [`MockStoreDataProvider`](crate::provider::MockStoreDataProvider).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockConfig {
    pub store_items: MockTiming,
    pub owned_items: MockTiming,
    pub player_currency: MockTiming,
    pub purchase: MockTiming,
    pub sell: MockTiming,
    /// Number of generated store items, clamped to `1..=10000`.
    pub dummy_item_count: usize,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl MockConfig {
    /// Every operation answers immediately and succeeds.
    pub fn instant() -> Self {
        Self {
            store_items: MockTiming::instant(),
            owned_items: MockTiming::instant(),
            player_currency: MockTiming::instant(),
            purchase: MockTiming::instant(),
            sell: MockTiming::instant(),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_dummy_item_count(mut self, count: usize) -> Self {
        self.dummy_item_count = count;
        self
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            store_items: MockTiming::new(0.15, 3.5, 8.5),
            owned_items: MockTiming::default(),
            player_currency: MockTiming::default(),
            purchase: MockTiming::default(),
            sell: MockTiming::default(),
            dummy_item_count: 12,
            seed: None,
        }
    }
}

/// Top level configuration for a [`StoreSystem`](crate::lifecycle::StoreSystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub mock: MockConfig,
    /// Capacity of the store actor's request channel.
    pub mailbox_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mock: MockConfig::default(),
            mailbox_capacity: 32,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timing = |name: &str, fallback: MockTiming| -> Result<MockTiming, ConfigError> {
            Ok(MockTiming {
                failure_chance: parse_var(&lookup, &format!("{name}_FAILURE_CHANCE"), fallback.failure_chance)?,
                min_delay: parse_var(&lookup, &format!("{name}_MIN_DELAY"), fallback.min_delay)?,
                max_delay: parse_var(&lookup, &format!("{name}_MAX_DELAY"), fallback.max_delay)?,
            }
            .normalized())
        };

        let mock = MockConfig {
            store_items: timing("STORE_ITEMS", defaults.mock.store_items)?,
            owned_items: timing("OWNED_ITEMS", defaults.mock.owned_items)?,
            player_currency: timing("PLAYER_CURRENCY", defaults.mock.player_currency)?,
            purchase: timing("PURCHASE", defaults.mock.purchase)?,
            sell: timing("SELL", defaults.mock.sell)?,
            dummy_item_count: parse_var(&lookup, "DUMMY_ITEM_COUNT", defaults.mock.dummy_item_count)?,
            seed: match lookup(&env_key("SEED")) {
                Some(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::InvalidValue(env_key("SEED")))?),
                None => None,
            },
        };

        let mailbox_capacity = parse_var(&lookup, "MAILBOX_CAPACITY", defaults.mailbox_capacity)?;
        if mailbox_capacity == 0 {
            return Err(ConfigError::InvalidValue(env_key("MAILBOX_CAPACITY")));
        }

        Ok(Self {
            mock,
            mailbox_capacity,
        })
    }
}

fn env_key(name: &str) -> String {
    format!("{ENV_PREFIX}_{name}")
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    let key = env_key(name);
    match lookup(&key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue(key)),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.mock.store_items, MockTiming::new(0.15, 3.5, 8.5));
        assert_eq!(config.mock.purchase, MockTiming::new(0.0, 0.0, 0.3));
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("STOREFRONT_PURCHASE_FAILURE_CHANCE", "0.5"),
            ("STOREFRONT_PURCHASE_MAX_DELAY", "2"),
            ("STOREFRONT_DUMMY_ITEM_COUNT", "3"),
            ("STOREFRONT_SEED", "99"),
        ]))
        .unwrap();

        assert_eq!(config.mock.purchase, MockTiming::new(0.5, 0.0, 2.0));
        assert_eq!(config.mock.dummy_item_count, 3);
        assert_eq!(config.mock.seed, Some(99));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = StoreConfig::from_lookup(lookup(&[("STOREFRONT_SELL_MIN_DELAY", "soon")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue("STOREFRONT_SELL_MIN_DELAY".to_string()));

        let err = StoreConfig::from_lookup(lookup(&[("STOREFRONT_MAILBOX_CAPACITY", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue("STOREFRONT_MAILBOX_CAPACITY".to_string()));
    }

    #[test]
    fn test_timing_is_normalized() {
        let timing = MockTiming::new(1.7, 2.0, -1.0).normalized();
        assert_eq!(timing, MockTiming::new(1.0, 0.0, 2.0));

        let timing = MockTiming::new(-0.2, 3.0, 1.0).normalized();
        assert_eq!(timing, MockTiming::new(0.0, 1.0, 3.0));
    }
}
