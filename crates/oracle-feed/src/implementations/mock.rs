//! Mock price feed implementation for testing and development.
//!
//! Serves fixed prices from configuration instead of calling the
//! provider. Useful when no API key is available and as a controllable
//! feed in tests: unknown identifiers behave exactly like the provider's
//! zero-result responses, and the whole feed can be switched into a
//! failing mode.

use crate::{FeedError, FeedFactory, FeedRegistry, PriceFeedInterface};
use async_trait::async_trait;
use oracle_types::{ImplementationRegistry, MarketRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for the mock feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockFeedConfig {
    /// Fixed prices per token identifier.
    #[serde(default)]
    pub prices: HashMap<String, f64>,
    /// When set, every fetch fails with a transport error.
    #[serde(default)]
    pub fail: bool,
}

/// Mock feed serving configured fixed prices.
pub struct MockFeed {
    config: MockFeedConfig,
}

impl MockFeed {
    /// Creates a new mock feed with the given configuration.
    pub fn new(config: MockFeedConfig) -> Self {
        Self { config }
    }

    fn record(&self, token_id: &str, price: f64) -> MarketRecord {
        MarketRecord {
            id: token_id.to_string(),
            symbol: token_id.chars().take(3).collect(),
            name: token_id.to_string(),
            current_price: price,
            market_cap: price * 1_000_000.0,
            market_cap_rank: 1,
            total_volume: price * 100_000.0,
            ..MarketRecord::default()
        }
    }
}

#[async_trait]
impl PriceFeedInterface for MockFeed {
    async fn fetch_one(
        &self,
        token_id: &str,
        currency: &str,
    ) -> Result<MarketRecord, FeedError> {
        let _ = currency;
        if self.config.fail {
            return Err(FeedError::Transport("mock feed failure".to_string()));
        }

        match self.config.prices.get(token_id) {
            Some(price) => Ok(self.record(token_id, *price)),
            None => Err(FeedError::NotFound(token_id.to_string())),
        }
    }

    async fn fetch_many(
        &self,
        token_ids: &[String],
        currency: &str,
    ) -> Result<Vec<MarketRecord>, FeedError> {
        let _ = currency;
        if self.config.fail {
            return Err(FeedError::Transport("mock feed failure".to_string()));
        }

        // Unknown identifiers drop out of the result, as upstream does.
        Ok(token_ids
            .iter()
            .filter_map(|id| self.config.prices.get(id).map(|p| self.record(id, *p)))
            .collect())
    }
}

/// Registry for the mock feed implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
    const NAME: &'static str = "mock";
    type Factory = FeedFactory;

    fn factory() -> Self::Factory {
        |config: &toml::Value| -> Result<Box<dyn PriceFeedInterface>, FeedError> {
            let mock_config: MockFeedConfig = config.clone().try_into().map_err(|e| {
                FeedError::Configuration(format!("Invalid mock config: {}", e))
            })?;

            Ok(Box::new(MockFeed::new(mock_config)))
        }
    }
}

impl FeedRegistry for Registry {}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_with(prices: &[(&str, f64)]) -> MockFeed {
        MockFeed::new(MockFeedConfig {
            prices: prices
                .iter()
                .map(|(id, p)| (id.to_string(), *p))
                .collect(),
            fail: false,
        })
    }

    #[tokio::test]
    async fn test_configured_price_is_served() {
        let feed = feed_with(&[("bitcoin", 67000.0)]);

        let record = feed.fetch_one("bitcoin", "usd").await.unwrap();
        assert_eq!(record.id, "bitcoin");
        assert_eq!(record.current_price, 67000.0);
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let feed = feed_with(&[("bitcoin", 67000.0)]);

        let result = feed.fetch_one("wumbo", "usd").await;
        assert!(matches!(result, Err(FeedError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_batch_drops_unknown_ids() {
        let feed = feed_with(&[("bitcoin", 67000.0), ("ethereum", 2650.0)]);

        let ids = vec![
            "bitcoin".to_string(),
            "wumbo".to_string(),
            "ethereum".to_string(),
        ];
        let records = feed.fetch_many(&ids, "usd").await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.id != "wumbo"));
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let mut config = MockFeedConfig::default();
        config.prices.insert("bitcoin".to_string(), 67000.0);
        config.fail = true;
        let feed = MockFeed::new(config);

        assert!(matches!(
            feed.fetch_one("bitcoin", "usd").await,
            Err(FeedError::Transport(_))
        ));
        assert!(matches!(
            feed.fetch_many(&["bitcoin".to_string()], "usd").await,
            Err(FeedError::Transport(_))
        ));
    }
}
