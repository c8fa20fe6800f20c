//! CoinGecko-backed price feed implementation.
//!
//! Issues `/coins/markets` lookups against the CoinGecko API and decodes
//! the response array into [`MarketRecord`]s. Authenticates with the
//! demo-tier API key header; pro deployments point `base_url` at the pro
//! endpoint instead.

use crate::{FeedError, FeedFactory, FeedRegistry, PriceFeedInterface};
use async_trait::async_trait;
use oracle_types::{ImplementationRegistry, MarketRecord};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the CoinGecko feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinGeckoConfig {
    /// Base URL of the provider API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent in the `x-cg-demo-api-key` header.
    pub api_key: String,
    /// Call-level timeout for provider requests, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Provider page ceiling for batch lookups.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_batch_size() -> usize {
    250
}

/// CoinGecko feed implementation.
pub struct CoinGeckoFeed {
    config: CoinGeckoConfig,
    client: reqwest::Client,
}

impl CoinGeckoFeed {
    /// Creates a new feed with its own pooled HTTP client.
    ///
    /// The timeout applies per call; exceeding it surfaces as a
    /// [`FeedError::Transport`], never a process-level failure.
    pub fn new(config: CoinGeckoConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FeedError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the markets query URL for a comma-joined identifier list.
    fn markets_url(&self, ids: &str, currency: &str, per_page: usize) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&ids={}&order=market_cap_desc&per_page={}&page=1&sparkline=false&price_change_percentage=7d",
            self.config.base_url, currency, ids, per_page
        )
    }

    /// Performs one markets request and decodes the record array.
    async fn fetch_markets(
        &self,
        ids: &str,
        currency: &str,
        per_page: usize,
    ) -> Result<Vec<MarketRecord>, FeedError> {
        let url = self.markets_url(ids, currency, per_page);
        tracing::debug!("markets request: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("x-cg-demo-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<MarketRecord>>()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PriceFeedInterface for CoinGeckoFeed {
    async fn fetch_one(
        &self,
        token_id: &str,
        currency: &str,
    ) -> Result<MarketRecord, FeedError> {
        let mut records = self.fetch_markets(token_id, currency, 1).await?;
        if records.is_empty() {
            return Err(FeedError::NotFound(token_id.to_string()));
        }
        Ok(records.swap_remove(0))
    }

    async fn fetch_many(
        &self,
        token_ids: &[String],
        currency: &str,
    ) -> Result<Vec<MarketRecord>, FeedError> {
        let ids = token_ids.join(",");
        self.fetch_markets(&ids, currency, self.config.max_batch_size)
            .await
    }
}

/// Registry for the CoinGecko feed implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
    const NAME: &'static str = "coingecko";
    type Factory = FeedFactory;

    fn factory() -> Self::Factory {
        |config: &toml::Value| -> Result<Box<dyn PriceFeedInterface>, FeedError> {
            let cg_config: CoinGeckoConfig = config.clone().try_into().map_err(|e| {
                FeedError::Configuration(format!("Invalid coingecko config: {}", e))
            })?;

            Ok(Box::new(CoinGeckoFeed::new(cg_config)?))
        }
    }
}

impl FeedRegistry for Registry {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CoinGeckoConfig {
        CoinGeckoConfig {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            api_key: "CG-test".to_string(),
            timeout_seconds: 30,
            max_batch_size: 250,
        }
    }

    #[test]
    fn test_markets_url_shape() {
        let feed = CoinGeckoFeed::new(test_config()).unwrap();
        let url = feed.markets_url("bitcoin,ethereum", "usd", 250);
        assert_eq!(
            url,
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd&ids=bitcoin,ethereum&order=market_cap_desc&per_page=250&page=1&sparkline=false&price_change_percentage=7d"
        );
    }

    #[test]
    fn test_config_defaults() {
        let value: toml::Value = toml::from_str(r#"api_key = "CG-test""#).unwrap();
        let config: CoinGeckoConfig = value.try_into().unwrap();
        assert_eq!(config.base_url, "https://api.coingecko.com/api/v3");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.max_batch_size, 250);
    }

    #[test]
    fn test_factory_rejects_missing_api_key() {
        let value: toml::Value = toml::from_str("timeout_seconds = 5").unwrap();
        let result = (Registry::factory())(&value);
        assert!(matches!(result, Err(FeedError::Configuration(_))));
    }
}
