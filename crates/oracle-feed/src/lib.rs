//! Upstream price feed module for the oracle system.
//!
//! This module provides interfaces and implementations for fetching
//! market records from an external market-data provider. It supports
//! single-token and batch lookups and follows the same trait-based
//! pattern as the other oracle components: implementations register a
//! factory under a configuration name and are selected at startup.

use async_trait::async_trait;
use oracle_types::{ImplementationRegistry, MarketRecord};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
    pub mod coingecko;
    pub mod mock;
}

/// Errors that can occur during feed operations.
///
/// All upstream failures surface as one of these variants; the feed never
/// panics on provider behavior.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Error that occurs reaching the provider (connect, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),
    /// Non-success HTTP status returned by the provider.
    #[error("Upstream status {status}: {body}")]
    Status { status: u16, body: String },
    /// Error that occurs decoding the provider's response envelope.
    #[error("Decode error: {0}")]
    Decode(String),
    /// The provider returned zero records for a requested identifier.
    #[error("Token not found: {0}")]
    NotFound(String),
    /// Error that occurs when configuration is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FeedError {
    /// Whether this error means the identifier does not exist upstream,
    /// as opposed to a transient provider failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FeedError::NotFound(_))
    }
}

/// Trait defining the interface for price feed implementations.
///
/// Both operations map onto a single outbound provider request; there is
/// no client-side pagination, so callers must stay within the provider's
/// per-request identifier ceiling.
#[async_trait]
pub trait PriceFeedInterface: Send + Sync {
    /// Fetches the market record for a single token in the given
    /// currency. Zero provider results decode to [`FeedError::NotFound`].
    async fn fetch_one(&self, token_id: &str, currency: &str)
        -> Result<MarketRecord, FeedError>;

    /// Fetches market records for several tokens in one provider call.
    ///
    /// Identifiers the provider does not know are simply absent from the
    /// returned records; an empty result is not an error here.
    async fn fetch_many(
        &self,
        token_ids: &[String],
        currency: &str,
    ) -> Result<Vec<MarketRecord>, FeedError>;
}

/// Type alias for feed factory functions.
///
/// This is the function signature that all feed implementations must
/// provide to create instances of their feed interface.
pub type FeedFactory = fn(&toml::Value) -> Result<Box<dyn PriceFeedInterface>, FeedError>;

/// Registry trait for feed implementations.
pub trait FeedRegistry: ImplementationRegistry<Factory = FeedFactory> {}

/// Get all registered feed implementations.
///
/// Returns a vector of (name, factory) tuples for all available feed
/// implementations, used by the service to wire up the one named in
/// configuration.
pub fn get_all_implementations() -> Vec<(&'static str, FeedFactory)> {
    use implementations::{coingecko, mock};

    vec![
        (coingecko::Registry::NAME, coingecko::Registry::factory()),
        (mock::Registry::NAME, mock::Registry::factory()),
    ]
}
