//! Price lookup types for the oracle system.
//!
//! These types model the cache side of a price lookup: the key a cached
//! entry lives under, the entry itself, and the responses returned to the
//! HTTP layer for single and multi-token lookups.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::market::MarketRecord;

/// Identifies one cache slot: a token identifier paired with the quote
/// currency. Both components are opaque strings, case-sensitive, and are
/// never normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
	/// Token identifier as supplied by the caller (e.g. "bitcoin").
	pub token_id: String,
	/// Quote currency as supplied by the caller (e.g. "usd").
	pub currency: String,
}

impl CacheKey {
	/// Creates a new cache key from a token identifier and currency.
	pub fn new(token_id: impl Into<String>, currency: impl Into<String>) -> Self {
		Self {
			token_id: token_id.into(),
			currency: currency.into(),
		}
	}
}

impl fmt::Display for CacheKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.token_id, self.currency)
	}
}

/// A cached price entry.
///
/// Entries are written only by the resolver after a successful upstream
/// fetch and are always replaced wholesale, never field-by-field.
/// `updated_at` is strictly the time of the fetch that produced the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPrice {
	pub price: f64,
	pub currency: String,
	pub updated_at: DateTime<Utc>,
	pub change_24h: f64,
	pub market_cap: f64,
	pub volume_24h: f64,
}

impl CachedPrice {
	/// Builds a cache entry from a provider record.
	///
	/// `fetched_at` is the local fetch time, not the provider's own
	/// last-updated timestamp.
	pub fn from_record(record: &MarketRecord, currency: &str, fetched_at: DateTime<Utc>) -> Self {
		Self {
			price: record.current_price,
			currency: currency.to_string(),
			updated_at: fetched_at,
			change_24h: record.price_change_percentage_24h,
			market_cap: record.market_cap,
			volume_24h: record.total_volume,
		}
	}

	/// Whether this entry is still fresh at `now`.
	///
	/// Freshness is a pure function of (now, updated_at, ttl): an entry is
	/// fresh while its age is strictly below the TTL. Stale entries are
	/// not removed; callers keep them around as a degraded fallback.
	pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
		now.signed_duration_since(self.updated_at) < ttl
	}
}

/// Result of a single price lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResponse {
	pub id: String,
	#[serde(default)]
	pub symbol: String,
	#[serde(default)]
	pub name: String,
	pub price: f64,
	pub currency: String,
	pub change_24h: f64,
	pub market_cap: f64,
	pub volume_24h: f64,
	pub updated_at: DateTime<Utc>,
	/// True when the response was served from the store (fresh hit or
	/// stale fallback), false when it was fetched for this request.
	pub cached: bool,
}

impl PriceResponse {
	/// Builds a response from a cached entry, flagged `cached`. Symbol and
	/// name are not retained in the cache and come back empty on
	/// cache-served results.
	pub fn from_cache(token_id: &str, entry: &CachedPrice) -> Self {
		Self {
			id: token_id.to_string(),
			symbol: String::new(),
			name: String::new(),
			price: entry.price,
			currency: entry.currency.clone(),
			change_24h: entry.change_24h,
			market_cap: entry.market_cap,
			volume_24h: entry.volume_24h,
			updated_at: entry.updated_at,
			cached: true,
		}
	}

	/// Builds a response from a freshly fetched provider record.
	pub fn from_record(record: &MarketRecord, currency: &str, fetched_at: DateTime<Utc>) -> Self {
		Self {
			id: record.id.clone(),
			symbol: record.symbol.clone(),
			name: record.name.clone(),
			price: record.current_price,
			currency: currency.to_string(),
			change_24h: record.price_change_percentage_24h,
			market_cap: record.market_cap,
			volume_24h: record.total_volume,
			updated_at: fetched_at,
			cached: false,
		}
	}

}

/// Result of a multi-token lookup.
///
/// Identifiers that could not be resolved are absent from `prices`; a
/// partial result is never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiPriceResponse {
	pub prices: HashMap<String, PriceResponse>,
	pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entry_aged(minutes: i64) -> CachedPrice {
		CachedPrice {
			price: 100.0,
			currency: "usd".to_string(),
			updated_at: Utc::now() - Duration::minutes(minutes),
			change_24h: 1.5,
			market_cap: 1_000_000.0,
			volume_24h: 50_000.0,
		}
	}

	#[test]
	fn test_cache_key_display() {
		let key = CacheKey::new("bitcoin", "usd");
		assert_eq!(key.to_string(), "bitcoin:usd");
	}

	#[test]
	fn test_cache_key_is_case_sensitive() {
		assert_ne!(CacheKey::new("bitcoin", "USD"), CacheKey::new("bitcoin", "usd"));
	}

	#[test]
	fn test_freshness_window() {
		let ttl = Duration::hours(1);
		let now = Utc::now();

		assert!(entry_aged(59).is_fresh(ttl, now));
		assert!(!entry_aged(61).is_fresh(ttl, now));
	}

	#[test]
	fn test_stale_entry_is_not_fresh_but_usable() {
		let entry = entry_aged(120);
		assert!(!entry.is_fresh(Duration::hours(1), Utc::now()));

		// Stale entries still carry their full payload for fallback use.
		let response = PriceResponse::from_cache("bitcoin", &entry);
		assert!(response.cached);
		assert_eq!(response.price, 100.0);
	}
}
