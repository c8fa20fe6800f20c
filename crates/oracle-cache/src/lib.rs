//! In-memory price cache for the oracle system.
//!
//! This module provides the shared store mapping (token id, currency)
//! pairs to cached price entries. The map is the only shared mutable
//! state in the system and is protected by a single reader/writer lock.
//!
//! The cache has no expiry machinery: freshness is a read-time judgment
//! made by the resolver against the entry's `updated_at`, and entries are
//! never removed: a stale entry is simply re-fetched on access while
//! remaining available as a degraded fallback.

use oracle_types::{CacheKey, CachedPrice};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Concurrency-safe price store.
///
/// Reads take the shared lock, writes the exclusive lock, and either is
/// held only for the map operation itself; callers must never hold a
/// lock guard across an upstream fetch. Writes are wholesale inserts of
/// fully constructed entries, so concurrent writers on the same key
/// cannot interleave fields; the last insert wins.
pub struct PriceCache {
	/// The in-memory store protected by a read-write lock.
	entries: Arc<RwLock<HashMap<CacheKey, CachedPrice>>>,
}

impl PriceCache {
	/// Creates a new, empty cache.
	pub fn new() -> Self {
		Self {
			entries: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Returns a copy of the entry for `key`, fresh or stale.
	pub async fn get(&self, key: &CacheKey) -> Option<CachedPrice> {
		let entries = self.entries.read().await;
		entries.get(key).cloned()
	}

	/// Inserts an entry for `key`, replacing any prior value.
	pub async fn insert(&self, key: CacheKey, entry: CachedPrice) {
		let mut entries = self.entries.write().await;
		entries.insert(key, entry);
	}

	/// Number of entries currently held.
	pub async fn len(&self) -> usize {
		let entries = self.entries.read().await;
		entries.len()
	}

	/// Whether the cache holds no entries.
	pub async fn is_empty(&self) -> bool {
		self.len().await == 0
	}
}

impl Default for PriceCache {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{Duration, Utc};
	use std::sync::Arc;

	fn entry(price: f64, age_minutes: i64) -> CachedPrice {
		CachedPrice {
			price,
			currency: "usd".to_string(),
			updated_at: Utc::now() - Duration::minutes(age_minutes),
			change_24h: 0.5,
			market_cap: 1_000_000.0,
			volume_24h: 10_000.0,
		}
	}

	#[tokio::test]
	async fn test_basic_operations() {
		let cache = PriceCache::new();
		let key = CacheKey::new("bitcoin", "usd");

		assert!(cache.get(&key).await.is_none());

		cache.insert(key.clone(), entry(67000.0, 0)).await;
		let got = cache.get(&key).await.unwrap();
		assert_eq!(got.price, 67000.0);
		assert_eq!(cache.len().await, 1);
	}

	#[tokio::test]
	async fn test_currency_is_part_of_the_key() {
		let cache = PriceCache::new();
		cache
			.insert(CacheKey::new("bitcoin", "usd"), entry(67000.0, 0))
			.await;
		cache
			.insert(CacheKey::new("bitcoin", "eur"), entry(61000.0, 0))
			.await;

		assert_eq!(cache.len().await, 2);
		let eur = cache.get(&CacheKey::new("bitcoin", "eur")).await.unwrap();
		assert_eq!(eur.price, 61000.0);
	}

	#[tokio::test]
	async fn test_insert_replaces_wholesale() {
		let cache = PriceCache::new();
		let key = CacheKey::new("solana", "usd");

		cache.insert(key.clone(), entry(150.0, 120)).await;
		cache.insert(key.clone(), entry(155.0, 0)).await;

		let got = cache.get(&key).await.unwrap();
		assert_eq!(got.price, 155.0);
		// The replacement carries its own timestamp, not the old one.
		assert!(got.is_fresh(Duration::hours(1), Utc::now()));
	}

	#[tokio::test]
	async fn test_stale_entries_are_retained() {
		let cache = PriceCache::new();
		let key = CacheKey::new("cardano", "usd");

		cache.insert(key.clone(), entry(0.45, 90)).await;

		let got = cache.get(&key).await.unwrap();
		assert!(!got.is_fresh(Duration::hours(1), Utc::now()));
		assert_eq!(got.price, 0.45);
	}

	#[tokio::test]
	async fn test_concurrent_writers_never_interleave() {
		let cache = Arc::new(PriceCache::new());
		let key = CacheKey::new("ethereum", "usd");

		let a = entry(2650.0, 0);
		let b = entry(2651.0, 0);

		let cache_a = Arc::clone(&cache);
		let cache_b = Arc::clone(&cache);
		let (key_a, entry_a) = (key.clone(), a.clone());
		let (key_b, entry_b) = (key.clone(), b.clone());

		let t1 = tokio::spawn(async move { cache_a.insert(key_a, entry_a).await });
		let t2 = tokio::spawn(async move { cache_b.insert(key_b, entry_b).await });
		t1.await.unwrap();
		t2.await.unwrap();

		// Whichever write landed last, the entry is one of the two values
		// in full, never a mix of fields.
		let got = cache.get(&key).await.unwrap();
		assert!(got == a || got == b);
	}
}
