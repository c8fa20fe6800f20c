//! Read-through price resolution.
//!
//! The resolver owns the request orchestration: consult the cache, fetch
//! from the upstream feed on miss or expiry, fall back to stale entries
//! when the feed fails, and write fresh results back. All collaborators
//! are injected at construction, so the resolver is testable with a fake
//! feed and dataset.

use chrono::{Duration, Utc};
use oracle_cache::PriceCache;
use oracle_feed::{FeedError, PriceFeedInterface};
use oracle_reference::ReferenceDataset;
use oracle_types::{CacheKey, CachedPrice, MarketsResponse, MultiPriceResponse, PriceResponse};
use std::collections::HashMap;
use std::sync::Arc;

use crate::markets::build_listing;

/// Currency the market listing is quoted in.
const LISTING_CURRENCY: &str = "usd";

/// Orchestrates price requests over the shared cache and the upstream
/// feed.
///
/// The cache lock is never held across a feed call: lookups copy the
/// entry out first, and write-backs insert a fully constructed entry
/// afterwards. Concurrent requests for the same expired key may each
/// trigger their own fetch; the resulting writes are wholesale
/// overwrites, so the last one wins without field interleaving.
pub struct Resolver {
	cache: Arc<PriceCache>,
	feed: Arc<dyn PriceFeedInterface>,
	reference: Arc<ReferenceDataset>,
	ttl: Duration,
}

impl Resolver {
	/// Creates a resolver over the given cache, feed and reference
	/// dataset. `ttl` bounds how long a cached entry is served without a
	/// re-fetch.
	pub fn new(
		cache: Arc<PriceCache>,
		feed: Arc<dyn PriceFeedInterface>,
		reference: Arc<ReferenceDataset>,
		ttl: Duration,
	) -> Self {
		Self {
			cache,
			feed,
			reference,
			ttl,
		}
	}

	/// The configured cache TTL.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// The staking reference dataset this resolver was built with.
	pub fn reference(&self) -> &ReferenceDataset {
		&self.reference
	}

	/// Resolves one token price in one currency.
	///
	/// Serves the cache while fresh, otherwise fetches and writes back.
	/// If the fetch fails and any entry exists, however stale, it is
	/// returned flagged `cached` instead of an error; only a miss with a
	/// failed fetch propagates the feed error.
	pub async fn price(
		&self,
		token_id: &str,
		currency: &str,
	) -> Result<PriceResponse, FeedError> {
		let key = CacheKey::new(token_id, currency);
		let cached = self.cache.get(&key).await;

		if let Some(entry) = &cached {
			if entry.is_fresh(self.ttl, Utc::now()) {
				return Ok(PriceResponse::from_cache(token_id, entry));
			}
		}

		match self.feed.fetch_one(token_id, currency).await {
			Ok(record) => {
				let fetched_at = Utc::now();
				let entry = CachedPrice::from_record(&record, currency, fetched_at);
				self.cache.insert(key, entry).await;
				Ok(PriceResponse::from_record(&record, currency, fetched_at))
			},
			Err(err) => {
				if let Some(entry) = cached {
					// Stale data beats an error.
					tracing::warn!(key = %key, error = %err, "serving stale cache entry");
					return Ok(PriceResponse::from_cache(token_id, &entry));
				}
				Err(err)
			},
		}
	}

	/// Resolves many token prices in one currency.
	///
	/// Identifiers servable from fresh cache are answered directly; the
	/// rest go out in exactly one batch feed call. A failed batch never
	/// fails the request: cache-servable identifiers are still returned
	/// and unresolved ones are absent from the result. Unlike the
	/// single-key path there is no stale fallback here.
	pub async fn prices(&self, token_ids: &[String], currency: &str) -> MultiPriceResponse {
		let mut prices = HashMap::new();
		let now = Utc::now();

		let mut to_fetch = Vec::new();
		for token_id in token_ids {
			let key = CacheKey::new(token_id.clone(), currency);
			match self.cache.get(&key).await {
				Some(entry) if entry.is_fresh(self.ttl, now) => {
					prices.insert(token_id.clone(), PriceResponse::from_cache(token_id, &entry));
				},
				_ => to_fetch.push(token_id.clone()),
			}
		}

		if !to_fetch.is_empty() {
			match self.feed.fetch_many(&to_fetch, currency).await {
				Ok(records) => {
					let fetched_at = Utc::now();
					for record in &records {
						let entry = CachedPrice::from_record(record, currency, fetched_at);
						self.cache
							.insert(CacheKey::new(record.id.clone(), currency), entry)
							.await;
						prices.insert(
							record.id.clone(),
							PriceResponse::from_record(record, currency, fetched_at),
						);
					}
				},
				Err(err) => {
					tracing::warn!(
						requested = to_fetch.len(),
						error = %err,
						"batch fetch failed; returning cached identifiers only"
					);
				},
			}
		}

		MultiPriceResponse {
			prices,
			updated_at: Utc::now(),
		}
	}

	/// Builds the scored market listing over the staking universe.
	///
	/// One direct batch fetch over every asset in the reference dataset;
	/// the listing is an all-fresh snapshot and does not consult the
	/// price cache.
	pub async fn markets(&self) -> Result<MarketsResponse, FeedError> {
		let ids: Vec<String> = self.reference.ids().map(str::to_string).collect();
		let records = self.feed.fetch_many(&ids, LISTING_CURRENCY).await?;
		Ok(build_listing(&records, &self.reference))
	}
}
