//! Market listing types for the oracle system.
//!
//! This module defines the provider-side market record decoded from the
//! upstream `/coins/markets` payload and the enriched asset rows served
//! by the market listing endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::score::ScoreBreakdown;

/// Deserializes a value that the provider may send as `null` into its
/// default. The markets payload nulls out rank, supply and ATH fields for
/// thinly listed assets.
fn default_on_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One market record as returned by the upstream provider.
///
/// Field names mirror the provider's JSON envelope; the feed decodes the
/// response array straight into this shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketRecord {
	pub id: String,
	#[serde(default)]
	pub symbol: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub image: String,
	#[serde(default, deserialize_with = "default_on_null")]
	pub current_price: f64,
	#[serde(default, deserialize_with = "default_on_null")]
	pub market_cap: f64,
	/// Provider rank by market capitalization; 0 when unranked.
	#[serde(default, deserialize_with = "default_on_null")]
	pub market_cap_rank: u32,
	#[serde(default, deserialize_with = "default_on_null")]
	pub total_volume: f64,
	#[serde(default, deserialize_with = "default_on_null")]
	pub price_change_percentage_24h: f64,
	#[serde(
		default,
		deserialize_with = "default_on_null",
		rename = "price_change_percentage_7d_in_currency"
	)]
	pub price_change_percentage_7d: f64,
	#[serde(default, deserialize_with = "default_on_null")]
	pub circulating_supply: f64,
	#[serde(default, deserialize_with = "default_on_null")]
	pub total_supply: f64,
	#[serde(default, deserialize_with = "default_on_null")]
	pub ath: f64,
	#[serde(default, deserialize_with = "default_on_null")]
	pub ath_change_percentage: f64,
	#[serde(default)]
	pub last_updated: String,
}

/// Staking figures attached to a market listing row.
///
/// `staked_tokens` and `tvl` are derived at listing time from the static
/// reference attributes and the live price; the rest passes through from
/// the reference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingSummary {
	pub apy: f64,
	pub staking_ratio: f64,
	pub staked_tokens: f64,
	pub tvl: f64,
	pub validator_fee: f64,
	pub min_stake: f64,
	pub unbonding_days: u32,
}

/// One row of the market listing: provider data enriched with staking
/// figures and the composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAsset {
	pub id: String,
	pub symbol: String,
	pub name: String,
	pub image: String,
	pub price: f64,
	pub price_change_24h: f64,
	pub price_change_7d: f64,
	pub market_cap: f64,
	pub market_cap_rank: u32,
	pub volume_24h: f64,
	pub circulating_supply: f64,
	pub total_supply: f64,
	pub ath: f64,
	pub ath_change_percentage: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub staking: Option<StakingSummary>,
	pub score: f64,
	pub score_breakdown: ScoreBreakdown,
	pub updated_at: DateTime<Utc>,
}

/// The full market listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketsResponse {
	pub assets: Vec<MarketAsset>,
	pub count: usize,
	pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_record_decodes_provider_payload() {
		let payload = r#"{
			"id": "ethereum",
			"symbol": "eth",
			"name": "Ethereum",
			"image": "https://assets.example/eth.png",
			"current_price": 2650.12,
			"market_cap": 318000000000.0,
			"market_cap_rank": 2,
			"total_volume": 15400000000.0,
			"price_change_percentage_24h": -1.2,
			"price_change_percentage_7d_in_currency": 3.4,
			"circulating_supply": 120000000.0,
			"total_supply": 120000000.0,
			"ath": 4878.26,
			"ath_change_percentage": -45.6,
			"last_updated": "2025-06-01T12:00:00.000Z"
		}"#;

		let record: MarketRecord = serde_json::from_str(payload).unwrap();
		assert_eq!(record.id, "ethereum");
		assert_eq!(record.market_cap_rank, 2);
		assert_eq!(record.price_change_percentage_7d, 3.4);
		assert_eq!(record.ath_change_percentage, -45.6);
	}

	#[test]
	fn test_record_tolerates_nulled_fields() {
		// Thinly listed assets come back with nulled rank/supply/ATH data.
		let payload = r#"{
			"id": "obscure-token",
			"symbol": "obs",
			"name": "Obscure",
			"current_price": 0.002,
			"market_cap": null,
			"market_cap_rank": null,
			"total_volume": null,
			"price_change_percentage_24h": null,
			"circulating_supply": null,
			"ath": null,
			"ath_change_percentage": null
		}"#;

		let record: MarketRecord = serde_json::from_str(payload).unwrap();
		assert_eq!(record.market_cap_rank, 0);
		assert_eq!(record.market_cap, 0.0);
		assert_eq!(record.ath_change_percentage, 0.0);
	}
}
