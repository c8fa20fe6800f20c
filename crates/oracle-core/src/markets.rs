//! Market listing assembly.
//!
//! Turns a batch of provider records into scored listing rows: staking
//! summaries derived from the reference dataset, the composite score per
//! asset, and a descending-score ordering that keeps provider order on
//! ties.

use chrono::Utc;
use oracle_reference::ReferenceDataset;
use oracle_score::{score_asset, staked_tokens, total_value_locked};
use oracle_types::{MarketAsset, MarketRecord, MarketsResponse, StakingSummary};

/// Builds the scored listing from provider records and the reference
/// dataset.
pub fn build_listing(records: &[MarketRecord], dataset: &ReferenceDataset) -> MarketsResponse {
	let now = Utc::now();

	let mut assets: Vec<MarketAsset> = records
		.iter()
		.map(|record| {
			let info = dataset.get(&record.id);

			let staking = info.map(|info| {
				let staked = staked_tokens(record.circulating_supply, info.staking_ratio);
				StakingSummary {
					apy: info.apy,
					staking_ratio: info.staking_ratio,
					staked_tokens: staked,
					tvl: total_value_locked(staked, record.current_price),
					validator_fee: info.validator_fee,
					min_stake: info.min_stake,
					unbonding_days: info.unbonding_days,
				}
			});

			let score = score_asset(record, info);

			MarketAsset {
				id: record.id.clone(),
				symbol: record.symbol.to_uppercase(),
				name: record.name.clone(),
				image: record.image.clone(),
				price: record.current_price,
				price_change_24h: record.price_change_percentage_24h,
				price_change_7d: record.price_change_percentage_7d,
				market_cap: record.market_cap,
				market_cap_rank: record.market_cap_rank,
				volume_24h: record.total_volume,
				circulating_supply: record.circulating_supply,
				total_supply: record.total_supply,
				ath: record.ath,
				ath_change_percentage: record.ath_change_percentage,
				staking,
				score: score.total,
				score_breakdown: score.breakdown,
				updated_at: now,
			}
		})
		.collect();

	// Stable sort: ties keep the provider's fetch order.
	assets.sort_by(|a, b| {
		b.score
			.partial_cmp(&a.score)
			.unwrap_or(std::cmp::Ordering::Equal)
	});

	let count = assets.len();
	MarketsResponse {
		assets,
		count,
		updated_at: now,
	}
}
