//! Composite asset scoring for the oracle system.
//!
//! Ranks an asset on a 0–100 scale from five independently computed
//! components: market position, staking economics, security, adoption
//! and technical standing. Scoring is a pure function of the provider
//! record and the optional static staking entry: no shared state, no
//! side effects, deterministic for identical inputs.

use oracle_types::{AssetScore, MarketRecord, ScoreBreakdown, StakingInfo};

/// Computes the composite score and its breakdown for one asset.
///
/// Assets without a staking reference entry score 0 on the staking
/// component; every other component always contributes its lowest
/// bracket at minimum, so totals span 22 to 100 for assets with complete
/// provider data.
pub fn score_asset(record: &MarketRecord, staking: Option<&StakingInfo>) -> AssetScore {
	let breakdown = ScoreBreakdown {
		market_score: market_score(record.market_cap_rank),
		staking_score: staking.map(staking_score).unwrap_or(0.0),
		security_score: security_score(record.market_cap),
		adoption_score: adoption_score(record.total_volume, record.market_cap),
		tech_score: tech_score(record.ath_change_percentage),
	};

	AssetScore {
		total: breakdown.total(),
		breakdown,
	}
}

/// Market component (max 25): bracket of the market-cap rank.
/// Rank 0 means the provider left the asset unranked.
fn market_score(rank: u32) -> f64 {
	match rank {
		1..=10 => 25.0,
		11..=25 => 22.0,
		26..=50 => 18.0,
		51..=100 => 14.0,
		101..=250 => 10.0,
		_ => 5.0,
	}
}

/// Staking component (max 25): bracket of the yield, plus a bonus when
/// at least half the supply participates in staking.
fn staking_score(info: &StakingInfo) -> f64 {
	let mut score = if info.apy >= 10.0 {
		20.0
	} else if info.apy >= 5.0 {
		15.0
	} else if info.apy >= 2.0 {
		10.0
	} else {
		5.0
	};

	if info.staking_ratio >= 50.0 {
		score += 5.0;
	}

	score
}

/// Security component (max 20): bracket of absolute market capitalization.
fn security_score(market_cap: f64) -> f64 {
	if market_cap > 10_000_000_000.0 {
		20.0
	} else if market_cap > 1_000_000_000.0 {
		16.0
	} else if market_cap > 100_000_000.0 {
		12.0
	} else {
		8.0
	}
}

/// Adoption component (max 15): bracket of the 24h-volume to market-cap
/// ratio. A zero or negative market cap takes the lowest bracket rather
/// than producing a NaN or infinite ratio.
fn adoption_score(total_volume: f64, market_cap: f64) -> f64 {
	if market_cap <= 0.0 {
		return 5.0;
	}

	let volume_to_mcap = total_volume / market_cap;
	if volume_to_mcap > 0.10 {
		15.0
	} else if volume_to_mcap > 0.05 {
		12.0
	} else if volume_to_mcap > 0.01 {
		9.0
	} else {
		5.0
	}
}

/// Tech component (max 15): bracket of the percentage decline from the
/// all-time high.
fn tech_score(ath_change_percentage: f64) -> f64 {
	if ath_change_percentage > -20.0 {
		15.0
	} else if ath_change_percentage > -50.0 {
		12.0
	} else if ath_change_percentage > -80.0 {
		8.0
	} else {
		4.0
	}
}

/// Tokens currently staked, derived from circulating supply and the
/// participation ratio (in percent).
pub fn staked_tokens(circulating_supply: f64, staking_ratio: f64) -> f64 {
	circulating_supply * (staking_ratio / 100.0)
}

/// Total value locked in staking, in quote-currency units.
pub fn total_value_locked(staked_tokens: f64, price: f64) -> f64 {
	staked_tokens * price
}
