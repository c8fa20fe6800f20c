//! Static staking reference entry.

use serde::{Deserialize, Serialize};

/// Per-asset staking attributes from the static reference dataset.
///
/// These figures are unavailable from the price provider and are loaded
/// once at startup; the dataset is read-only for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakingInfo {
	/// Annual percentage yield for staking the asset.
	pub apy: f64,
	/// Share of circulating supply that is staked, in percent.
	pub staking_ratio: f64,
	/// Validator/operator fee, in percent.
	#[serde(default)]
	pub validator_fee: f64,
	/// Minimum stakeable amount in native units.
	#[serde(default)]
	pub min_stake: f64,
	/// Unbonding period in days.
	#[serde(default)]
	pub unbonding_days: u32,
}
