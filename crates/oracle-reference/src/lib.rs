//! Static staking reference dataset for the oracle system.
//!
//! This module provides the immutable per-asset staking attributes the
//! price provider does not carry: yield, participation ratio, validator
//! fee, minimum stake and unbonding period. A built-in table ships with
//! the binary; deployments can replace it with a TOML file loaded once at
//! process start. The dataset is read-only for the process lifetime and
//! needs no locking.

use oracle_types::StakingInfo;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading the reference dataset.
#[derive(Debug, Error)]
pub enum ReferenceError {
	/// Error that occurs while reading the dataset file.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs while parsing the dataset file.
	#[error("Dataset error: {0}")]
	Parse(String),
}

/// On-disk shape of a dataset file: one `[assets.<id>]` table per asset.
#[derive(Debug, Deserialize)]
struct ReferenceFile {
	assets: HashMap<String, StakingInfo>,
}

/// The immutable staking reference dataset.
///
/// Constructed once at startup and shared read-only behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
	assets: HashMap<String, StakingInfo>,
}

impl ReferenceDataset {
	/// Builds the dataset from the compiled-in table.
	pub fn builtin() -> Self {
		let assets = BUILTIN
			.iter()
			.map(|(id, info)| (id.to_string(), *info))
			.collect();
		Self { assets }
	}

	/// Loads a dataset from a TOML file, replacing the built-in table.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
		let content = std::fs::read_to_string(path)?;
		let file: ReferenceFile =
			toml::from_str(&content).map_err(|e| ReferenceError::Parse(e.message().to_string()))?;
		Ok(Self {
			assets: file.assets,
		})
	}

	/// Looks up the staking attributes for an asset identifier.
	pub fn get(&self, asset_id: &str) -> Option<&StakingInfo> {
		self.assets.get(asset_id)
	}

	/// Iterates over all asset identifiers in the dataset.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.assets.keys().map(String::as_str)
	}

	/// Number of assets in the dataset.
	pub fn len(&self) -> usize {
		self.assets.len()
	}

	/// Whether the dataset is empty.
	pub fn is_empty(&self) -> bool {
		self.assets.is_empty()
	}
}

/// Compiled-in staking attributes per asset identifier.
const BUILTIN: &[(&str, StakingInfo)] = &[
	("ethereum", StakingInfo { apy: 3.13, staking_ratio: 30.46, validator_fee: 0.0, min_stake: 32.0, unbonding_days: 27 }),
	("solana", StakingInfo { apy: 6.15, staking_ratio: 68.65, validator_fee: 8.0, min_stake: 0.01, unbonding_days: 3 }),
	("binancecoin", StakingInfo { apy: 5.01, staking_ratio: 18.45, validator_fee: 0.0, min_stake: 1.0, unbonding_days: 7 }),
	("cardano", StakingInfo { apy: 2.28, staking_ratio: 58.13, validator_fee: 2.0, min_stake: 10.0, unbonding_days: 20 }),
	("avalanche-2", StakingInfo { apy: 7.00, staking_ratio: 48.38, validator_fee: 2.0, min_stake: 25.0, unbonding_days: 14 }),
	("polkadot", StakingInfo { apy: 11.68, staking_ratio: 52.59, validator_fee: 10.0, min_stake: 120.0, unbonding_days: 28 }),
	("cosmos", StakingInfo { apy: 20.21, staking_ratio: 61.02, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 21 }),
	("near", StakingInfo { apy: 4.47, staking_ratio: 47.20, validator_fee: 0.0, min_stake: 0.01, unbonding_days: 2 }),
	("aptos", StakingInfo { apy: 7.00, staking_ratio: 96.73, validator_fee: 0.0, min_stake: 10.0, unbonding_days: 30 }),
	("sui", StakingInfo { apy: 1.75, staking_ratio: 74.45, validator_fee: 2.0, min_stake: 1.0, unbonding_days: 0 }),
	("celestia", StakingInfo { apy: 6.45, staking_ratio: 35.49, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 21 }),
	("injective-protocol", StakingInfo { apy: 6.57, staking_ratio: 55.71, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 21 }),
	("sei-network", StakingInfo { apy: 7.39, staking_ratio: 36.36, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 21 }),
	("the-open-network", StakingInfo { apy: 3.99, staking_ratio: 6.78, validator_fee: 0.0, min_stake: 10000.0, unbonding_days: 36 }),
	("hedera-hashgraph", StakingInfo { apy: 2.50, staking_ratio: 31.87, validator_fee: 0.0, min_stake: 0.0, unbonding_days: 0 }),
	("filecoin", StakingInfo { apy: 12.24, staking_ratio: 1.29, validator_fee: 0.0, min_stake: 0.0, unbonding_days: 0 }),
	("fantom", StakingInfo { apy: 4.00, staking_ratio: 40.00, validator_fee: 15.0, min_stake: 1.0, unbonding_days: 7 }),
	("crypto-com-chain", StakingInfo { apy: 1.79, staking_ratio: 13.44, validator_fee: 0.0, min_stake: 5000.0, unbonding_days: 28 }),
	("moonbeam", StakingInfo { apy: 56.94, staking_ratio: 22.13, validator_fee: 20.0, min_stake: 50.0, unbonding_days: 7 }),
	("kava", StakingInfo { apy: 9.88, staking_ratio: 9.34, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 21 }),
	("osmosis", StakingInfo { apy: 1.95, staking_ratio: 34.94, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 14 }),
	("secret", StakingInfo { apy: 24.00, staking_ratio: 42.11, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 21 }),
	("akash-network", StakingInfo { apy: 10.74, staking_ratio: 37.80, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 21 }),
	("starknet", StakingInfo { apy: 8.83, staking_ratio: 21.86, validator_fee: 0.0, min_stake: 20000.0, unbonding_days: 21 }),
	("dydx-chain", StakingInfo { apy: 2.74, staking_ratio: 22.48, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 30 }),
	("axelar", StakingInfo { apy: 10.49, staking_ratio: 36.31, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 7 }),
	("band-protocol", StakingInfo { apy: 18.45, staking_ratio: 52.92, validator_fee: 3.0, min_stake: 0.01, unbonding_days: 21 }),
	("livepeer", StakingInfo { apy: 51.05, staking_ratio: 53.58, validator_fee: 0.0, min_stake: 0.01, unbonding_days: 7 }),
	("radix", StakingInfo { apy: 6.77, staking_ratio: 33.20, validator_fee: 2.0, min_stake: 0.01, unbonding_days: 14 }),
	("waves", StakingInfo { apy: 5.09, staking_ratio: 17.44, validator_fee: 0.0, min_stake: 0.01, unbonding_days: 0 }),
	("casper-network", StakingInfo { apy: 16.74, staking_ratio: 49.47, validator_fee: 5.0, min_stake: 500.0, unbonding_days: 14 }),
	("tron", StakingInfo { apy: 3.25, staking_ratio: 46.48, validator_fee: 0.0, min_stake: 0.01, unbonding_days: 14 }),
	("bittensor", StakingInfo { apy: 14.73, staking_ratio: 76.22, validator_fee: 18.0, min_stake: 0.01, unbonding_days: 0 }),
	("elrond-erd-2", StakingInfo { apy: 8.61, staking_ratio: 48.65, validator_fee: 0.0, min_stake: 1.0, unbonding_days: 10 }),
	("iota", StakingInfo { apy: 11.55, staking_ratio: 50.53, validator_fee: 0.0, min_stake: 0.0, unbonding_days: 0 }),
	("blockstack", StakingInfo { apy: 9.70, staking_ratio: 29.58, validator_fee: 0.0, min_stake: 90.0, unbonding_days: 14 }),
	("fetch-ai", StakingInfo { apy: 5.46, staking_ratio: 22.12, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 21 }),
	("zetachain", StakingInfo { apy: 6.98, staking_ratio: 27.52, validator_fee: 5.0, min_stake: 0.01, unbonding_days: 21 }),
	("skale", StakingInfo { apy: 10.00, staking_ratio: 32.37, validator_fee: 0.0, min_stake: 0.01, unbonding_days: 7 }),
	("tezos", StakingInfo { apy: 8.51, staking_ratio: 58.80, validator_fee: 5.0, min_stake: 1.0, unbonding_days: 0 }),
	("algorand", StakingInfo { apy: 4.95, staking_ratio: 22.52, validator_fee: 0.0, min_stake: 0.01, unbonding_days: 0 }),
	("harmony", StakingInfo { apy: 12.10, staking_ratio: 20.15, validator_fee: 5.0, min_stake: 100.0, unbonding_days: 7 }),
];
