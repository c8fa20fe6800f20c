//! Composite score types.

use serde::{Deserialize, Serialize};

/// Per-component breakdown of a composite asset score.
///
/// Components cap at market 25, staking 25, security 20, adoption 15 and
/// tech 15, so the total spans 0 to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
	pub market_score: f64,
	pub staking_score: f64,
	pub security_score: f64,
	pub adoption_score: f64,
	pub tech_score: f64,
}

impl ScoreBreakdown {
	/// Sum of all five components.
	pub fn total(&self) -> f64 {
		self.market_score
			+ self.staking_score
			+ self.security_score
			+ self.adoption_score
			+ self.tech_score
	}
}

/// A computed composite score. Derived per request, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetScore {
	pub total: f64,
	pub breakdown: ScoreBreakdown,
}
