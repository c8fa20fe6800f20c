//! Market listing endpoints.
//!
//! Serves the scored market listing over the staking universe. The
//! listing is a fresh snapshot on every call, so it carries a shorter
//! cache-control window than the price endpoints.

use crate::server::AppState;
use axum::{
	extract::State,
	http::header,
	response::{IntoResponse, Json},
};
use oracle_types::ApiError;

const MARKETS_CACHE_CONTROL: &str = "public, max-age=300";

/// Handles GET /markets and GET /staking requests.
pub async fn handle_markets(
	State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
	match state.resolver.markets().await {
		Ok(listing) => Ok((
			[(header::CACHE_CONTROL, MARKETS_CACHE_CONTROL)],
			Json(listing),
		)),
		Err(e) => {
			tracing::warn!("Market listing failed: {}", e);
			Err(ApiError::upstream(e.to_string()))
		},
	}
}
