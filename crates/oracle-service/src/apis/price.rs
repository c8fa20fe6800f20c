//! Price lookup endpoints.
//!
//! Handlers for single, multi and provider-compatible price lookups.
//! The HTTP layer owns input handling only (currency defaulting,
//! identifier splitting) and hands everything else to the resolver.

use crate::server::AppState;
use axum::{
	extract::{Path, Query, State},
	http::header,
	response::{IntoResponse, Json},
};
use oracle_feed::FeedError;
use oracle_types::ApiError;
use serde::Deserialize;
use std::collections::HashMap;

/// Currency used when the caller does not specify one.
const DEFAULT_CURRENCY: &str = "usd";

/// Cache-control header value for price responses, matching the store's
/// one-hour freshness window.
const PRICE_CACHE_CONTROL: &str = "public, max-age=3600";

/// Query parameters for the single-price endpoint.
#[derive(Debug, Deserialize)]
pub struct PriceQuery {
	pub currency: Option<String>,
}

/// Query parameters for the multi-price endpoint.
#[derive(Debug, Deserialize)]
pub struct PricesQuery {
	pub ids: Option<String>,
	pub currency: Option<String>,
}

/// Query parameters for the provider-compatible simple endpoint.
#[derive(Debug, Deserialize)]
pub struct SimplePriceQuery {
	pub ids: Option<String>,
	pub vs_currencies: Option<String>,
}

/// Handles GET /price/{token_id} requests.
pub async fn handle_price(
	Path(token_id): Path<String>,
	Query(query): Query<PriceQuery>,
	State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
	let currency = query
		.currency
		.unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

	match state.resolver.price(&token_id, &currency).await {
		Ok(response) => Ok((
			[(header::CACHE_CONTROL, PRICE_CACHE_CONTROL)],
			Json(response),
		)),
		Err(e) => {
			tracing::warn!("Price lookup failed: {}", e);
			Err(map_feed_error(e))
		},
	}
}

/// Handles GET /prices requests.
///
/// Returns a partial result covering whatever resolved; only a missing
/// `ids` parameter is an error.
pub async fn handle_prices(
	Query(query): Query<PricesQuery>,
	State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
	let token_ids = require_ids(query.ids.as_deref())?;
	let currency = query
		.currency
		.unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

	let response = state.resolver.prices(&token_ids, &currency).await;
	Ok((
		[(header::CACHE_CONTROL, PRICE_CACHE_CONTROL)],
		Json(response),
	))
}

/// Handles GET /simple/price requests.
///
/// Provider-compatible shape: `{token_id: {currency: price}}` over the
/// cross product of the requested identifiers and currencies.
pub async fn handle_simple_price(
	Query(query): Query<SimplePriceQuery>,
	State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
	let token_ids = require_ids(query.ids.as_deref())?;
	let currencies = match query.vs_currencies.as_deref() {
		Some(raw) => split_csv(raw),
		None => vec![DEFAULT_CURRENCY.to_string()],
	};

	let mut result: HashMap<String, HashMap<String, f64>> = HashMap::new();
	for currency in &currencies {
		let response = state.resolver.prices(&token_ids, currency).await;
		for (token_id, price) in response.prices {
			result
				.entry(token_id)
				.or_default()
				.insert(currency.clone(), price.price);
		}
	}

	Ok((
		[(header::CACHE_CONTROL, PRICE_CACHE_CONTROL)],
		Json(result),
	))
}

/// Splits and validates the `ids` query parameter.
fn require_ids(raw: Option<&str>) -> Result<Vec<String>, ApiError> {
	let token_ids = raw.map(split_csv).unwrap_or_default();
	if token_ids.is_empty() {
		return Err(ApiError::bad_request("ids query parameter required"));
	}
	Ok(token_ids)
}

/// Splits a comma-joined parameter, dropping empty segments.
fn split_csv(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}

/// Maps feed errors onto the API error surface: unknown identifiers are
/// 404s, everything else is an upstream availability problem.
fn map_feed_error(err: FeedError) -> ApiError {
	if err.is_not_found() {
		ApiError::not_found(err.to_string())
	} else {
		ApiError::upstream(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_split_csv() {
		assert_eq!(
			split_csv("bitcoin,ethereum"),
			vec!["bitcoin".to_string(), "ethereum".to_string()]
		);
		assert_eq!(split_csv("bitcoin, ethereum ,"), vec!["bitcoin", "ethereum"]);
		assert!(split_csv("").is_empty());
		assert!(split_csv(",,").is_empty());
	}

	#[test]
	fn test_require_ids() {
		assert!(require_ids(Some("bitcoin")).is_ok());
		assert!(matches!(
			require_ids(None),
			Err(ApiError::BadRequest { .. })
		));
		assert!(matches!(
			require_ids(Some(",")),
			Err(ApiError::BadRequest { .. })
		));
	}

	#[test]
	fn test_feed_error_mapping() {
		let not_found = map_feed_error(FeedError::NotFound("wumbo".to_string()));
		assert_eq!(not_found.status_code(), 404);

		let transport = map_feed_error(FeedError::Transport("timed out".to_string()));
		assert_eq!(transport.status_code(), 503);

		let status = map_feed_error(FeedError::Status {
			status: 429,
			body: "rate limited".to_string(),
		});
		assert_eq!(status.status_code(), 503);
	}
}
