//! HTTP server for the price oracle API.
//!
//! This module provides the server setup and routing for the oracle's
//! HTTP surface. Handlers live in the `apis` module; everything here is
//! wiring: state, routes, CORS and the health probe.

use crate::apis;
use axum::{response::Json, routing::get, Router};
use chrono::Utc;
use oracle_config::ServerConfig;
use oracle_core::Resolver;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the resolver for processing requests.
	pub resolver: Arc<Resolver>,
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	server_config: ServerConfig,
	resolver: Arc<Resolver>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(AppState { resolver });

	let bind_address = format!("{}:{}", server_config.host, server_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Price oracle API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Builds the router with all endpoints and middleware.
///
/// `/staking` serves the same listing as `/markets`: the listing already
/// carries the staking figures, filtered views are a client concern.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(handle_health))
		.route("/price/{token_id}", get(apis::price::handle_price))
		.route("/prices", get(apis::price::handle_prices))
		.route("/simple/price", get(apis::price::handle_simple_price))
		.route("/markets", get(apis::markets::handle_markets))
		.route("/v1/markets", get(apis::markets::handle_markets))
		.route("/staking", get(apis::markets::handle_markets))
		.route("/v1/staking", get(apis::markets::handle_markets))
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(state)
}

/// Handles GET /health requests.
async fn handle_health() -> Json<Value> {
	Json(json!({
		"status": "ok",
		"time": Utc::now().to_rfc3339(),
	}))
}
