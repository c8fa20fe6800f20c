//! Main entry point for the price oracle service.
//!
//! This binary serves cached token prices backed by an upstream
//! market-data provider, plus a scored market listing built against the
//! static staking reference dataset. Components are wired from
//! configuration using pluggable feed implementations.

use chrono::Duration;
use clap::Parser;
use oracle_cache::PriceCache;
use oracle_config::Config;
use oracle_core::Resolver;
use oracle_feed::FeedFactory;
use oracle_reference::ReferenceDataset;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod server;

/// Command-line arguments for the oracle service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the oracle service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Wires the resolver with the configured feed implementation
/// 5. Serves the HTTP API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	tracing::info!("Started price oracle");

	// Load configuration
	let config = Config::from_file(&args.config)?;
	tracing::info!(
		feed = %config.upstream.primary,
		ttl_seconds = config.cache.ttl_seconds,
		"Loaded configuration"
	);

	// Wire up the resolver and serve
	let resolver = build_resolver(&config)?;
	server::start_server(config.server.clone(), Arc::new(resolver)).await?;

	tracing::info!("Stopped price oracle");
	Ok(())
}

/// Builds the resolver from configuration: the configured feed
/// implementation, a fresh cache, and the staking reference dataset.
fn build_resolver(config: &Config) -> Result<Resolver, Box<dyn std::error::Error>> {
	let factories: HashMap<&'static str, FeedFactory> =
		oracle_feed::get_all_implementations().into_iter().collect();

	let factory = factories
		.get(config.upstream.primary.as_str())
		.ok_or_else(|| format!("unknown feed implementation '{}'", config.upstream.primary))?;

	// Config validation guarantees the implementation section exists.
	let feed_config = config
		.upstream
		.implementations
		.get(&config.upstream.primary)
		.ok_or_else(|| {
			format!(
				"missing [upstream.implementations.{}] section",
				config.upstream.primary
			)
		})?;
	let feed = factory(feed_config)?;

	let reference = match &config.reference.path {
		Some(path) => ReferenceDataset::from_file(path)?,
		None => ReferenceDataset::builtin(),
	};
	tracing::info!(assets = reference.len(), "Loaded staking reference dataset");

	Ok(Resolver::new(
		Arc::new(PriceCache::new()),
		Arc::from(feed),
		Arc::new(reference),
		Duration::seconds(config.cache.ttl_seconds as i64),
	))
}

#[cfg(test)]
mod tests {
	use super::*;

	const MOCK_CONFIG: &str = r#"
[upstream]
primary = "mock"

[upstream.implementations.mock]
[upstream.implementations.mock.prices]
bitcoin = 67000.0
"#;

	#[test]
	fn test_args_default_values() {
		let args = Args {
			config: PathBuf::from("config.toml"),
			log_level: "info".to_string(),
		};

		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_all_feed_implementations_registered() {
		let factories: HashMap<&'static str, FeedFactory> =
			oracle_feed::get_all_implementations().into_iter().collect();

		assert!(factories.contains_key("coingecko"));
		assert!(factories.contains_key("mock"));
	}

	#[test]
	fn test_build_resolver_with_mock_feed() {
		let config: Config = MOCK_CONFIG.parse().expect("config parses");

		let resolver = build_resolver(&config).expect("resolver builds");
		assert_eq!(resolver.ttl(), Duration::hours(1));
		assert!(resolver.reference().len() > 40);
	}

	#[test]
	fn test_build_resolver_rejects_unknown_feed() {
		let toml = r#"
[upstream]
primary = "chainlink"

[upstream.implementations.chainlink]
"#;
		let config: Config = toml.parse().expect("config parses");

		let result = build_resolver(&config);
		assert!(result.is_err());
	}

	#[tokio::test]
	async fn test_mock_resolver_serves_configured_price() {
		let config: Config = MOCK_CONFIG.parse().unwrap();
		let resolver = build_resolver(&config).unwrap();

		let response = resolver.price("bitcoin", "usd").await.unwrap();
		assert_eq!(response.price, 67000.0);
		assert!(!response.cached);
	}
}
