//! Configuration module for the price oracle service.
//!
//! This module provides structures and utilities for managing the oracle
//! configuration. It supports loading configuration from TOML files with
//! environment-variable resolution (`${VAR}` and `${VAR:-default}`) and
//! validates that all required values are properly set.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the oracle service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration for the HTTP server.
	#[serde(default)]
	pub server: ServerConfig,
	/// Configuration for the price cache.
	#[serde(default)]
	pub cache: CacheConfig,
	/// Configuration for the upstream price feed.
	pub upstream: UpstreamConfig,
	/// Configuration for the static staking reference dataset.
	#[serde(default)]
	pub reference: ReferenceConfig,
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
	/// Host address to bind the server to.
	#[serde(default = "default_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_port")]
	pub port: u16,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: default_host(),
			port: default_port(),
		}
	}
}

/// Configuration for the price cache.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
	/// Seconds after which a cached entry is considered stale.
	/// Stale entries are re-fetched on access but kept as a fallback.
	#[serde(default = "default_ttl_seconds")]
	pub ttl_seconds: u64,
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			ttl_seconds: default_ttl_seconds(),
		}
	}
}

/// Configuration for the upstream price feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
	/// Which feed implementation to use as primary.
	#[serde(default = "default_feed")]
	pub primary: String,
	/// Map of feed implementation names to their configurations.
	/// Each implementation has its own configuration format stored as raw
	/// TOML values and validated by its factory.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the static staking reference dataset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReferenceConfig {
	/// Optional path to a TOML file replacing the built-in dataset.
	pub path: Option<PathBuf>,
}

/// Returns the default server bind host.
fn default_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default server port.
fn default_port() -> u16 {
	8080
}

/// Returns the default cache TTL in seconds.
///
/// Price entries are served from the cache for one hour before a
/// re-fetch is attempted.
fn default_ttl_seconds() -> u64 {
	3600
}

/// Returns the default feed implementation name.
fn default_feed() -> String {
	"coingecko".to_string()
}

impl Config {
	/// Loads configuration from a TOML file, resolving environment
	/// variables before parsing.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		content.parse()
	}

	/// Validates the configuration after parsing.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.cache.ttl_seconds == 0 {
			return Err(ConfigError::Validation(
				"cache.ttl_seconds must be greater than zero".to_string(),
			));
		}
		if self.upstream.primary.is_empty() {
			return Err(ConfigError::Validation(
				"upstream.primary must not be empty".to_string(),
			));
		}
		if !self
			.upstream
			.implementations
			.contains_key(&self.upstream.primary)
		{
			return Err(ConfigError::Validation(format!(
				"upstream.primary '{}' has no matching [upstream.implementations.{}] section",
				self.upstream.primary, self.upstream.primary
			)));
		}
		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

/// Resolves environment variables in a configuration string.
///
/// Replaces `${VAR_NAME}` with the value of the environment variable
/// VAR_NAME. Supports fallback values with `${VAR_NAME:-default}`; a
/// reference without a fallback to a variable that is not set is a
/// validation error.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	let pattern = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut output = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in pattern.captures_iter(input) {
		let whole = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let fallback = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match fallback {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				},
			},
		};

		output.push_str(&input[last_end..whole.start()]);
		output.push_str(&value);
		last_end = whole.end();
	}
	output.push_str(&input[last_end..]);

	Ok(output)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const MINIMAL: &str = r#"
[upstream]
primary = "mock"

[upstream.implementations.mock]
"#;

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("ORACLE_TEST_HOST", "localhost");
		std::env::set_var("ORACLE_TEST_PORT", "9090");

		let input = "bind = \"${ORACLE_TEST_HOST}:${ORACLE_TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "bind = \"localhost:9090\"");

		std::env::remove_var("ORACLE_TEST_HOST");
		std::env::remove_var("ORACLE_TEST_PORT");
	}

	#[test]
	fn test_env_var_with_fallback() {
		std::env::remove_var("ORACLE_TEST_MISSING");
		let result = resolve_env_vars("key = \"${ORACLE_TEST_MISSING:-demo-key}\"").unwrap();
		assert_eq!(result, "key = \"demo-key\"");
	}

	#[test]
	fn test_missing_env_var_is_an_error() {
		std::env::remove_var("ORACLE_TEST_ABSENT");
		let result = resolve_env_vars("key = \"${ORACLE_TEST_ABSENT}\"");
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_minimal_config_defaults() {
		let config: Config = MINIMAL.parse().unwrap();
		assert_eq!(config.server.host, "127.0.0.1");
		assert_eq!(config.server.port, 8080);
		assert_eq!(config.cache.ttl_seconds, 3600);
		assert_eq!(config.upstream.primary, "mock");
		assert!(config.reference.path.is_none());
	}

	#[test]
	fn test_full_config_parse() {
		let toml = r#"
[server]
host = "0.0.0.0"
port = 3000

[cache]
ttl_seconds = 600

[upstream]
primary = "coingecko"

[upstream.implementations.coingecko]
api_key = "${ORACLE_TEST_KEY:-CG-test}"

[reference]
path = "staking.toml"
"#;
		let config: Config = toml.parse().unwrap();
		assert_eq!(config.server.port, 3000);
		assert_eq!(config.cache.ttl_seconds, 600);
		let cg = &config.upstream.implementations["coingecko"];
		assert_eq!(cg.get("api_key").and_then(|v| v.as_str()), Some("CG-test"));
		assert_eq!(config.reference.path, Some(PathBuf::from("staking.toml")));
	}

	#[test]
	fn test_zero_ttl_rejected() {
		let toml = r#"
[cache]
ttl_seconds = 0

[upstream]
primary = "mock"

[upstream.implementations.mock]
"#;
		let result: Result<Config, _> = toml.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_primary_without_implementation_rejected() {
		let toml = r#"
[upstream]
primary = "coingecko"

[upstream.implementations.mock]
"#;
		let result: Result<Config, _> = toml.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(MINIMAL.as_bytes()).unwrap();

		let config = Config::from_file(file.path()).unwrap();
		assert_eq!(config.upstream.primary, "mock");
	}
}
