//! Common types module for the price oracle workspace.
//!
//! This module defines the core data types and structures shared across
//! the oracle components. It provides a centralized location for the
//! price, market and scoring models to ensure consistency between the
//! cache, the upstream feed and the HTTP surface.

/// API error and error-response types for the HTTP endpoints.
pub mod api;
/// Market listing types: provider records, asset rows, staking summaries.
pub mod market;
/// Price lookup types: cache keys, cached entries, lookup responses.
pub mod price;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Composite score types.
pub mod score;
/// Static staking reference entry.
pub mod staking;

// Re-export all types for convenient access
pub use api::*;
pub use market::*;
pub use price::*;
pub use registry::*;
pub use score::*;
pub use staking::*;
