//! HTTP endpoint handlers for the price oracle API.

/// Market listing endpoints.
pub mod markets;
/// Price lookup endpoints.
pub mod price;
