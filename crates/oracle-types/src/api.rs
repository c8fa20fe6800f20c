//! API error types for the oracle HTTP endpoints.
//!
//! This module defines the error envelope returned by the HTTP layer and
//! the structured error type handlers use, with its HTTP status mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Error type/code.
	pub error: String,
	/// Human-readable description.
	pub message: String,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
	/// Malformed or incomplete request (400).
	BadRequest { message: String },
	/// The requested identifier could not be resolved (404).
	NotFound { message: String },
	/// The upstream provider failed and no fallback was available (503).
	UpstreamUnavailable { message: String },
	/// Internal server error (500).
	Internal { message: String },
}

impl ApiError {
	/// Creates a bad-request error.
	pub fn bad_request(message: impl Into<String>) -> Self {
		ApiError::BadRequest {
			message: message.into(),
		}
	}

	/// Creates a not-found error.
	pub fn not_found(message: impl Into<String>) -> Self {
		ApiError::NotFound {
			message: message.into(),
		}
	}

	/// Creates an upstream-unavailable error.
	pub fn upstream(message: impl Into<String>) -> Self {
		ApiError::UpstreamUnavailable {
			message: message.into(),
		}
	}

	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			ApiError::BadRequest { .. } => 400,
			ApiError::NotFound { .. } => 404,
			ApiError::UpstreamUnavailable { .. } => 503,
			ApiError::Internal { .. } => 500,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		let (error, message) = match self {
			ApiError::BadRequest { message } => ("bad_request", message),
			ApiError::NotFound { message } => ("not_found", message),
			ApiError::UpstreamUnavailable { message } => ("upstream_unavailable", message),
			ApiError::Internal { message } => ("internal_error", message),
		};
		ErrorResponse {
			error: error.to_string(),
			message: message.clone(),
		}
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ApiError::BadRequest { message } => write!(f, "Bad Request: {}", message),
			ApiError::NotFound { message } => write!(f, "Not Found: {}", message),
			ApiError::UpstreamUnavailable { message } => {
				write!(f, "Upstream Unavailable: {}", message)
			},
			ApiError::Internal { message } => write!(f, "Internal Server Error: {}", message),
		}
	}
}

impl std::error::Error for ApiError {}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = StatusCode::from_u16(self.status_code())
			.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		let error_response = self.to_error_response();
		(status, Json(error_response)).into_response()
	}
}
