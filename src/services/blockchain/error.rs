//! Blockchain error types and handling.
//!
//! Every failure of an RPC call is classified into one of the variants below.
//! The classification drives the retry decision of the chunk fetcher: only
//! [`BlockChainError::RateLimited`] is worth another attempt.

use log::{error, warn};
use reqwest::StatusCode;

use crate::services::blockchain::TransportError;

/// JSON-RPC error codes providers use to signal throttling
const RATE_LIMIT_RPC_CODES: [i64; 3] = [-32005, -32029, 429];

/// Message fragments providers use to signal throttling
const RATE_LIMIT_MESSAGES: [&str; 3] = ["rate limit", "too many requests", "rate-limit"];

/// Represents possible errors that can occur during blockchain operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockChainError {
	/// The endpoint asked the caller to slow down
	RateLimited(String),

	/// Errors related to network connectivity issues
	ConnectionError(String),

	/// The request did not complete within its deadline
	Timeout(String),

	/// The endpoint rejected the request
	RequestError(String),

	/// The endpoint answered with something that could not be interpreted
	MalformedResponse(String),

	/// Internal errors within the blockchain client
	InternalError(String),
}

impl BlockChainError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::RateLimited(msg) => format!("Rate limited: {}", msg),
			Self::ConnectionError(msg) => format!("Connection error: {}", msg),
			Self::Timeout(msg) => format!("Timeout: {}", msg),
			Self::RequestError(msg) => format!("Request error: {}", msg),
			Self::MalformedResponse(msg) => format!("Malformed response: {}", msg),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	/// Creates a new rate limit error with logging
	pub fn rate_limited(msg: impl Into<String>) -> Self {
		let error = Self::RateLimited(msg.into());
		warn!("{}", error.format_message());
		error
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new timeout error with logging
	pub fn timeout(msg: impl Into<String>) -> Self {
		let error = Self::Timeout(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new malformed response error with logging
	pub fn malformed_response(msg: impl Into<String>) -> Self {
		let error = Self::MalformedResponse(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new internal error with logging
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Classifies a JSON-RPC `error` object returned with a successful HTTP status
	pub fn from_rpc_error(code: Option<i64>, message: &str) -> Self {
		let msg = match code {
			Some(code) => format!("RPC error {}: {}", code, message),
			None => format!("RPC error: {}", message),
		};
		let throttled_code = code.is_some_and(|code| RATE_LIMIT_RPC_CODES.contains(&code));
		if throttled_code || mentions_rate_limit(message) {
			Self::rate_limited(msg)
		} else {
			Self::request_error(msg)
		}
	}

	/// Whether the failed call may succeed if repeated after a pause
	pub fn is_rate_limited(&self) -> bool {
		matches!(self, Self::RateLimited(_))
	}
}

fn mentions_rate_limit(message: &str) -> bool {
	let message = message.to_lowercase();
	RATE_LIMIT_MESSAGES
		.iter()
		.any(|fragment| message.contains(fragment))
}

// Standard error trait implementations
impl std::fmt::Display for BlockChainError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl std::error::Error for BlockChainError {}

/// Conversion from transport failures to BlockChainError
impl From<TransportError> for BlockChainError {
	fn from(err: TransportError) -> Self {
		match &err {
			TransportError::Http {
				status_code, body, ..
			} if *status_code == StatusCode::TOO_MANY_REQUESTS || mentions_rate_limit(body) => {
				Self::rate_limited(err.to_string())
			}
			TransportError::Http { .. } => Self::request_error(err.to_string()),
			TransportError::Network { .. } if err.is_timeout() => Self::timeout(err.to_string()),
			TransportError::Network { .. } => Self::connection_error(err.to_string()),
			TransportError::ResponseParse(_) => Self::malformed_response(err.to_string()),
			TransportError::RequestSerialization(_) | TransportError::InvalidUrl(_) => {
				Self::internal_error(err.to_string())
			}
		}
	}
}
