//! Transport error types.
//!
//! Errors raised while moving a JSON-RPC request over the wire, before any
//! interpretation of the RPC payload takes place.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
	/// The endpoint answered with a non-success HTTP status
	#[error("HTTP error: status {status_code} for URL {url}: {body}")]
	Http {
		status_code: StatusCode,
		url: String,
		body: String,
	},

	/// The request never produced a response
	#[error("Network error: {message}")]
	Network { message: String, is_timeout: bool },

	/// The response body was not valid JSON
	#[error("Failed to parse JSON response: {0}")]
	ResponseParse(String),

	#[error("Failed to serialize request JSON: {0}")]
	RequestSerialization(String),

	#[error("Invalid URL: {0}")]
	InvalidUrl(String),
}

impl TransportError {
	pub fn is_timeout(&self) -> bool {
		matches!(
			self,
			Self::Network {
				is_timeout: true,
				..
			}
		)
	}
}

impl From<reqwest::Error> for TransportError {
	fn from(err: reqwest::Error) -> Self {
		Self::Network {
			is_timeout: err.is_timeout(),
			message: err.to_string(),
		}
	}
}
