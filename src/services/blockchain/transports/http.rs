//! HTTP transport implementation for blockchain interactions.
//!
//! Each client is pinned to a single JSON-RPC endpoint. Work is bound to an
//! endpoint when it is planned, so the transport never rotates URLs and never
//! retries on its own: rate-limit responses surface to the caller untouched.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::services::blockchain::transports::{BlockchainTransport, TransportError};

/// HTTP transport client for a single JSON-RPC endpoint
///
/// The client is cheap to clone and can be shared across tasks.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	client: Client,
	url: Url,
	url_str: String,
}

impl HttpTransportClient {
	/// Creates a new transport client
	///
	/// # Arguments
	/// * `url` - Endpoint URL, must be http or https
	/// * `request_timeout` - Upper bound for a full request/response cycle
	/// * `connect_timeout` - Upper bound for establishing the connection
	///
	/// # Returns
	/// * `Result<Self, TransportError>` - New client instance or an invalid URL error
	pub fn new(
		url: &str,
		request_timeout: Duration,
		connect_timeout: Duration,
	) -> Result<Self, TransportError> {
		let parsed =
			Url::parse(url).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", url, e)))?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(TransportError::InvalidUrl(format!(
				"{}: unsupported scheme {}",
				url,
				parsed.scheme()
			)));
		}

		let client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.timeout(request_timeout)
			.connect_timeout(connect_timeout)
			.build()
			.map_err(|e| TransportError::Network {
				message: format!("Failed to create HTTP client: {}", e),
				is_timeout: false,
			})?;

		Ok(Self {
			client,
			url: parsed,
			url_str: url.to_string(),
		})
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	fn url(&self) -> &str {
		&self.url_str
	}

	/// Sends a JSON-RPC request to the endpoint
	///
	/// Non-success HTTP statuses are returned as [`TransportError::Http`] with
	/// the response body attached, so callers can classify them.
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		let request_body = self.customize_request(method, params).await;
		let body = serde_json::to_string(&request_body)
			.map_err(|e| TransportError::RequestSerialization(e.to_string()))?;

		let response = self
			.client
			.post(self.url.clone())
			.header("Content-Type", "application/json")
			.body(body)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let error_body = response.text().await.unwrap_or_default();
			tracing::debug!(
				url = %self.url_str,
				method,
				"Request failed with status {}: {}",
				status,
				error_body
			);
			return Err(TransportError::Http {
				status_code: status,
				url: self.url_str.clone(),
				body: error_body,
			});
		}

		response
			.json()
			.await
			.map_err(|e| TransportError::ResponseParse(e.to_string()))
	}
}
