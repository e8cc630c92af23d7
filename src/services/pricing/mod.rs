//! Currency conversion rate lookup.
//!
//! Fetches a rate document from a primary source and falls back to a second
//! one. A missing rate is a degraded result, never an error: amounts are then
//! rendered without a converted value.

use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use std::time::Duration;

use crate::{
	models::PricingConfig,
	utils::{create_retryable_http_client, HttpRetryConfig},
};

/// Reads `document[base][quote]` as a number
fn extract_rate(document: &Value, base: &str, quote: &str) -> Result<f64, String> {
	document
		.get(base)
		.and_then(|rates| rates.get(quote))
		.and_then(Value::as_f64)
		.ok_or_else(|| format!("Rate document has no numeric {}.{} field", base, quote))
}

pub struct PriceService {
	client: ClientWithMiddleware,
	config: PricingConfig,
}

impl PriceService {
	/// Creates a price service with the default retry behavior
	pub fn new(config: PricingConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
		Self::with_retry_config(config, timeout, &HttpRetryConfig::default())
	}

	pub fn with_retry_config(
		config: PricingConfig,
		timeout: Duration,
		retry_config: &HttpRetryConfig,
	) -> Result<Self, reqwest::Error> {
		let base_client = reqwest::ClientBuilder::new().timeout(timeout).build()?;
		Ok(Self {
			client: create_retryable_http_client(retry_config, base_client),
			config,
		})
	}

	async fn fetch_from(&self, url: &str) -> Result<f64, String> {
		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(|e| e.to_string())?;

		let status = response.status();
		if !status.is_success() {
			return Err(format!("status {}", status));
		}

		let document: Value = response.json().await.map_err(|e| e.to_string())?;
		extract_rate(
			&document,
			&self.config.base_currency,
			&self.config.quote_currency,
		)
	}

	/// Fetches the conversion rate, trying the fallback source on failure
	pub async fn fetch_rate(&self) -> Option<f64> {
		match self.fetch_from(&self.config.primary_url).await {
			Ok(rate) => return Some(rate),
			Err(e) => tracing::warn!(
				url = %self.config.primary_url,
				"Primary rate source failed: {}. Trying fallback",
				e
			),
		}

		match self.fetch_from(&self.config.fallback_url).await {
			Ok(rate) => Some(rate),
			Err(e) => {
				tracing::warn!(
					url = %self.config.fallback_url,
					"Fallback rate source also failed: {}. Rate unavailable",
					e
				);
				None
			}
		}
	}
}
