use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::{Endpoint, EventSchema, EventSpec};

pub const DEFAULT_CHUNK_SIZE: u64 = 500;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 10_000;
pub const DEFAULT_TOTAL_BLOCKS: u64 = 432_000;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_AMOUNT_DECIMALS: u8 = 18;

pub const DEFAULT_PRICE_PRIMARY_URL: &str =
	"https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/eth.json";
pub const DEFAULT_PRICE_FALLBACK_URL: &str =
	"https://latest.currency-api.pages.dev/v1/currencies/eth.json";

/// Source of the conversion rate used when rendering amounts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
	#[serde(default = "default_price_primary_url")]
	pub primary_url: String,
	#[serde(default = "default_price_fallback_url")]
	pub fallback_url: String,
	/// Top-level key of the rate document
	#[serde(default = "default_base_currency")]
	pub base_currency: String,
	/// Key of the quoted currency under `base_currency`
	#[serde(default = "default_quote_currency")]
	pub quote_currency: String,
}

impl Default for PricingConfig {
	fn default() -> Self {
		Self {
			primary_url: default_price_primary_url(),
			fallback_url: default_price_fallback_url(),
			base_currency: default_base_currency(),
			quote_currency: default_quote_currency(),
		}
	}
}

/// Everything a single investigation run needs to know
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InvestigationConfig {
	/// RPC endpoints, in priority order
	#[serde(default)]
	pub rpc_urls: Vec<String>,
	/// Contract emitting the investigated events
	pub contract_address: Address,
	#[serde(default = "default_chunk_size")]
	pub chunk_size: u64,
	#[serde(default = "default_max_retries")]
	pub max_retries: u32,
	#[serde(default = "default_retry_backoff_ms")]
	pub retry_backoff_ms: u64,
	/// Number of blocks behind `end_block` covered by the scan
	#[serde(default = "default_total_blocks")]
	pub total_blocks: u64,
	/// Last block of the scan; the chain head when absent
	#[serde(default)]
	pub end_block: Option<u64>,
	#[serde(default = "default_probe_timeout_ms")]
	pub probe_timeout_ms: u64,
	#[serde(default = "default_request_timeout_ms")]
	pub request_timeout_ms: u64,
	#[serde(default = "default_connect_timeout_ms")]
	pub connect_timeout_ms: u64,
	/// Concurrent chunk fetches; one per healthy endpoint when absent
	#[serde(default)]
	pub worker_pool_size: Option<usize>,
	/// Decimals used to scale raw amounts for display
	#[serde(default = "default_amount_decimals")]
	pub amount_decimals: u8,
	#[serde(default)]
	pub pricing: PricingConfig,
	pub events: Vec<EventSpec>,
}

impl InvestigationConfig {
	/// Endpoint candidates built from the configured URLs
	pub fn endpoints(&self) -> Vec<Endpoint> {
		self.rpc_urls.iter().map(|url| Endpoint::new(url)).collect()
	}

	/// Validated schemas for every configured event, in configuration order
	pub fn schemas(&self) -> Result<Vec<EventSchema>, String> {
		self.events.iter().map(EventSpec::schema).collect()
	}

	/// Replaces the configured endpoints when `urls` is non-empty
	pub fn override_rpc_urls(&mut self, urls: Vec<String>) {
		if !urls.is_empty() {
			self.rpc_urls = urls;
		}
	}

	pub fn retry_backoff(&self) -> Duration {
		Duration::from_millis(self.retry_backoff_ms)
	}

	pub fn probe_timeout(&self) -> Duration {
		Duration::from_millis(self.probe_timeout_ms)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.request_timeout_ms)
	}

	pub fn connect_timeout(&self) -> Duration {
		Duration::from_millis(self.connect_timeout_ms)
	}
}

fn default_chunk_size() -> u64 {
	DEFAULT_CHUNK_SIZE
}

fn default_max_retries() -> u32 {
	DEFAULT_MAX_RETRIES
}

fn default_retry_backoff_ms() -> u64 {
	DEFAULT_RETRY_BACKOFF_MS
}

fn default_total_blocks() -> u64 {
	DEFAULT_TOTAL_BLOCKS
}

fn default_probe_timeout_ms() -> u64 {
	DEFAULT_PROBE_TIMEOUT_MS
}

fn default_request_timeout_ms() -> u64 {
	DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_connect_timeout_ms() -> u64 {
	DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_amount_decimals() -> u8 {
	DEFAULT_AMOUNT_DECIMALS
}

fn default_price_primary_url() -> String {
	DEFAULT_PRICE_PRIMARY_URL.to_string()
}

fn default_price_fallback_url() -> String {
	DEFAULT_PRICE_FALLBACK_URL.to_string()
}

fn default_base_currency() -> String {
	"eth".to_string()
}

fn default_quote_currency() -> String {
	"usd".to_string()
}
