use std::{collections::HashSet, path::Path};

use crate::{
	models::{ConfigLoader, InvestigationConfig},
	utils::parsing::split_comma_list,
};

use super::error::ConfigError;

fn is_http_url(url: &str) -> bool {
	url.starts_with("http://") || url.starts_with("https://")
}

/// Endpoint URLs from `RPC_URLS` (comma-separated) or else `RPC_URL`
pub fn rpc_urls_from_env() -> Vec<String> {
	std::env::var("RPC_URLS")
		.or_else(|_| std::env::var("RPC_URL"))
		.map(|value| split_comma_list(&value))
		.unwrap_or_default()
}

impl ConfigLoader for InvestigationConfig {
	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		if !Self::is_json_file(path) {
			return Err(ConfigError::file_error(format!(
				"{} is not a JSON file",
				path.display()
			)));
		}

		let file = std::fs::File::open(path).map_err(|e| ConfigError::from(e).in_file(path))?;
		let mut config: InvestigationConfig =
			serde_json::from_reader(file).map_err(|e| ConfigError::from(e).in_file(path))?;
		config.override_rpc_urls(rpc_urls_from_env());

		// Validate the config after loading
		if let Err(validation_error) = config.validate() {
			return Err(ConfigError::validation_error(validation_error).in_file(path));
		}

		Ok(config)
	}

	fn validate(&self) -> Result<(), String> {
		// Validate RPC URLs
		if self.rpc_urls.is_empty() {
			return Err("At least one RPC URL must be configured".to_string());
		}
		if let Some(url) = self.rpc_urls.iter().find(|url| !is_http_url(url)) {
			return Err(format!(
				"All RPC URLs must start with http:// or https://, got {}",
				url
			));
		}

		// Validate scan window
		if self.chunk_size == 0 {
			return Err("chunk_size must be greater than 0".to_string());
		}
		if self.total_blocks == 0 {
			return Err("total_blocks must be greater than 0".to_string());
		}
		if self.worker_pool_size == Some(0) {
			return Err("worker_pool_size must be greater than 0".to_string());
		}

		// Validate timeouts
		if self.probe_timeout_ms == 0 || self.request_timeout_ms == 0 {
			return Err("Timeouts must be greater than 0".to_string());
		}

		// Validate pricing sources
		if !is_http_url(&self.pricing.primary_url) || !is_http_url(&self.pricing.fallback_url) {
			return Err("Price URLs must start with http:// or https://".to_string());
		}

		// Validate events
		if self.events.is_empty() {
			return Err("At least one event must be configured".to_string());
		}
		let mut keys = HashSet::new();
		for event in &self.events {
			if event.key.trim().is_empty() || event.key.trim() == "*" {
				return Err(format!("Event {} has an invalid key", event.name));
			}
			if !keys.insert(event.key.trim()) {
				return Err(format!("Duplicate event key {}", event.key));
			}
			event.schema()?;
		}

		Ok(())
	}
}
