//! Configuration loading and validation.
//!
//! Implements the [`ConfigLoader`] trait for the investigation settings file.

use std::path::Path;

mod error;
mod investigation_config;

pub use error::ConfigError;
pub use investigation_config::rpc_urls_from_env;

/// Default location of the investigation settings file
pub const DEFAULT_CONFIG_PATH: &str = "config/investigation.json";

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized {
	fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	fn validate(&self) -> Result<(), String>;

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
