//! Errors raised while loading the investigation settings.

use log::error;
use std::{error::Error, fmt, io, path::Path};

/// Why the settings file could not be turned into a usable configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
	/// The file parsed but describes an unusable investigation
	ValidationError(String),

	/// The file is not valid JSON or does not match the settings layout
	ParseError(String),

	/// The file could not be read
	FileError(String),
}

impl ConfigError {
	fn format_message(&self) -> String {
		match self {
			Self::ValidationError(msg) => format!("Invalid settings: {}", msg),
			Self::ParseError(msg) => format!("Unreadable settings: {}", msg),
			Self::FileError(msg) => format!("Settings file error: {}", msg),
		}
	}

	fn logged(self) -> Self {
		error!("{}", self.format_message());
		self
	}

	pub fn validation_error(msg: impl Into<String>) -> Self {
		Self::ValidationError(msg.into()).logged()
	}

	pub fn parse_error(msg: impl Into<String>) -> Self {
		Self::ParseError(msg.into()).logged()
	}

	pub fn file_error(msg: impl Into<String>) -> Self {
		Self::FileError(msg.into()).logged()
	}

	/// Prefixes the message with the file it concerns
	pub fn in_file(self, path: &Path) -> Self {
		let located = |msg: String| format!("{}: {}", path.display(), msg);
		match self {
			Self::ValidationError(msg) => Self::ValidationError(located(msg)),
			Self::ParseError(msg) => Self::ParseError(located(msg)),
			Self::FileError(msg) => Self::FileError(located(msg)),
		}
	}
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for ConfigError {}

impl From<io::Error> for ConfigError {
	fn from(err: io::Error) -> Self {
		match err.kind() {
			io::ErrorKind::NotFound => Self::file_error(format!(
				"not found ({}); pass --config or create config/investigation.json",
				err
			)),
			_ => Self::file_error(err.to_string()),
		}
	}
}

impl From<serde_json::Error> for ConfigError {
	fn from(err: serde_json::Error) -> Self {
		Self::parse_error(format!("line {} column {}: {}", err.line(), err.column(), err))
	}
}
