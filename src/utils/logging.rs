//! Logging utilities for the application
//!
//! Installs a `tracing_subscriber` registry with an [`EnvFilter`] and a compact
//! formatting layer. The filter directive comes from `RUST_LOG` when set,
//! otherwise from `LOG_LEVEL`, otherwise defaults to `info`.
//!
//! Records emitted through the `log` facade (the error constructors use it)
//! are bridged into the same subscriber.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Fallback directive when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Picks the filter directive from the candidate sources, first non-blank wins
pub fn resolve_filter_directive(rust_log: Option<&str>, log_level: Option<&str>) -> String {
	[rust_log, log_level]
		.into_iter()
		.flatten()
		.map(str::trim)
		.find(|directive| !directive.is_empty())
		.unwrap_or(DEFAULT_LOG_LEVEL)
		.to_string()
}

fn env_filter() -> EnvFilter {
	let rust_log = std::env::var("RUST_LOG").ok();
	let log_level = std::env::var("LOG_LEVEL").ok();
	let directive = resolve_filter_directive(rust_log.as_deref(), log_level.as_deref());
	EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Setup logging for the application, writing to stderr
///
/// Stdout is left to the rendered report.
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
	setup_logging_with_writer(std::io::stderr)?;
	Ok(())
}

/// Setup logging for the application with a custom writer
pub fn setup_logging_with_writer<W>(
	writer: W,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(env_filter())
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(true)
						.compact(),
				)
				.fmt_fields(fmt::format::PrettyFields::new()),
		)
		.try_init()?;
	Ok(())
}
