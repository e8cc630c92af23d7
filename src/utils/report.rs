//! Rendering of analysis results and progress for the console.

use alloy::primitives::{utils::format_units, U256};
use std::time::Duration;

use crate::models::{AnalysisResult, InvestigationConfig};

/// Units an analysis line is rendered in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountUnits {
	pub decimals: u8,
	/// Label of the scaled amount, e.g. `ETH`
	pub symbol: String,
	/// Label of the converted value, e.g. `USD`
	pub quote: String,
}

impl AmountUnits {
	/// Takes the decimals and currency keys from the settings
	pub fn from_config(config: &InvestigationConfig) -> Self {
		Self {
			decimals: config.amount_decimals,
			symbol: config.pricing.base_currency.to_uppercase(),
			quote: config.pricing.quote_currency.to_uppercase(),
		}
	}

	fn format_converted(&self, value: f64) -> String {
		if self.quote == "USD" {
			format!("${:.2}", value)
		} else {
			format!("{:.2} {}", value, self.quote)
		}
	}
}

/// Scales a raw integer amount by `decimals` into a float
///
/// Falls back to zero only if the amount cannot be rendered at all.
pub fn scale_amount(amount: U256, decimals: u8) -> f64 {
	format_units(amount, decimals)
		.ok()
		.and_then(|rendered| rendered.parse::<f64>().ok())
		.unwrap_or_default()
}

/// Renders one (event, address) result as a sentence
///
/// `rate` converts one scaled unit into the quote currency. When it is
/// unavailable the sentence says so instead of showing a converted value.
pub fn format_analysis_line(
	result: &AnalysisResult,
	display_name: &str,
	units: &AmountUnits,
	rate: Option<f64>,
) -> String {
	let amount = scale_amount(result.total_amount, units.decimals);
	let converted = match rate {
		Some(rate) => units.format_converted(amount * rate),
		None => format!("{} value not available", units.quote),
	};
	format!(
		"Address {} has {} {} times with a total amount of {:.4} {} ({}).",
		result.address,
		display_name.to_lowercase(),
		result.count,
		amount,
		units.symbol,
		converted
	)
}

/// Formats a remaining duration as `Mm Ss`
pub fn format_eta(eta: Option<Duration>) -> String {
	match eta {
		Some(eta) => {
			let secs = eta.as_secs();
			format!("{}m {}s", secs / 60, secs % 60)
		}
		None => "N/A".to_string(),
	}
}

/// Renders a progress line for an event fetch
pub fn format_progress(
	event: &str,
	completed: usize,
	total: usize,
	eta: Option<Duration>,
) -> String {
	let percent = if total == 0 {
		100.0
	} else {
		completed as f64 * 100.0 / total as f64
	};
	format!(
		"Fetching {} logs: {}/{} chunks [{:.2}% Done, ETA: {}]",
		event,
		completed,
		total,
		percent,
		format_eta(eta)
	)
}
