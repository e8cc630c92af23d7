//! Per-address event statistics.
//!
//! Pure reduction over a merged log set: no I/O, no state, and the result
//! does not depend on the order of the logs.

use alloy::primitives::Address;

use crate::models::{saturating_sum, AnalysisResult, EventSchema, LogEntry};

pub struct EventAnalyzer;

impl EventAnalyzer {
	/// Counts the logs of `schema` whose actor is `target` and sums their amounts
	///
	/// Addresses compare by value, so the letter case or checksum formatting
	/// the target was entered with is irrelevant. Logs of other events and
	/// logs missing either argument do not match.
	pub fn analyze(logs: &[LogEntry], schema: &EventSchema, target: Address) -> AnalysisResult {
		let amounts: Vec<_> = logs
			.iter()
			.filter(|log| log.event == schema.name())
			.filter(|log| log.address_arg(schema.actor_arg()) == Some(target))
			.filter_map(|log| log.uint_arg(schema.amount_arg()))
			.collect();

		AnalysisResult {
			event: schema.name().to_string(),
			address: target,
			count: amounts.len() as u64,
			total_amount: saturating_sum(amounts),
		}
	}
}
