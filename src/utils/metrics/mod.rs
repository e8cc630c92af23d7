//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines specific metrics for the application.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

lazy_static! {
	// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	// Counter Vector of settled chunks by outcome label.
	pub static ref CHUNKS_SETTLED: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("chunks_settled_total", "Number of chunks that reached a terminal state"),
			&["outcome"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter for retries caused by rate limiting.
	pub static ref RATE_LIMIT_RETRIES: IntCounter = {
		let counter = IntCounter::new("rate_limit_retries_total", "Number of chunk retries after a rate-limit response").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter for decoded logs returned by endpoints.
	pub static ref LOGS_FETCHED: IntCounter = {
		let counter = IntCounter::new("logs_fetched_total", "Number of logs fetched across all chunks").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Gauge for endpoints that passed the liveness probe.
	pub static ref HEALTHY_ENDPOINTS: IntGauge = {
		let gauge = IntGauge::new("healthy_endpoints", "Number of endpoints that passed the liveness probe").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}

/// Records the terminal outcome of a chunk
pub fn record_chunk_settled(outcome: &str, logs: usize) {
	CHUNKS_SETTLED.with_label_values(&[outcome]).inc();
	LOGS_FETCHED.inc_by(logs as u64);
}
