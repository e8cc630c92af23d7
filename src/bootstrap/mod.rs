//! Bootstrap module for running an investigation end to end.
//!
//! Wires the services together in pipeline order:
//!
//! 1. `EndpointProber`: keeps the endpoints that answer a liveness call
//! 2. Range resolution: the configured end block or the chain head reported
//!    by the first healthy endpoint, minus the configured window
//! 3. `PartitionPlanner`: one plan shared by every selected event
//! 4. `LogAggregator`: fetches all chunks of an event concurrently
//! 5. `EventAnalyzer`: one result per requested address
//!
//! Only the loss of every endpoint aborts a run. Chunk failures are carried
//! in the report next to the numbers they affect.

use alloy::primitives::Address;
use serde::Serialize;
use std::{collections::HashSet, sync::Arc};
use thiserror::Error;
use tokio::sync::watch;

use crate::{
	models::{AnalysisResult, BlockRange, Endpoint, EventSchema, InvestigationConfig},
	services::{
		aggregator::{ChunkFailureRecord, LogAggregator, Progress},
		analyzer::EventAnalyzer,
		blockchain::{EndpointClient, EvmClientTrait},
		fetcher::{ChunkFetcher, RetryPolicy},
		health::{EndpointProber, HealthError},
		partition::{PartitionError, PartitionPlanner},
	},
	utils::parsing::split_comma_list,
};

#[derive(Debug, Error)]
pub enum InvestigationError {
	#[error(transparent)]
	NoHealthyEndpoints(#[from] HealthError),

	#[error(transparent)]
	Partition(#[from] PartitionError),

	#[error("No healthy endpoint reported a chain head")]
	ChainHeadUnknown,

	#[error("No events selected")]
	NoEventsSelected,

	#[error("No addresses to investigate")]
	NoAddresses,
}

/// Progress callback receiving the event name alongside the progress
pub type EventProgressCallback = Arc<dyn Fn(&str, Progress) + Send + Sync>;

/// Results of one event across all requested addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventReport {
	pub event: String,
	pub display_name: String,
	pub results: Vec<AnalysisResult>,
	/// Chunks whose logs are missing; non-empty means the numbers may be too low
	pub failures: Vec<ChunkFailureRecord>,
	pub chunks_total: usize,
	pub chunks_succeeded: usize,
	pub logs_fetched: usize,
}

impl EventReport {
	pub fn is_complete(&self) -> bool {
		self.failures.is_empty()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestigationReport {
	pub range: BlockRange,
	pub healthy_endpoints: Vec<Endpoint>,
	pub events: Vec<EventReport>,
	/// Set when shutdown was requested before every event was processed
	pub cancelled: bool,
}

/// Resolves an event selection against the configured schemas
///
/// `*` selects every event. Otherwise the input is a comma-separated list of
/// event keys; unknown keys are reported and skipped, repeated keys are
/// processed once. Order follows the input.
pub fn select_events(schemas: &[EventSchema], selection: &str) -> Vec<EventSchema> {
	if selection.trim() == "*" {
		return schemas.to_vec();
	}

	let mut seen = HashSet::new();
	let mut selected = Vec::new();
	for key in split_comma_list(selection) {
		match schemas.iter().find(|schema| schema.spec().key == key) {
			Some(schema) => {
				if seen.insert(key) {
					selected.push(schema.clone());
				}
			}
			None => tracing::warn!("Invalid event selection: {}. Skipping.", key),
		}
	}
	selected
}

/// A configured investigation over a set of candidate endpoints
pub struct Investigation<C> {
	config: InvestigationConfig,
	candidates: Vec<EndpointClient<C>>,
	progress_callback: Option<EventProgressCallback>,
}

impl<C: EvmClientTrait> Investigation<C> {
	pub fn new(config: InvestigationConfig, candidates: Vec<EndpointClient<C>>) -> Self {
		Self {
			config,
			candidates,
			progress_callback: None,
		}
	}

	pub fn with_progress_callback(mut self, callback: EventProgressCallback) -> Self {
		self.progress_callback = Some(callback);
		self
	}

	/// Determines the scanned range from the configuration or the probed head
	///
	/// The head comes from the liveness answers, so no endpoint is queried
	/// again between probing and fetching.
	fn resolve_range(
		&self,
		healthy: &[EndpointClient<C>],
	) -> Result<BlockRange, InvestigationError> {
		let end = match self.config.end_block {
			Some(end) => end,
			None => healthy
				.iter()
				.find_map(|candidate| candidate.head)
				.ok_or(InvestigationError::ChainHeadUnknown)?,
		};
		Ok(BlockRange::trailing(end, self.config.total_blocks))
	}

	/// Runs the investigation for `events` and `addresses`
	///
	/// # Errors
	/// Fails before any chunk is scheduled when no endpoint is healthy or
	/// there is nothing to investigate.
	pub async fn run(
		&self,
		events: &[EventSchema],
		addresses: &[Address],
		shutdown_rx: watch::Receiver<bool>,
	) -> Result<InvestigationReport, InvestigationError> {
		if events.is_empty() {
			return Err(InvestigationError::NoEventsSelected);
		}
		if addresses.is_empty() {
			return Err(InvestigationError::NoAddresses);
		}

		let prober = EndpointProber::new(self.config.probe_timeout());
		let healthy = prober.probe(self.candidates.clone()).await?;

		let range = self.resolve_range(&healthy)?;
		tracing::info!(
			"Starting log investigation from block {} to {} (total {} blocks)",
			range.start(),
			range.end(),
			range.len()
		);

		let endpoints: Vec<Endpoint> = healthy.iter().map(|h| h.endpoint.clone()).collect();
		let planner = PartitionPlanner::new(self.config.chunk_size)?;
		let plan = planner.plan(range, &endpoints)?;

		let pool_size = self.config.worker_pool_size.unwrap_or(healthy.len());
		let policy = RetryPolicy {
			max_retries: self.config.max_retries,
			backoff: self.config.retry_backoff(),
		};

		let mut reports = Vec::with_capacity(events.len());
		let mut cancelled = false;
		for schema in events {
			if *shutdown_rx.borrow() {
				cancelled = true;
				break;
			}

			let schema = Arc::new(schema.clone());
			tracing::info!("--- Analyzing {} Events ---", schema.name());

			let fetchers: Vec<ChunkFetcher<C>> = healthy
				.iter()
				.map(|h| {
					ChunkFetcher::new(
						h.client.clone(),
						self.config.contract_address,
						schema.clone(),
						policy,
					)
				})
				.collect();

			let mut aggregator = LogAggregator::new(pool_size);
			if let Some(callback) = &self.progress_callback {
				let callback = callback.clone();
				let event = schema.name().to_string();
				aggregator = aggregator
					.with_progress_callback(Arc::new(move |p: Progress| callback(&event, p)));
			}

			let aggregation = aggregator
				.run(plan.clone(), &fetchers, shutdown_rx.clone())
				.await;

			let results = addresses
				.iter()
				.map(|address| EventAnalyzer::analyze(&aggregation.logs, &schema, *address))
				.collect();

			reports.push(EventReport {
				event: schema.name().to_string(),
				display_name: schema.spec().display_name().to_string(),
				results,
				logs_fetched: aggregation.logs.len(),
				failures: aggregation.failures,
				chunks_total: aggregation.chunks_total,
				chunks_succeeded: aggregation.chunks_succeeded,
			});
		}

		if *shutdown_rx.borrow() {
			cancelled = true;
		}

		Ok(InvestigationReport {
			range,
			healthy_endpoints: endpoints,
			events: reports,
			cancelled,
		})
	}
}
