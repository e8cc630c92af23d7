//! Parallel chunk aggregation.
//!
//! Runs every chunk of a partition plan through the fetcher bound to its
//! endpoint with a bounded number of fetches in flight, merges the logs of
//! successful chunks and keeps a record of every failed one. The run only
//! returns once every chunk has settled.

mod progress;

pub use progress::{Progress, ProgressCallback, ProgressTracker};

use futures::{stream, StreamExt};
use serde::Serialize;
use tokio::sync::watch;

use crate::{
	models::{BlockRange, Chunk, ChunkOutcome, FetchFailure, LogEntry, SettledChunk},
	services::{blockchain::EvmClientTrait, fetcher::ChunkFetcher},
	utils::metrics::record_chunk_settled,
};

/// Diagnostic record of a chunk whose logs are missing from the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkFailureRecord {
	pub chunk_id: usize,
	pub range: BlockRange,
	pub endpoint_url: String,
	pub retries: u32,
	pub reason: FetchFailure,
}

/// Merged result of one aggregation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationReport {
	/// Logs of all successful chunks, in no particular order
	pub logs: Vec<LogEntry>,
	pub failures: Vec<ChunkFailureRecord>,
	pub chunks_total: usize,
	pub chunks_succeeded: usize,
}

impl AggregationReport {
	/// Whether every chunk delivered its logs
	pub fn is_complete(&self) -> bool {
		self.failures.is_empty()
	}

	/// Folds one settled chunk into the report
	pub fn merge(&mut self, settled: SettledChunk) {
		match settled.outcome {
			ChunkOutcome::Success(logs) => {
				self.chunks_succeeded += 1;
				self.logs.extend(logs);
			}
			ChunkOutcome::Failure(reason) => self.failures.push(ChunkFailureRecord {
				chunk_id: settled.chunk.id,
				range: settled.chunk.range,
				endpoint_url: settled.chunk.endpoint_url,
				retries: settled.retries,
				reason,
			}),
		}
	}
}

/// Resolves once shutdown is requested; never resolves if the sender is gone
async fn wait_for_shutdown(shutdown_rx: &mut watch::Receiver<bool>) {
	loop {
		if *shutdown_rx.borrow_and_update() {
			return;
		}
		if shutdown_rx.changed().await.is_err() {
			std::future::pending::<()>().await;
		}
	}
}

fn settle_without_fetch(chunk: Chunk, reason: FetchFailure) -> SettledChunk {
	record_chunk_settled(reason.label(), 0);
	SettledChunk {
		chunk,
		retries: 0,
		outcome: ChunkOutcome::Failure(reason),
	}
}

/// Dispatches chunks to a bounded pool of concurrent fetches
pub struct LogAggregator {
	pool_size: usize,
	progress_callback: Option<ProgressCallback>,
}

impl LogAggregator {
	/// Creates an aggregator running at most `pool_size` fetches at once
	///
	/// A pool size of zero is treated as one.
	pub fn new(pool_size: usize) -> Self {
		Self {
			pool_size: pool_size.max(1),
			progress_callback: None,
		}
	}

	pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
		self.progress_callback = Some(callback);
		self
	}

	pub fn pool_size(&self) -> usize {
		self.pool_size
	}

	/// Runs all chunks to a terminal state and merges their results
	///
	/// `fetchers[i]` serves the chunks whose `endpoint_index` is `i`. Once
	/// `shutdown_rx` turns true, chunks still pending or in flight settle as
	/// [`FetchFailure::Cancelled`].
	pub async fn run<C: EvmClientTrait>(
		&self,
		chunks: Vec<Chunk>,
		fetchers: &[ChunkFetcher<C>],
		shutdown_rx: watch::Receiver<bool>,
	) -> AggregationReport {
		let tracker = ProgressTracker::new(chunks.len(), self.progress_callback.clone());
		let mut report = AggregationReport {
			chunks_total: chunks.len(),
			..AggregationReport::default()
		};

		let mut settled_chunks = stream::iter(chunks.into_iter().map(|chunk| {
			let mut shutdown_rx = shutdown_rx.clone();
			async move {
				if *shutdown_rx.borrow() {
					return settle_without_fetch(chunk, FetchFailure::Cancelled);
				}
				let Some(fetcher) = fetchers.get(chunk.endpoint_index) else {
					let reason = FetchFailure::Unexpected(format!(
						"no client bound to endpoint index {}",
						chunk.endpoint_index
					));
					return settle_without_fetch(chunk, reason);
				};

				let pending = chunk.clone();
				tokio::select! {
					biased;
					_ = wait_for_shutdown(&mut shutdown_rx) => {
						tracing::warn!(chunk_id = pending.id, range = %pending.range, "Chunk cancelled");
						settle_without_fetch(pending, FetchFailure::Cancelled)
					}
					settled = fetcher.fetch(chunk) => settled,
				}
			}
		}))
		.buffer_unordered(self.pool_size);

		// The report and the tracker are only touched from this loop
		while let Some(settled) = settled_chunks.next().await {
			report.merge(settled);
			tracker.advance();
		}

		if !report.is_complete() {
			tracing::warn!(
				failed = report.failures.len(),
				total = report.chunks_total,
				"Some chunks failed; counts may be understated"
			);
		}
		report
	}
}
