//! Chunk fetching with bounded retry on rate limiting.
//!
//! A [`ChunkFetcher`] runs the log query of one chunk against the endpoint it
//! is bound to. Rate-limit responses are retried after a fixed pause until the
//! retry budget is spent. Every other error settles the chunk immediately.
//! Fetching never fails: the outcome is always a [`SettledChunk`].

use alloy::primitives::Address;
use backon::{ConstantBuilder, Retryable};
use std::{
	sync::{
		atomic::{AtomicU32, Ordering},
		Arc,
	},
	time::Duration,
};

use crate::{
	models::{
		Chunk, ChunkOutcome, EventSchema, FetchFailure, SettledChunk, DEFAULT_MAX_RETRIES,
		DEFAULT_RETRY_BACKOFF_MS,
	},
	services::blockchain::{BlockChainError, EvmClientTrait, LogQuery},
	utils::metrics::{record_chunk_settled, RATE_LIMIT_RETRIES},
};

/// How often and how patiently a rate-limited chunk is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Additional attempts after the first one
	pub max_retries: u32,
	/// Fixed pause before every retry
	pub backoff: Duration,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_retries: DEFAULT_MAX_RETRIES,
			backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
		}
	}
}

/// Maps the terminal error of a chunk to its failure reason
fn classify(error: &BlockChainError, attempts: u32) -> FetchFailure {
	match error {
		BlockChainError::RateLimited(_) => FetchFailure::RateLimitExhausted { attempts },
		BlockChainError::ConnectionError(msg) => FetchFailure::Connectivity(msg.clone()),
		BlockChainError::Timeout(msg) => FetchFailure::Timeout(msg.clone()),
		other => FetchFailure::Unexpected(other.to_string()),
	}
}

/// Fetches the logs of chunks bound to one endpoint
pub struct ChunkFetcher<C> {
	client: Arc<C>,
	contract: Address,
	schema: Arc<EventSchema>,
	policy: RetryPolicy,
}

impl<C> Clone for ChunkFetcher<C> {
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			contract: self.contract,
			schema: self.schema.clone(),
			policy: self.policy,
		}
	}
}

impl<C: EvmClientTrait> ChunkFetcher<C> {
	pub fn new(
		client: Arc<C>,
		contract: Address,
		schema: Arc<EventSchema>,
		policy: RetryPolicy,
	) -> Self {
		Self {
			client,
			contract,
			schema,
			policy,
		}
	}

	/// Runs the chunk to a terminal state
	///
	/// Retries of one chunk are strictly sequential. The returned
	/// [`SettledChunk::retries`] counts the attempts made after the first.
	pub async fn fetch(&self, chunk: Chunk) -> SettledChunk {
		let query = LogQuery {
			contract: self.contract,
			schema: self.schema.clone(),
			range: chunk.range,
		};
		let retries = AtomicU32::new(0);
		let event = self.schema.name();

		let result = (|| async { self.client.get_logs(&query).await })
			.retry(
				ConstantBuilder::default()
					.with_delay(self.policy.backoff)
					.with_max_times(self.policy.max_retries as usize),
			)
			.sleep(tokio::time::sleep)
			.when(BlockChainError::is_rate_limited)
			.notify(|err: &BlockChainError, pause: Duration| {
				let attempt = retries.fetch_add(1, Ordering::SeqCst) + 1;
				RATE_LIMIT_RETRIES.inc();
				tracing::warn!(
					chunk_id = chunk.id,
					from_block = chunk.range.start(),
					to_block = chunk.range.end(),
					endpoint = %chunk.endpoint_url,
					event,
					retry = attempt,
					error = %err,
					"Rate limited, retrying in {:?}",
					pause
				);
			})
			.await;

		let retries = retries.load(Ordering::SeqCst);
		let outcome = match result {
			Ok(logs) => {
				let outcome = ChunkOutcome::Success(logs);
				tracing::info!(
					chunk_id = chunk.id,
					from_block = chunk.range.start(),
					to_block = chunk.range.end(),
					endpoint = %chunk.endpoint_url,
					event,
					retries,
					outcome = outcome.label(),
					logs = outcome.log_count(),
					"Chunk fetched"
				);
				outcome
			}
			Err(error) => {
				let outcome = ChunkOutcome::Failure(classify(&error, retries + 1));
				tracing::error!(
					chunk_id = chunk.id,
					from_block = chunk.range.start(),
					to_block = chunk.range.end(),
					endpoint = %chunk.endpoint_url,
					event,
					retries,
					outcome = outcome.label(),
					error = %error,
					"Chunk failed permanently, its logs are missing from the result"
				);
				outcome
			}
		};
		record_chunk_settled(outcome.label(), outcome.log_count());

		SettledChunk {
			chunk,
			retries,
			outcome,
		}
	}
}
