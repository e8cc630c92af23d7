use serde::Serialize;
use std::fmt;

use crate::models::{BlockRange, LogEntry};

/// A sub-range of blocks bound to exactly one endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
	/// Position of the chunk in the partition plan
	pub id: usize,
	pub range: BlockRange,
	/// Index of the bound endpoint in the healthy endpoint list
	pub endpoint_index: usize,
	pub endpoint_url: String,
}

/// Reason a chunk settled without logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FetchFailure {
	/// The endpoint kept rate-limiting until the retry budget ran out
	RateLimitExhausted { attempts: u32 },
	/// The endpoint could not be reached
	Connectivity(String),
	/// The request did not complete in time
	Timeout(String),
	/// Any other error, including malformed responses
	Unexpected(String),
	/// The run was cancelled before the chunk settled
	Cancelled,
}

impl FetchFailure {
	/// Short label used for metrics and structured logs
	pub fn label(&self) -> &'static str {
		match self {
			Self::RateLimitExhausted { .. } => "rate_limited",
			Self::Connectivity(_) => "connectivity",
			Self::Timeout(_) => "timeout",
			Self::Unexpected(_) => "unexpected",
			Self::Cancelled => "cancelled",
		}
	}
}

impl fmt::Display for FetchFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::RateLimitExhausted { attempts } => {
				write!(f, "rate limited on all {} attempts", attempts)
			}
			Self::Connectivity(msg) => write!(f, "connection error: {}", msg),
			Self::Timeout(msg) => write!(f, "timeout: {}", msg),
			Self::Unexpected(msg) => write!(f, "unexpected error: {}", msg),
			Self::Cancelled => write!(f, "cancelled"),
		}
	}
}

/// Terminal result of a chunk fetch
///
/// Distinguishes "no events in range" (`Success` with an empty list) from
/// "fetch failed" (`Failure`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChunkOutcome {
	Success(Vec<LogEntry>),
	Failure(FetchFailure),
}

impl ChunkOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Success(_) => "success",
			Self::Failure(failure) => failure.label(),
		}
	}

	pub fn log_count(&self) -> usize {
		match self {
			Self::Success(logs) => logs.len(),
			Self::Failure(_) => 0,
		}
	}
}

/// A chunk that reached a terminal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettledChunk {
	pub chunk: Chunk,
	/// Number of retries performed after the first attempt
	pub retries: u32,
	pub outcome: ChunkOutcome,
}

impl SettledChunk {
	/// Logs carried by the outcome, empty on failure
	pub fn into_logs(self) -> Vec<LogEntry> {
		match self.outcome {
			ChunkOutcome::Success(logs) => logs,
			ChunkOutcome::Failure(_) => Vec::new(),
		}
	}
}
