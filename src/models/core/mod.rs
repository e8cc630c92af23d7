//! Core domain models for the log investigation engine.
//!
//! This module contains the fundamental data structures that represent:
//! - Endpoints: Upstream RPC providers and their health
//! - Block ranges and chunks: Units of partitioned work
//! - Events and logs: Event specifications and decoded log entries
//! - Analysis results: Per-address statistics over a merged log set
//! - Investigation configuration: The explicit settings value of a run

mod analysis;
mod block_range;
mod chunk;
mod endpoint;
mod event;
mod investigation;
mod log_entry;

pub use analysis::AnalysisResult;
pub use block_range::BlockRange;
pub use chunk::{Chunk, ChunkOutcome, FetchFailure, SettledChunk};
pub use endpoint::{Endpoint, EndpointHealth};
pub use event::{saturating_sum, EventSchema, EventSpec};
pub use investigation::{
	InvestigationConfig, PricingConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_RETRIES,
	DEFAULT_PRICE_FALLBACK_URL, DEFAULT_PRICE_PRIMARY_URL, DEFAULT_RETRY_BACKOFF_MS,
	DEFAULT_TOTAL_BLOCKS,
};
pub use log_entry::{EventArg, LogEntry};
