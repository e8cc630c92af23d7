//! Domain models and data structures for log investigation.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (Endpoint, BlockRange, Chunk, EventSpec, LogEntry)

mod config;
mod core;

// Re-export core types
pub use core::{
	saturating_sum, AnalysisResult, BlockRange, Chunk, ChunkOutcome, Endpoint,
	EndpointHealth, EventArg, EventSchema, EventSpec, FetchFailure, InvestigationConfig, LogEntry,
	PricingConfig, SettledChunk, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_RETRIES,
	DEFAULT_PRICE_FALLBACK_URL, DEFAULT_PRICE_PRIMARY_URL, DEFAULT_RETRY_BACKOFF_MS,
	DEFAULT_TOTAL_BLOCKS,
};

// Re-export config types
pub use config::{rpc_urls_from_env, ConfigError, ConfigLoader, DEFAULT_CONFIG_PATH};
