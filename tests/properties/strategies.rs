use alloy::primitives::{Address, U256};
use log_investigator::models::{
	BlockRange, Chunk, ChunkOutcome, Endpoint, EventArg, EventSpec, FetchFailure, LogEntry,
	SettledChunk,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

const MAX_ENDPOINTS: usize = 8;
const MAX_LOGS_PER_CHUNK: usize = 5;

/// Small address pool so generated logs collide on actors
pub fn actor_strategy() -> impl Strategy<Value = Address> {
	(1u8..=4).prop_map(Address::repeat_byte)
}

pub fn hearted_spec() -> EventSpec {
	EventSpec {
		key: "1".to_string(),
		name: "Hearted".to_string(),
		signature: "event Hearted(address indexed hearter, uint256 indexed memeNonce, uint256 amount)"
			.to_string(),
		actor_arg: "hearter".to_string(),
		amount_arg: "amount".to_string(),
		display_name: None,
	}
}

pub fn log_strategy() -> impl Strategy<Value = LogEntry> {
	(
		prop::sample::select(vec!["Hearted", "Collected"]),
		actor_strategy(),
		any::<u64>(),
	)
		.prop_map(|(event, actor, amount)| {
			let mut args = BTreeMap::new();
			args.insert("hearter".to_string(), EventArg::Address(actor));
			args.insert("amount".to_string(), EventArg::Uint(U256::from(amount)));
			LogEntry {
				event: event.to_string(),
				block_number: None,
				transaction_hash: None,
				log_index: None,
				args,
			}
		})
}

/// Valid ranges, including ones near the top of the block number space
pub fn range_strategy() -> impl Strategy<Value = BlockRange> {
	prop_oneof![
		(0u64..100_000, 0u64..50_000).prop_map(|(start, len)| (start, start + len)),
		(0u64..10_000).prop_map(|len| (u64::MAX - len, u64::MAX)),
		Just((0u64, u64::MAX)),
	]
	.prop_map(|(start, end)| BlockRange::new(start, end).unwrap())
}

pub fn endpoints_strategy() -> impl Strategy<Value = Vec<Endpoint>> {
	(1..=MAX_ENDPOINTS).prop_map(|n| {
		(0..n)
			.map(|i| Endpoint::new(format!("https://rpc{}.example.com", i)))
			.collect()
	})
}

pub fn settled_chunk_strategy() -> impl Strategy<Value = SettledChunk> {
	(
		0usize..1000,
		prop::collection::vec(log_strategy(), 0..MAX_LOGS_PER_CHUNK),
		any::<bool>(),
		0u32..4,
	)
		.prop_map(|(id, logs, success, retries)| SettledChunk {
			chunk: Chunk {
				id,
				range: BlockRange::new(id as u64 * 10, id as u64 * 10 + 9).unwrap(),
				endpoint_index: id % 3,
				endpoint_url: format!("https://rpc{}.example.com", id % 3),
			},
			retries,
			outcome: if success {
				ChunkOutcome::Success(logs)
			} else {
				ChunkOutcome::Failure(FetchFailure::RateLimitExhausted {
					attempts: retries + 1,
				})
			},
		})
}
