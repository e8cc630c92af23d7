use crate::integration::mocks::{chunk, hearted_log, hearted_schema, MockEvmClientTrait};
use alloy::primitives::Address;
use log_investigator::{
	models::{ChunkOutcome, FetchFailure},
	services::{
		blockchain::BlockChainError,
		fetcher::{ChunkFetcher, RetryPolicy},
	},
};
use std::{sync::Arc, time::Duration};

fn policy(max_retries: u32) -> RetryPolicy {
	RetryPolicy {
		max_retries,
		backoff: Duration::ZERO,
	}
}

fn fetcher(mock: MockEvmClientTrait, max_retries: u32) -> ChunkFetcher<MockEvmClientTrait> {
	ChunkFetcher::new(
		Arc::new(mock),
		Address::repeat_byte(0x82),
		hearted_schema(),
		policy(max_retries),
	)
}

#[tokio::test]
async fn test_success_returns_logs_unchanged() {
	let logs = vec![
		hearted_log(Address::repeat_byte(0x01), 100),
		hearted_log(Address::repeat_byte(0x02), 200),
	];
	let expected = logs.clone();

	let mut mock = MockEvmClientTrait::new();
	mock.expect_get_logs()
		.withf(|query| query.range.start() == 0 && query.range.end() == 499)
		.times(1)
		.returning(move |_| Ok(logs.clone()));

	let settled = fetcher(mock, 3).fetch(chunk(0, 0, 499, 0)).await;

	assert_eq!(settled.retries, 0);
	assert_eq!(settled.outcome, ChunkOutcome::Success(expected));
}

#[tokio::test]
async fn test_rate_limit_is_retried_until_budget_is_spent() {
	let mut mock = MockEvmClientTrait::new();
	mock.expect_get_logs()
		.times(4)
		.returning(|_| Err(BlockChainError::RateLimited("429".to_string())));

	let settled = fetcher(mock, 3).fetch(chunk(7, 500, 999, 1)).await;

	assert_eq!(settled.chunk.id, 7);
	assert_eq!(settled.retries, 3);
	assert_eq!(
		settled.outcome,
		ChunkOutcome::Failure(FetchFailure::RateLimitExhausted { attempts: 4 })
	);
	assert!(settled.into_logs().is_empty());
}

#[tokio::test]
async fn test_rate_limit_then_success() {
	let mut calls = 0;
	let mut mock = MockEvmClientTrait::new();
	mock.expect_get_logs().times(3).returning(move |_| {
		calls += 1;
		if calls < 3 {
			Err(BlockChainError::RateLimited("slow down".to_string()))
		} else {
			Ok(vec![hearted_log(Address::repeat_byte(0x01), 5)])
		}
	});

	let settled = fetcher(mock, 3).fetch(chunk(0, 0, 9, 0)).await;

	assert_eq!(settled.retries, 2);
	assert!(settled.outcome.is_success());
	assert_eq!(settled.into_logs().len(), 1);
}

#[tokio::test]
async fn test_connectivity_error_fails_fast() {
	let mut mock = MockEvmClientTrait::new();
	mock.expect_get_logs()
		.times(1)
		.returning(|_| Err(BlockChainError::ConnectionError("refused".to_string())));

	let settled = fetcher(mock, 3).fetch(chunk(0, 0, 9, 0)).await;

	assert_eq!(settled.retries, 0);
	assert_eq!(
		settled.outcome,
		ChunkOutcome::Failure(FetchFailure::Connectivity("refused".to_string()))
	);
}

#[tokio::test]
async fn test_timeout_fails_fast() {
	let mut mock = MockEvmClientTrait::new();
	mock.expect_get_logs()
		.times(1)
		.returning(|_| Err(BlockChainError::Timeout("30s".to_string())));

	let settled = fetcher(mock, 3).fetch(chunk(0, 0, 9, 0)).await;

	assert_eq!(settled.retries, 0);
	assert_eq!(settled.outcome.label(), "timeout");
}

#[tokio::test]
async fn test_unexpected_error_fails_fast() {
	let mut mock = MockEvmClientTrait::new();
	mock.expect_get_logs()
		.times(1)
		.returning(|_| Err(BlockChainError::RequestError("block range too large".to_string())));

	let settled = fetcher(mock, 3).fetch(chunk(0, 0, 9, 0)).await;

	assert!(matches!(
		settled.outcome,
		ChunkOutcome::Failure(FetchFailure::Unexpected(_))
	));
}

#[tokio::test]
async fn test_zero_retries_means_single_attempt() {
	let mut mock = MockEvmClientTrait::new();
	mock.expect_get_logs()
		.times(1)
		.returning(|_| Err(BlockChainError::RateLimited("429".to_string())));

	let settled = fetcher(mock, 0).fetch(chunk(0, 0, 9, 0)).await;

	assert_eq!(settled.retries, 0);
	assert_eq!(
		settled.outcome,
		ChunkOutcome::Failure(FetchFailure::RateLimitExhausted { attempts: 1 })
	);
}

#[tokio::test(start_paused = true)]
async fn test_fixed_backoff_precedes_every_retry() {
	let mut mock = MockEvmClientTrait::new();
	mock.expect_get_logs()
		.times(4)
		.returning(|_| Err(BlockChainError::RateLimited("429".to_string())));
	let fetcher = ChunkFetcher::new(
		Arc::new(mock),
		Address::repeat_byte(0x82),
		hearted_schema(),
		RetryPolicy {
			max_retries: 3,
			backoff: Duration::from_secs(10),
		},
	);

	let started = tokio::time::Instant::now();
	let settled = fetcher.fetch(chunk(0, 0, 499, 0)).await;
	let waited = started.elapsed();

	assert_eq!(settled.retries, 3);
	assert!(waited >= Duration::from_secs(30), "waited {:?}", waited);
	assert!(waited < Duration::from_secs(31), "waited {:?}", waited);
}

#[tokio::test(start_paused = true)]
async fn test_fast_failure_does_not_wait() {
	let mut mock = MockEvmClientTrait::new();
	mock.expect_get_logs()
		.times(1)
		.returning(|_| Err(BlockChainError::ConnectionError("refused".to_string())));
	let fetcher = ChunkFetcher::new(
		Arc::new(mock),
		Address::repeat_byte(0x82),
		hearted_schema(),
		RetryPolicy {
			max_retries: 3,
			backoff: Duration::from_secs(10),
		},
	);

	let started = tokio::time::Instant::now();
	fetcher.fetch(chunk(0, 0, 499, 0)).await;

	assert!(started.elapsed() < Duration::from_secs(10));
}
