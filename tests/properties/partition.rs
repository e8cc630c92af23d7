use crate::properties::strategies::{endpoints_strategy, range_strategy};
use log_investigator::services::partition::PartitionPlanner;
use proptest::{prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_plan_covers_range_exactly_once(
		range in range_strategy(),
		endpoints in endpoints_strategy(),
		chunk_size in prop_oneof![1u64..2_000, Just(u64::MAX)],
	) {
		// Keep the chunk count bounded for ranges spanning the whole space
		let chunk_size = if range.len() / chunk_size > 200_000 {
			range.len() / 1_000
		} else {
			chunk_size
		};
		let planner = PartitionPlanner::new(chunk_size).unwrap();
		let chunks = planner.plan(range, &endpoints).unwrap();

		prop_assert!(!chunks.is_empty());
		prop_assert_eq!(chunks[0].range.start(), range.start());
		prop_assert_eq!(chunks.last().unwrap().range.end(), range.end());

		for pair in chunks.windows(2) {
			// Contiguous, so neither gaps nor overlaps
			prop_assert_eq!(pair[0].range.end() + 1, pair[1].range.start());
			prop_assert!(pair[0].endpoint_index <= pair[1].endpoint_index);
		}
		for (i, chunk) in chunks.iter().enumerate() {
			prop_assert_eq!(chunk.id, i);
			prop_assert!(chunk.range.len() <= chunk_size);
			prop_assert!(chunk.endpoint_index < endpoints.len());
			prop_assert_eq!(&chunk.endpoint_url, &endpoints[chunk.endpoint_index].url);
		}
	}

	#[test]
	fn test_plan_is_deterministic(
		range in range_strategy(),
		endpoints in endpoints_strategy(),
		chunk_size in 1_000u64..100_000,
	) {
		let chunk_size = chunk_size.max(range.len() / 10_000);
		let planner = PartitionPlanner::new(chunk_size).unwrap();
		prop_assert_eq!(
			planner.plan(range, &endpoints).unwrap(),
			planner.plan(range, &endpoints).unwrap()
		);
	}

	#[test]
	fn test_bands_are_balanced(
		range in range_strategy(),
		endpoints in endpoints_strategy(),
	) {
		// Whole-space ranges do not fit a single u64-sized chunk
		prop_assume!(range.len() < u64::MAX);
		// One chunk per band makes every chunk a whole band
		let planner = PartitionPlanner::new(u64::MAX).unwrap();
		let chunks = planner.plan(range, &endpoints).unwrap();

		prop_assert!(chunks.len() <= endpoints.len());
		let band = u128::from(range.len()).div_ceil(endpoints.len() as u128);
		for chunk in &chunks {
			prop_assert!(u128::from(chunk.range.len()) <= band);
		}
	}
}
