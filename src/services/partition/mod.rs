//! Work partitioning.
//!
//! Splits a block range into one contiguous band per healthy endpoint, then
//! splits every band into chunks no larger than the provider block-range cap.
//! Chunks never cross a band boundary, so each endpoint only ever sees its
//! own requests.

use thiserror::Error;

use crate::models::{BlockRange, Chunk, Endpoint};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
	#[error("Chunk size must be at least 1")]
	InvalidChunkSize,

	#[error("Cannot partition work without endpoints")]
	NoEndpoints,
}

/// Builds deterministic partition plans
#[derive(Debug, Clone, Copy)]
pub struct PartitionPlanner {
	chunk_size: u64,
}

impl PartitionPlanner {
	/// # Errors
	/// Returns [`PartitionError::InvalidChunkSize`] when `chunk_size` is zero.
	pub fn new(chunk_size: u64) -> Result<Self, PartitionError> {
		if chunk_size == 0 {
			return Err(PartitionError::InvalidChunkSize);
		}
		Ok(Self { chunk_size })
	}

	/// Plans the chunks covering `range` across `endpoints`
	///
	/// Endpoint `i` owns the band `[start + i*band, start + (i+1)*band - 1]`
	/// clipped to the range end, with `band = ceil(len / endpoints)`. Bands
	/// that start past the range end produce no chunks. Chunk ids follow plan
	/// order.
	pub fn plan(
		&self,
		range: BlockRange,
		endpoints: &[Endpoint],
	) -> Result<Vec<Chunk>, PartitionError> {
		if endpoints.is_empty() {
			return Err(PartitionError::NoEndpoints);
		}

		// u128 keeps `[0, u64::MAX]` representable
		let start = u128::from(range.start());
		let end = u128::from(range.end());
		let chunk_size = u128::from(self.chunk_size);
		let total = end - start + 1;
		let band = total.div_ceil(endpoints.len() as u128);

		let mut chunks = Vec::new();
		for (endpoint_index, endpoint) in endpoints.iter().enumerate() {
			let band_start = start + endpoint_index as u128 * band;
			if band_start > end {
				continue;
			}
			let band_end = (band_start + band - 1).min(end);

			let mut from = band_start;
			while from <= band_end {
				let to = (from + chunk_size - 1).min(band_end);
				let Some(chunk_range) = BlockRange::new(from as u64, to as u64) else {
					break;
				};
				chunks.push(Chunk {
					id: chunks.len(),
					range: chunk_range,
					endpoint_index,
					endpoint_url: endpoint.url.clone(),
				});
				from = to + 1;
			}
		}

		tracing::debug!(
			range = %range,
			endpoints = endpoints.len(),
			chunk_size = self.chunk_size,
			chunks = chunks.len(),
			"Partition planned"
		);
		Ok(chunks)
	}
}
