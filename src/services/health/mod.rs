//! Endpoint liveness probing.
//!
//! Every candidate endpoint receives one chain-head query. The queries run
//! concurrently, are not retried, and are bounded by a single timeout. Only
//! endpoints that answered in time take part in the run, and the head each of
//! them reported is kept for range resolution.

mod error;

pub use error::HealthError;

use futures::future::join_all;
use std::time::Duration;

use crate::{
	models::EndpointHealth,
	services::blockchain::{EndpointClient, EvmClientTrait},
	utils::metrics::HEALTHY_ENDPOINTS,
};

/// Classifies endpoints as healthy or unhealthy for the current run
#[derive(Debug, Clone)]
pub struct EndpointProber {
	timeout: Duration,
}

impl EndpointProber {
	pub fn new(timeout: Duration) -> Self {
		Self { timeout }
	}

	/// Probes all candidates and keeps the ones that answered
	///
	/// Healthy endpoints keep their relative input order. The returned
	/// endpoints are marked [`EndpointHealth::Healthy`] and carry the chain
	/// head they answered with.
	///
	/// # Errors
	/// Returns [`HealthError::NoHealthyEndpoints`] when no candidate answered.
	pub async fn probe<C: EvmClientTrait>(
		&self,
		candidates: Vec<EndpointClient<C>>,
	) -> Result<Vec<EndpointClient<C>>, HealthError> {
		let probed = candidates.len();
		let results = join_all(candidates.iter().map(|candidate| {
			tokio::time::timeout(self.timeout, candidate.client.get_latest_block_number())
		}))
		.await;

		let mut healthy = Vec::with_capacity(probed);
		for (mut candidate, result) in candidates.into_iter().zip(results) {
			let error = match result {
				Ok(Ok(head)) => {
					tracing::debug!(endpoint = %candidate.endpoint.url, head, "Endpoint healthy");
					candidate.endpoint.health = EndpointHealth::Healthy;
					candidate.head = Some(head);
					healthy.push(candidate);
					continue;
				}
				Ok(Err(e)) => e.to_string(),
				Err(_) => format!("no answer within {:?}", self.timeout),
			};
			tracing::warn!(
				endpoint = %candidate.endpoint.url,
				error = %error,
				"Endpoint failed liveness probe, excluding it from this run"
			);
		}

		HEALTHY_ENDPOINTS.set(healthy.len() as i64);

		if healthy.is_empty() {
			return Err(HealthError::NoHealthyEndpoints { probed });
		}

		tracing::info!("{} of {} endpoints healthy", healthy.len(), probed);
		Ok(healthy)
	}
}
