//! Client pool for the configured RPC endpoints.
//!
//! Builds one EVM client per configured endpoint URL. Endpoints whose URL
//! cannot back a client are marked unhealthy here and never reach the prober.

use std::{sync::Arc, time::Duration};

use crate::{
	models::{Endpoint, EndpointHealth},
	services::blockchain::{BlockChainError, EvmClient, HttpTransportClient},
};

/// An endpoint together with the client bound to it
#[derive(Debug)]
pub struct EndpointClient<C> {
	pub endpoint: Endpoint,
	pub client: Arc<C>,
	/// Chain head the endpoint reported when it was probed
	pub head: Option<u64>,
}

impl<C> Clone for EndpointClient<C> {
	fn clone(&self) -> Self {
		Self {
			endpoint: self.endpoint.clone(),
			client: self.client.clone(),
			head: self.head,
		}
	}
}

impl<C> EndpointClient<C> {
	pub fn new(endpoint: Endpoint, client: C) -> Self {
		Self {
			endpoint,
			client: Arc::new(client),
			head: None,
		}
	}
}

/// Clients built for a set of endpoints
pub struct ClientPool<C> {
	/// Endpoints with a usable client, in configuration order
	pub candidates: Vec<EndpointClient<C>>,
	/// Endpoints rejected while building their client
	pub rejected: Vec<(Endpoint, BlockChainError)>,
}

impl ClientPool<EvmClient<HttpTransportClient>> {
	/// Builds an HTTP-backed EVM client for every endpoint
	pub fn build(
		endpoints: &[Endpoint],
		request_timeout: Duration,
		connect_timeout: Duration,
	) -> Self {
		let mut candidates = Vec::with_capacity(endpoints.len());
		let mut rejected = Vec::new();

		for endpoint in endpoints {
			match EvmClient::new(&endpoint.url, request_timeout, connect_timeout) {
				Ok(client) => candidates.push(EndpointClient::new(endpoint.clone(), client)),
				Err(e) => {
					tracing::warn!(endpoint = %endpoint.url, error = %e, "Endpoint rejected");
					rejected.push((
						endpoint.clone().with_health(EndpointHealth::Unhealthy),
						e,
					));
				}
			}
		}

		Self {
			candidates,
			rejected,
		}
	}
}
