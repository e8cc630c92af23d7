use serde::{Deserialize, Serialize};

/// Liveness classification of an RPC endpoint for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointHealth {
	#[default]
	Unknown,
	Healthy,
	Unhealthy,
}

/// An upstream RPC provider identified by its URL
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Endpoint {
	pub url: String,
	pub health: EndpointHealth,
}

impl Endpoint {
	/// Creates an endpoint that has not been probed yet
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			health: EndpointHealth::Unknown,
		}
	}

	pub fn with_health(mut self, health: EndpointHealth) -> Self {
		self.health = health;
		self
	}
}
