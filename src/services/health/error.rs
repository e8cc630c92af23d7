use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HealthError {
	#[error("No healthy endpoints: all {probed} probed endpoints failed the liveness check")]
	NoHealthyEndpoints { probed: usize },
}
