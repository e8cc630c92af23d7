use alloy::primitives::{Address, U256};
use serde::Serialize;

/// Match count and summed amount for one (event, address) pair
///
/// Amounts are raw integer units; scaling and currency conversion happen at
/// presentation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
	pub event: String,
	pub address: Address,
	pub count: u64,
	pub total_amount: U256,
}
