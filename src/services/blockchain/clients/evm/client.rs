//! EVM-compatible blockchain client implementation.
//!
//! This module provides functionality to interact with Ethereum and other EVM-compatible
//! blockchains, supporting chain head lookup and event log retrieval for a block range.

use std::{sync::Arc, time::Duration};

use alloy::primitives::Address;
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
	models::{BlockRange, EventSchema, LogEntry},
	services::blockchain::{
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
};

/// Parameters of one `eth_getLogs` call
#[derive(Debug, Clone, PartialEq)]
pub struct LogQuery {
	/// Contract emitting the events
	pub contract: Address,
	/// Event whose selector filters the logs and whose layout decodes them
	pub schema: Arc<EventSchema>,
	pub range: BlockRange,
}

impl LogQuery {
	/// JSON-RPC filter object for this query
	pub fn to_filter(&self) -> Value {
		json!({
			"address": format!("{:#x}", self.contract),
			"topics": [format!("{:#x}", self.schema.topic0())],
			"fromBlock": format!("0x{:x}", self.range.start()),
			"toBlock": format!("0x{:x}", self.range.end()),
		})
	}
}

/// Client implementation for Ethereum Virtual Machine (EVM) compatible blockchains
///
/// Provides high-level access to EVM blockchain data through a transport layer.
#[derive(Clone)]
pub struct EvmClient<T: Send + Sync + Clone> {
	/// The underlying transport client for RPC communication
	transport: T,
}

impl<T: Send + Sync + Clone> EvmClient<T> {
	/// Creates a new EVM client instance with a specific transport client
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}
}

impl EvmClient<HttpTransportClient> {
	/// Creates a new EVM client pinned to `url`
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - New client instance or an error for an unusable URL
	pub fn new(
		url: &str,
		request_timeout: Duration,
		connect_timeout: Duration,
	) -> Result<Self, BlockChainError> {
		let transport = HttpTransportClient::new(url, request_timeout, connect_timeout)?;
		Ok(Self::new_with_transport(transport))
	}
}

/// Extracts the `result` member of a JSON-RPC response
///
/// A JSON-RPC `error` member is classified with [`BlockChainError::from_rpc_error`].
fn extract_result(response: Value) -> Result<Value, BlockChainError> {
	if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
		let code = error.get("code").and_then(Value::as_i64);
		let message = error
			.get("message")
			.and_then(Value::as_str)
			.map(str::to_string)
			.unwrap_or_else(|| error.to_string());
		return Err(BlockChainError::from_rpc_error(code, &message));
	}

	match response {
		Value::Object(mut map) => map
			.remove("result")
			.ok_or_else(|| BlockChainError::malformed_response("Missing 'result' field")),
		_ => Err(BlockChainError::malformed_response(
			"Response is not a JSON object",
		)),
	}
}

/// Operations the investigation needs from an EVM endpoint
#[async_trait]
pub trait EvmClientTrait: Send + Sync {
	/// Retrieves the current chain head
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError>;

	/// Retrieves and decodes the logs matching `query`
	///
	/// Either every log the endpoint reported is returned, or the call fails.
	async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, BlockChainError>;
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> EvmClientTrait for EvmClient<T> {
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError> {
		let response = self
			.transport
			.send_raw_request::<Value>("eth_blockNumber", None)
			.await?;

		let result = extract_result(response)?;
		let hex_str = result
			.as_str()
			.ok_or_else(|| BlockChainError::malformed_response("Block number is not a string"))?;

		// Parse hex string to u64
		u64::from_str_radix(hex_str.trim_start_matches("0x"), 16).map_err(|e| {
			BlockChainError::malformed_response(format!("Failed to parse block number: {}", e))
		})
	}

	async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, BlockChainError> {
		let params = json!([query.to_filter()]);

		let response = self
			.transport
			.send_raw_request("eth_getLogs", Some(params))
			.await?;

		let logs_data = extract_result(response)?;
		let logs: Vec<alloy::rpc::types::Log> = serde_json::from_value(logs_data)
			.map_err(|e| BlockChainError::malformed_response(format!("Failed to parse logs: {}", e)))?;

		logs.iter()
			.map(|log| {
				query
					.schema
					.decode_log(log)
					.map_err(BlockChainError::malformed_response)
			})
			.collect()
	}
}
