use alloy::primitives::{Address, B256, U256};
use serde::Serialize;
use std::collections::BTreeMap;

/// A decoded event argument value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EventArg {
	Address(Address),
	Uint(U256),
	/// Any other Solidity type, kept in its rendered form
	Other(String),
}

/// One emitted event, decoded against its event schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
	pub event: String,
	pub block_number: Option<u64>,
	pub transaction_hash: Option<B256>,
	pub log_index: Option<u64>,
	pub args: BTreeMap<String, EventArg>,
}

impl LogEntry {
	/// Looks up an argument that must hold an address
	pub fn address_arg(&self, name: &str) -> Option<Address> {
		match self.args.get(name) {
			Some(EventArg::Address(address)) => Some(*address),
			_ => None,
		}
	}

	/// Looks up an argument that must hold an unsigned integer
	pub fn uint_arg(&self, name: &str) -> Option<U256> {
		match self.args.get(name) {
			Some(EventArg::Uint(value)) => Some(*value),
			_ => None,
		}
	}
}
