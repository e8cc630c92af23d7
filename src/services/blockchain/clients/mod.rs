//! Blockchain client implementations.
//!
//! Contains the EVM client used to query chain heads and event logs.

mod evm {
	pub mod client;
}

pub use evm::client::{EvmClient, EvmClientTrait, LogQuery};
