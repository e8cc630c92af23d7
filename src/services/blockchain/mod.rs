//! Blockchain client interfaces and implementations.
//!
//! Provides abstractions and concrete implementations for interacting with
//! EVM endpoints. Includes:
//!
//! - EVM client trait and implementation
//! - JSON-RPC over HTTP transport
//! - Error classification for blockchain operations
//! - Client pool building one client per endpoint

mod clients;
mod error;
mod pool;
mod transports;

pub use clients::{EvmClient, EvmClientTrait, LogQuery};
pub use error::BlockChainError;
pub use pool::{ClientPool, EndpointClient};
pub use transports::{BlockchainTransport, HttpTransportClient, TransportError};
