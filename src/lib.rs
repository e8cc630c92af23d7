//! Concurrent multi-endpoint event log investigation.
//!
//! Scans a historical block range of an EVM contract for configured events,
//! spreading the log queries over several RPC endpoints, and reports per
//! address how often each event occurred and the summed amount it carried.
//!
//! # Architecture
//! - `models`: Domain types and configuration loading
//! - `services`: Probing, partitioning, fetching, aggregation, analysis and pricing
//! - `bootstrap`: Runs the services in pipeline order
//! - `utils`: Logging, metrics, HTTP helpers, parsing and console rendering

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
