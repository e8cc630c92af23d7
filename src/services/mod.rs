//! Core services implementing the investigation pipeline.
//!
//! This module contains the main service implementations:
//! - `blockchain`: EVM client, JSON-RPC transport and client pool
//! - `health`: Endpoint liveness probing
//! - `partition`: Splitting a block range into per-endpoint chunks
//! - `fetcher`: Fetching one chunk with bounded retry
//! - `aggregator`: Running all chunks concurrently and merging their logs
//! - `analyzer`: Per-address statistics over merged logs
//! - `pricing`: Currency conversion rate lookup

pub mod aggregator;
pub mod analyzer;
pub mod blockchain;
pub mod fetcher;
pub mod health;
pub mod partition;
pub mod pricing;
