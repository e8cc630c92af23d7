//! Utility modules for common functionality.
//!
//! This module provides various utility functions and types that are used across
//! the application. Currently includes:
//!
//! - http: Retryable HTTP client construction
//! - logging: Logging utilities
//! - metrics: Metrics utilities
//! - parsing: Comma-separated list and address parsing
//! - report: Console rendering of results and progress

mod http;

pub mod logging;
pub mod metrics;
pub mod parsing;
pub mod report;

pub use http::{create_retryable_http_client, HttpRetryConfig};
