//! Parsing utilities
//!
//! Helpers for the comma-separated lists accepted on the command line, on
//! stdin and in environment variables.

use alloy::primitives::Address;
use std::str::FromStr;

/// Splits a comma-separated list, trimming items and dropping empty ones.
pub fn split_comma_list(input: &str) -> Vec<String> {
	input
		.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(str::to_string)
		.collect()
}

/// Parses a hex address in any letter case.
///
/// Mixed-case input must carry a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, String> {
	let input = input.trim();
	let is_mixed_case = input.chars().any(|c| c.is_ascii_uppercase())
		&& input
			.trim_start_matches("0x")
			.chars()
			.any(|c| c.is_ascii_lowercase());

	if is_mixed_case {
		Address::parse_checksummed(input, None)
			.map_err(|e| format!("Invalid checksummed address '{}': {}", input, e))
	} else {
		Address::from_str(input).map_err(|e| format!("Invalid address '{}': {}", input, e))
	}
}

/// Parses a comma-separated address list, failing on the first invalid entry.
pub fn parse_address_list(input: &str) -> Result<Vec<Address>, String> {
	let addresses = split_comma_list(input)
		.iter()
		.map(|item| parse_address(item))
		.collect::<Result<Vec<_>, _>>()?;

	if addresses.is_empty() {
		return Err("No addresses provided".to_string());
	}
	Ok(addresses)
}
