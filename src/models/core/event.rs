//! Event specifications and their validated schemas.
//!
//! An [`EventSpec`] is the configuration record naming an event and the two
//! arguments the analysis reads from it. An [`EventSchema`] is the spec after
//! its signature has been parsed and both argument names checked against the
//! event's parameter list, so lookups by name cannot fail at use time.

use alloy::{
	json_abi::Event,
	primitives::{B256, U256},
	rpc::types::Log,
};
use alloy_dyn_abi::{DynSolValue, EventExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{EventArg, LogEntry};

/// Configuration mapping an event type to its actor and amount arguments
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EventSpec {
	/// Selection key offered to the user (e.g. "1")
	pub key: String,
	/// Event name as declared in the contract
	pub name: String,
	/// Full Solidity signature, e.g. `event Hearted(address indexed hearter, uint256 amount)`
	pub signature: String,
	/// Argument holding the actor address
	pub actor_arg: String,
	/// Argument holding the numeric amount
	pub amount_arg: String,
	/// Optional label used when rendering results
	#[serde(default)]
	pub display_name: Option<String>,
}

impl EventSpec {
	/// Parses and validates the signature of this spec
	pub fn schema(&self) -> Result<EventSchema, String> {
		EventSchema::from_spec(self)
	}

	pub fn display_name(&self) -> &str {
		self.display_name.as_deref().unwrap_or(&self.name)
	}
}

/// A validated event specification
#[derive(Debug, Clone, PartialEq)]
pub struct EventSchema {
	spec: EventSpec,
	event: Event,
	topic0: B256,
}

impl EventSchema {
	/// Builds a schema from a spec
	///
	/// # Errors
	/// Returns an error if the signature does not parse, the event is anonymous,
	/// its name differs from the spec, the actor argument is not an `address`
	/// parameter, or the amount argument is not an unsigned integer parameter.
	pub fn from_spec(spec: &EventSpec) -> Result<Self, String> {
		let event = Event::parse(&spec.signature)
			.map_err(|e| format!("Invalid signature for event {}: {}", spec.name, e))?;

		if event.anonymous {
			return Err(format!("Event {} must not be anonymous", spec.name));
		}

		if event.name != spec.name {
			return Err(format!(
				"Event name mismatch: spec names {} but signature declares {}",
				spec.name, event.name
			));
		}

		let param_type = |name: &str| {
			event
				.inputs
				.iter()
				.find(|param| param.name == name)
				.map(|param| param.ty.as_str())
		};

		match param_type(&spec.actor_arg) {
			Some("address") => {}
			Some(other) => {
				return Err(format!(
					"Actor argument {} of event {} has type {}, expected address",
					spec.actor_arg, spec.name, other
				))
			}
			None => {
				return Err(format!(
					"Unknown actor argument {} for event {}",
					spec.actor_arg, spec.name
				))
			}
		}

		match param_type(&spec.amount_arg) {
			Some(ty) if ty.starts_with("uint") => {}
			Some(other) => {
				return Err(format!(
					"Amount argument {} of event {} has type {}, expected an unsigned integer",
					spec.amount_arg, spec.name, other
				))
			}
			None => {
				return Err(format!(
					"Unknown amount argument {} for event {}",
					spec.amount_arg, spec.name
				))
			}
		}

		let topic0 = event.selector();
		Ok(Self {
			spec: spec.clone(),
			event,
			topic0,
		})
	}

	pub fn spec(&self) -> &EventSpec {
		&self.spec
	}

	pub fn name(&self) -> &str {
		&self.spec.name
	}

	pub fn actor_arg(&self) -> &str {
		&self.spec.actor_arg
	}

	pub fn amount_arg(&self) -> &str {
		&self.spec.amount_arg
	}

	/// The log filter topic identifying this event
	pub fn topic0(&self) -> B256 {
		self.topic0
	}

	/// Decodes a raw RPC log into a [`LogEntry`] keyed by parameter name
	pub fn decode_log(&self, log: &Log) -> Result<LogEntry, String> {
		if log.inner.data.topics().first() != Some(&self.topic0) {
			return Err(format!(
				"Log does not carry the {} event topic",
				self.spec.name
			));
		}

		let decoded = self
			.event
			.decode_log(&log.inner.data)
			.map_err(|e| format!("Failed to decode {} log: {}", self.spec.name, e))?;

		let mut indexed = decoded.indexed.into_iter();
		let mut body = decoded.body.into_iter();
		let mut args = BTreeMap::new();

		for param in &self.event.inputs {
			let value = if param.indexed {
				indexed.next()
			} else {
				body.next()
			};
			let value = value.ok_or_else(|| {
				format!(
					"Missing value for parameter {} of event {}",
					param.name, self.spec.name
				)
			})?;
			args.insert(param.name.clone(), to_event_arg(value));
		}

		Ok(LogEntry {
			event: self.spec.name.clone(),
			block_number: log.block_number,
			transaction_hash: log.transaction_hash,
			log_index: log.log_index,
			args,
		})
	}
}

fn to_event_arg(value: DynSolValue) -> EventArg {
	match value {
		DynSolValue::Address(address) => EventArg::Address(address),
		DynSolValue::Uint(value, _) => EventArg::Uint(value),
		other => EventArg::Other(format_dyn_value(&other)),
	}
}

/// Formats a decoded Solidity value into a compact string representation.
fn format_dyn_value(value: &DynSolValue) -> String {
	match value {
		DynSolValue::Address(address) => format!("{:#x}", address),
		DynSolValue::Bool(b) => b.to_string(),
		DynSolValue::Int(num, _) => num.to_string(),
		DynSolValue::Uint(num, _) => num.to_string(),
		DynSolValue::FixedBytes(word, size) => format!("0x{}", hex::encode(&word[..*size])),
		DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
		DynSolValue::String(s) => s.clone(),
		DynSolValue::Array(items) | DynSolValue::FixedArray(items) => format!(
			"[{}]",
			items
				.iter()
				.map(format_dyn_value)
				.collect::<Vec<String>>()
				.join(",")
		),
		DynSolValue::Tuple(items) => format!(
			"({})",
			items
				.iter()
				.map(format_dyn_value)
				.collect::<Vec<String>>()
				.join(",")
		),
		other => format!("{:?}", other),
	}
}

/// Sums a sequence of amounts without overflowing
pub fn saturating_sum<I: IntoIterator<Item = U256>>(values: I) -> U256 {
	values
		.into_iter()
		.fold(U256::ZERO, |acc, value| acc.saturating_add(value))
}
