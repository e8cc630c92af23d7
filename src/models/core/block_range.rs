use serde::Serialize;
use std::fmt;

/// Inclusive range of block numbers, `start <= end` always holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BlockRange {
	start: u64,
	end: u64,
}

impl BlockRange {
	/// Creates a new inclusive range
	///
	/// # Returns
	/// * `None` if `start > end`
	pub fn new(start: u64, end: u64) -> Option<Self> {
		(start <= end).then_some(Self { start, end })
	}

	/// Builds the window ending at `end` that reaches `span` blocks back,
	/// clamped at the genesis block.
	pub fn trailing(end: u64, span: u64) -> Self {
		Self {
			start: end.saturating_sub(span),
			end,
		}
	}

	pub fn start(&self) -> u64 {
		self.start
	}

	pub fn end(&self) -> u64 {
		self.end
	}

	/// Number of blocks covered by the range, saturating for `[0, u64::MAX]`
	pub fn len(&self) -> u64 {
		(self.end - self.start).saturating_add(1)
	}

	/// A valid range always covers at least one block
	pub fn is_empty(&self) -> bool {
		false
	}
}

impl fmt::Display for BlockRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}, {}]", self.start, self.end)
	}
}
