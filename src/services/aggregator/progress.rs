use std::{
	sync::{Arc, Mutex},
	time::{Duration, Instant},
};

/// Completed and total chunk counts of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
	pub completed: usize,
	pub total: usize,
	/// Time since the tracker was created
	pub elapsed: Duration,
}

impl Progress {
	pub fn percent(&self) -> f64 {
		if self.total == 0 {
			return 100.0;
		}
		self.completed as f64 * 100.0 / self.total as f64
	}

	/// Remaining time extrapolated from the average time per completed chunk
	pub fn eta(&self) -> Option<Duration> {
		if self.completed == 0 {
			return None;
		}
		let remaining = self.total.saturating_sub(self.completed) as u32;
		Some(self.elapsed / self.completed as u32 * remaining)
	}

	pub fn is_done(&self) -> bool {
		self.completed == self.total
	}
}

pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Monotonic completion counter
///
/// Never exceeds the total, and reaches it once every chunk has settled.
pub struct ProgressTracker {
	state: Mutex<usize>,
	total: usize,
	started: Instant,
	callback: Option<ProgressCallback>,
}

impl ProgressTracker {
	pub fn new(total: usize, callback: Option<ProgressCallback>) -> Self {
		Self {
			state: Mutex::new(0),
			total,
			started: Instant::now(),
			callback,
		}
	}

	/// Records one settled chunk and reports the new progress
	pub fn advance(&self) -> Progress {
		let progress = {
			let mut completed = self.state.lock().unwrap_or_else(|e| e.into_inner());
			if *completed < self.total {
				*completed += 1;
			}
			Progress {
				completed: *completed,
				total: self.total,
				elapsed: self.started.elapsed(),
			}
		};

		tracing::debug!(
			completed = progress.completed,
			total = progress.total,
			"Progress {:.2}%",
			progress.percent()
		);
		if let Some(callback) = &self.callback {
			callback(progress);
		}
		progress
	}
}
