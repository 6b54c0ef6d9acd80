//! Retry policy for status polling.

// self
use crate::_prelude::*;

/// Bounds and pacing of a poll loop.
///
/// The wait before check `n + 1` is `interval * backoff_multiplier^(n - 1)`, capped at
/// `max_interval`. A multiplier of `1.0` gives the fixed cadence the service expects. Polling
/// stops with [`Error::MaxWaitExceeded`] once `max_attempts` checks have been made or
/// `max_wait` has elapsed, whichever comes first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PollPolicy {
	/// Base delay between status checks.
	pub interval: Duration,
	/// Growth factor applied per attempt; never below `1.0`.
	pub backoff_multiplier: f64,
	/// Ceiling for any single delay, including upstream Retry-After hints.
	pub max_interval: Duration,
	/// Optional cap on the number of status checks.
	pub max_attempts: Option<u32>,
	/// Total time budget for the poll loop.
	pub max_wait: Duration,
}
impl PollPolicy {
	/// Default delay between status checks.
	pub const DEFAULT_INTERVAL: Duration = Duration::seconds(5);
	/// Default ceiling for a single delay.
	pub const DEFAULT_MAX_INTERVAL: Duration = Duration::seconds(60);
	/// Default total budget; kept below the token lifetime so the bearer stays valid.
	pub const DEFAULT_MAX_WAIT: Duration = Duration::minutes(10);

	/// Fixed-cadence policy with the default budget.
	pub fn fixed(interval: Duration) -> Self {
		Self::default().with_interval(interval)
	}

	/// Overrides the base interval; negative values clamp to zero.
	pub fn with_interval(mut self, interval: Duration) -> Self {
		self.interval = if interval.is_negative() { Duration::ZERO } else { interval };

		self
	}

	/// Enables exponential backoff; non-finite or sub-unit multipliers fall back to `1.0`.
	pub fn with_backoff(mut self, multiplier: f64) -> Self {
		self.backoff_multiplier =
			if multiplier.is_finite() && multiplier >= 1.0 { multiplier } else { 1.0 };

		self
	}

	/// Overrides the per-delay ceiling.
	pub fn with_max_interval(mut self, max_interval: Duration) -> Self {
		self.max_interval = if max_interval.is_negative() { Duration::ZERO } else { max_interval };

		self
	}

	/// Caps the number of status checks.
	pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
		self.max_attempts = Some(max_attempts.max(1));

		self
	}

	/// Overrides the total time budget.
	pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
		self.max_wait = if max_wait.is_negative() { Duration::ZERO } else { max_wait };

		self
	}

	/// Delay to sleep after the `attempt`-th check (1-based).
	///
	/// An upstream `retry_after` hint can lengthen the delay but never past `max_interval`.
	pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
		let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
		let scaled = self.interval.as_seconds_f64() * self.backoff_multiplier.powi(exponent);
		let ceiling = self.max_interval.max(self.interval);
		let mut delay = if scaled.is_finite() && scaled < ceiling.as_seconds_f64() {
			Duration::seconds_f64(scaled)
		} else {
			ceiling
		};

		if let Some(hint) = retry_after.filter(|hint| *hint > delay) {
			delay = hint.min(self.max_interval.max(delay));
		}

		delay
	}

	/// Whether `attempts` checks already exhaust the attempt budget.
	pub fn attempts_exhausted(&self, attempts: u32) -> bool {
		self.max_attempts.is_some_and(|max| attempts >= max)
	}
}
impl Default for PollPolicy {
	fn default() -> Self {
		Self {
			interval: Self::DEFAULT_INTERVAL,
			backoff_multiplier: 1.0,
			max_interval: Self::DEFAULT_MAX_INTERVAL,
			max_attempts: None,
			max_wait: Self::DEFAULT_MAX_WAIT,
		}
	}
}
