// self
use crate::{
	obs::{OperationKind, OperationOutcome},
	task::TaskStatus,
};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_operation_outcome(kind: OperationKind, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"video_relay_operation_total",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records one observed task status; unknown vocabulary collapses into `other`.
pub fn record_poll_status(status: &TaskStatus) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("video_relay_poll_total", "status" => status.label()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = status;
	}
}
