// self
use crate::{_prelude::*, obs::OperationKind, task::TaskHandle};

/// Future returned by [`OperationSpan::instrument`]; the bare future when tracing is off.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`OperationSpan::instrument`]; the bare future when tracing is off.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// `video_relay.operation` span carrying the operation, call site, and task once known.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens a span for `kind` at `stage`; `task_id` starts empty.
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			Self {
				span: tracing::info_span!(
					"video_relay.operation",
					operation = kind.as_str(),
					stage,
					task_id = tracing::field::Empty,
				),
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Tags the span with the task it is working on.
	pub fn with_task(self, task: &TaskHandle) -> Self {
		#[cfg(feature = "tracing")]
		{
			self.span.record("task_id", task.as_str());
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = task;
		}

		self
	}

	/// Runs a synchronous step inside the span.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Attaches the span to `fut` so it is entered on every poll.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			tracing::Instrument::instrument(fut, self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}
