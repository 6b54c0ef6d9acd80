//! End-to-end generation: sign, submit, then poll.

// self
use crate::{
	_prelude::*,
	auth::{self, Credentials, SignedToken},
	client::{GenerationClient, PollPolicy},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	task::{GenerationRequest, TaskHandle, VideoResult},
	transport::GenerationHttpClient,
};

/// Boxed future returned by [`VideoGenerator`] methods.
pub type GeneratorFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Object-safe seam over the two service calls a generation needs.
///
/// [`GenerationClient`] is the production implementation; the server holds an
/// `Arc<dyn VideoGenerator>` so tests can swap in a scripted backend.
pub trait VideoGenerator
where
	Self: Send + Sync,
{
	/// Creates a job and returns its handle.
	fn submit<'a>(
		&'a self,
		token: &'a SignedToken,
		request: &'a GenerationRequest,
	) -> GeneratorFuture<'a, TaskHandle>;

	/// Waits for `task` to produce a video URL.
	fn poll<'a>(
		&'a self,
		token: &'a SignedToken,
		task: &'a TaskHandle,
		policy: &'a PollPolicy,
		cancel: &'a CancellationToken,
	) -> GeneratorFuture<'a, VideoResult>;
}
impl<C> VideoGenerator for GenerationClient<C>
where
	C: ?Sized + GenerationHttpClient,
{
	fn submit<'a>(
		&'a self,
		token: &'a SignedToken,
		request: &'a GenerationRequest,
	) -> GeneratorFuture<'a, TaskHandle> {
		Box::pin(GenerationClient::submit(self, token, request))
	}

	fn poll<'a>(
		&'a self,
		token: &'a SignedToken,
		task: &'a TaskHandle,
		policy: &'a PollPolicy,
		cancel: &'a CancellationToken,
	) -> GeneratorFuture<'a, VideoResult> {
		Box::pin(GenerationClient::poll(self, token, task, policy, cancel))
	}
}

/// Runs one generation for `credentials`.
///
/// A fresh token is signed per call and reused for the submission and every status check.
/// Submission failures are returned without retry; polling follows `policy` and stops early
/// when `cancel` fires.
pub async fn generate(
	generator: &dyn VideoGenerator,
	credentials: &Credentials,
	request: &GenerationRequest,
	policy: &PollPolicy,
	cancel: &CancellationToken,
) -> Result<VideoResult> {
	const KIND: OperationKind = OperationKind::Generate;

	let span = OperationSpan::new(KIND, "generate");

	obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

	let result = span
		.instrument(async move {
			let token = auth::sign(credentials)?;
			let task = generator.submit(&token, request).await?;

			#[cfg(feature = "tracing")]
			tracing::info!(task_id = %task, "Polling for the generated video.");

			generator.poll(&token, &task, policy, cancel).await
		})
		.await;

	match &result {
		Ok(_) => obs::record_operation_outcome(KIND, OperationOutcome::Success),
		Err(_e) => {
			#[cfg(feature = "tracing")]
			tracing::warn!(error = %_e, "Video generation failed.");

			obs::record_operation_outcome(KIND, OperationOutcome::Failure);
		},
	}

	result
}
