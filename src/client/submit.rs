//! Job submission.
//!
//! Submission starts billable work upstream, so it is attempted exactly once: any non-200
//! answer, or a 200 without `data.task_id`, surfaces as a [`SubmissionError`] carrying the raw
//! body for diagnostics.

// crates.io
use http::{Method, StatusCode};
// self
use crate::{
	_prelude::*,
	auth::SignedToken,
	client::{GenerationClient, wire},
	error::{ConfigError, SubmissionError},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	task::{GenerationRequest, TaskHandle},
	transport::GenerationHttpClient,
};

impl<C> GenerationClient<C>
where
	C: ?Sized + GenerationHttpClient,
{
	/// Submits `request` and returns the service-issued task handle.
	pub async fn submit(
		&self,
		token: &SignedToken,
		request: &GenerationRequest,
	) -> Result<TaskHandle> {
		const KIND: OperationKind = OperationKind::Submit;

		let span = OperationSpan::new(KIND, "submit");

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let result = span
			.instrument(async move {
				let body = serde_json::to_vec(request)
					.map_err(|source| ConfigError::RequestEncode { source })?;
				let http_request = self.build_request(
					Method::POST,
					&self.descriptor.endpoints.submit,
					token,
					body,
				)?;
				let response = self
					.http_client
					.execute(http_request)
					.await
					.map_err(|e| self.http_client.map_transport_error(e))?;
				let status = response.status();

				if status != StatusCode::OK {
					return Err(SubmissionError::Rejected {
						status: status.as_u16(),
						body: String::from_utf8_lossy(response.body()).into_owned(),
					}
					.into());
				}

				let task_id = wire::decode_task_id(response.body()).ok_or_else(|| {
					SubmissionError::MissingTaskId {
						body: String::from_utf8_lossy(response.body()).into_owned(),
					}
				})?;

				#[cfg(feature = "tracing")]
				tracing::info!(task_id = %task_id, "Video generation task submitted.");

				Ok(task_id)
			})
			.await;

		match &result {
			Ok(_) => obs::record_operation_outcome(KIND, OperationOutcome::Success),
			Err(_e) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(error = %_e, "Video generation task submission failed.");

				obs::record_operation_outcome(KIND, OperationOutcome::Failure);
			},
		}

		result
	}
}
