//! Status polling.
//!
//! The loop checks `GET <status>/<task_id>` until the service reports a success status *and*
//! attaches a video URL; the URL is known to lag behind the status flip, so success without a
//! URL keeps polling. Failed checks (non-200, malformed JSON, network errors) are logged and
//! retried. The loop ends with [`Error::MaxWaitExceeded`] when the [`PollPolicy`] budget runs
//! out and with [`Error::Cancelled`] when the caller's token fires.

// std
use std::sync::atomic::{AtomicU32, Ordering};
// crates.io
use http::{Method, StatusCode};
use tokio::time::{self, Instant};
// self
use crate::{
	_prelude::*,
	auth::SignedToken,
	client::{GenerationClient, PollPolicy, wire},
	error::{ConfigError, TransientError},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	task::{TaskHandle, TaskSnapshot, VideoResult},
	transport::{GenerationHttpClient, ResponseMetadata},
};

// Fallback deadline when the configured budget overflows the clock.
const FAR_FUTURE: std::time::Duration = std::time::Duration::from_secs(86_400 * 365);

impl<C> GenerationClient<C>
where
	C: ?Sized + GenerationHttpClient,
{
	/// Performs one status check for `task`.
	pub async fn fetch_status(&self, token: &SignedToken, task: &TaskHandle) -> Result<TaskSnapshot> {
		let url = self.descriptor.status_url(task).map_err(ConfigError::from)?;
		let request = self.build_request(Method::GET, &url, token, Vec::new())?;
		let response = self
			.http_client
			.execute(request)
			.await
			.map_err(|e| self.http_client.map_transport_error(e))?;

		if response.status() != StatusCode::OK {
			let meta = ResponseMetadata::from_response(&response);

			return Err(TransientError::StatusEndpoint {
				message: String::from_utf8_lossy(response.body()).into_owned(),
				status: meta.status,
				retry_after: meta.retry_after,
			}
			.into());
		}

		Ok(wire::decode_snapshot(response.body(), response.status().as_u16())?)
	}

	/// Polls `task` until a video URL is available, the budget runs out, or `cancel` fires.
	pub async fn poll(
		&self,
		token: &SignedToken,
		task: &TaskHandle,
		policy: &PollPolicy,
		cancel: &CancellationToken,
	) -> Result<VideoResult> {
		const KIND: OperationKind = OperationKind::Poll;

		let span = OperationSpan::new(KIND, "poll").with_task(task);

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let result = span.instrument(self.poll_until_resolved(token, task, policy, cancel)).await;

		match &result {
			Ok(_) => obs::record_operation_outcome(KIND, OperationOutcome::Success),
			Err(_) => obs::record_operation_outcome(KIND, OperationOutcome::Failure),
		}

		result
	}

	async fn poll_until_resolved(
		&self,
		token: &SignedToken,
		task: &TaskHandle,
		policy: &PollPolicy,
		cancel: &CancellationToken,
	) -> Result<VideoResult> {
		let started = Instant::now();
		let deadline = started
			.checked_add(policy.max_wait.unsigned_abs())
			.unwrap_or_else(|| started + FAR_FUTURE);
		let attempts = AtomicU32::new(0);
		let elapsed = || Duration::try_from(started.elapsed()).unwrap_or(Duration::MAX);
		let resolve = async {
			loop {
				let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
				let mut retry_after = None;

				match self.fetch_status(token, task).await {
					Ok(snapshot) => {
						obs::record_poll_status(&snapshot.status);

						if let Some(url) = snapshot.resolved_url() {
							#[cfg(feature = "tracing")]
							tracing::info!(task_id = %task, attempt, url, "Video is ready.");

							return Ok(VideoResult {
								task_id: task.clone(),
								url: url.to_owned(),
								attempts: attempt,
							});
						}

						#[cfg(feature = "tracing")]
						{
							if snapshot.status.is_terminal_success() {
								tracing::info!(
									task_id = %task,
									attempt,
									status = %snapshot.status,
									"Task is marked ready but no video URL is attached yet."
								);
							} else {
								tracing::debug!(
									task_id = %task,
									attempt,
									status = %snapshot.status,
									"Task is still in progress."
								);
							}
						}
					},
					Err(e @ Error::Config(_)) => return Err(e),
					Err(e) => {
						#[cfg(feature = "tracing")]
						tracing::warn!(task_id = %task, attempt, error = %e, "Status check failed.");

						retry_after = e.retry_after();
					},
				}

				if policy.attempts_exhausted(attempt) {
					return Err(Error::MaxWaitExceeded {
						task_id: task.clone(),
						attempts: attempt,
						elapsed: elapsed(),
					});
				}

				time::sleep(policy.delay_for(attempt, retry_after).unsigned_abs()).await;
			}
		};

		tokio::select! {
			biased;
			_ = cancel.cancelled() => {
				#[cfg(feature = "tracing")]
				tracing::info!(task_id = %task, "Polling cancelled.");

				Err(Error::Cancelled { task_id: task.clone() })
			},
			_ = time::sleep_until(deadline) => Err(Error::MaxWaitExceeded {
				task_id: task.clone(),
				attempts: attempts.load(Ordering::Relaxed),
				elapsed: elapsed(),
			}),
			result = resolve => result,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		auth::{self, Credentials},
		provider::ServiceDescriptor,
		transport::{HttpRequest, HttpResponse, TransportFuture},
	};

	#[derive(Debug, ThisError)]
	#[error("Unreachable transport.")]
	struct Unreachable;

	struct UnreachableHttpClient;
	impl GenerationHttpClient for UnreachableHttpClient {
		type TransportError = Unreachable;

		fn execute(&self, _request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
			Box::pin(async { Err::<HttpResponse, _>(Unreachable) })
		}
	}

	fn client() -> GenerationClient<UnreachableHttpClient> {
		let descriptor = ServiceDescriptor::from_base_url("https://video.example.com")
			.expect("Test descriptor should build.");

		GenerationClient::with_http_client(descriptor, UnreachableHttpClient)
	}

	fn token() -> SignedToken {
		let credentials =
			Credentials::new("ak-poll", "sk-poll").expect("Test credentials should be accepted.");

		auth::sign(&credentials).expect("Signing should succeed.")
	}

	#[tokio::test]
	async fn transport_failures_map_to_network_errors() {
		let task = TaskHandle::new("t-net").expect("Task handle should be valid.");
		let err = client()
			.fetch_status(&token(), &task)
			.await
			.expect_err("Unreachable transport should fail.");

		assert!(matches!(err, Error::Transport(_)));
	}

	#[tokio::test]
	async fn zero_budget_gives_up_without_hanging() {
		let task = TaskHandle::new("t-budget").expect("Task handle should be valid.");
		let policy = PollPolicy::fixed(Duration::milliseconds(1)).with_max_wait(Duration::ZERO);
		let err = client()
			.poll(&token(), &task, &policy, &CancellationToken::new())
			.await
			.expect_err("A zero budget should not resolve.");

		assert!(matches!(err, Error::MaxWaitExceeded { .. }));
	}
}
