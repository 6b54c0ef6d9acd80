#![allow(dead_code)]

// std
use std::{collections::VecDeque, sync::Arc};
// crates.io
use http::{HeaderValue, StatusCode, header::RETRY_AFTER};
use parking_lot::Mutex;
use time::{Duration, macros::datetime};
// self
use video_relay::{
	auth::{self, Credentials, SignedToken},
	client::{GenerationClient, PollPolicy},
	provider::ServiceDescriptor,
	task::TaskHandle,
	transport::{GenerationHttpClient, HttpRequest, HttpResponse, TransportFuture},
};

pub const ACCESS_KEY: &str = "ak-integration";
pub const SECRET_KEY: &str = "sk-integration";

pub fn credentials() -> Credentials {
	Credentials::new(ACCESS_KEY, SECRET_KEY).expect("Integration credentials should be accepted.")
}

/// Token with a pinned issue time so its serialized form is reproducible.
pub fn pinned_token() -> SignedToken {
	auth::sign_at(&credentials(), datetime!(2030-01-01 00:00:00 UTC))
		.expect("Signing with pinned time should succeed.")
}

pub fn task(id: &str) -> TaskHandle {
	TaskHandle::new(id).expect("Task handle should be valid for integration tests.")
}

/// Millisecond cadence with a generous wall-clock budget.
pub fn fast_policy() -> PollPolicy {
	PollPolicy::fixed(Duration::milliseconds(5)).with_max_wait(Duration::seconds(5))
}

pub fn status_body(status: &str, url: Option<&str>) -> String {
	match url {
		Some(url) => format!(
			"{{\"code\":0,\"data\":{{\"task_status\":\"{status}\",\"task_result\":{{\"videos\":[{{\"url\":\"{url}\"}}]}}}}}}"
		),
		None => format!("{{\"code\":0,\"data\":{{\"task_status\":\"{status}\"}}}}"),
	}
}

#[derive(Debug, thiserror::Error)]
#[error("Scripted connection failure.")]
pub struct ScriptedFailure;

/// One scripted transport outcome.
#[derive(Clone, Debug)]
pub enum Step {
	Respond { status: u16, body: String, retry_after: Option<&'static str> },
	Fail,
}
impl Step {
	pub fn ok(body: impl Into<String>) -> Self {
		Self::Respond { status: 200, body: body.into(), retry_after: None }
	}

	pub fn status(status: u16, body: impl Into<String>) -> Self {
		Self::Respond { status, body: body.into(), retry_after: None }
	}
}

/// Transport that replays a fixed script and records every request it sees.
///
/// Once the script is exhausted the last step repeats.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
	script: Mutex<VecDeque<Step>>,
	last: Mutex<Option<Step>>,
	requests: Mutex<Vec<(http::Method, String)>>,
}
impl ScriptedHttpClient {
	pub fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
		Arc::new(Self { script: Mutex::new(steps.into_iter().collect()), ..Default::default() })
	}

	pub fn calls(&self) -> usize {
		self.requests.lock().len()
	}

	pub fn requests(&self) -> Vec<(http::Method, String)> {
		self.requests.lock().clone()
	}

	fn next_step(&self) -> Step {
		let mut last = self.last.lock();

		if let Some(step) = self.script.lock().pop_front() {
			*last = Some(step.clone());

			return step;
		}

		last.clone().unwrap_or_else(|| Step::ok(status_body("processing", None)))
	}
}
impl GenerationHttpClient for ScriptedHttpClient {
	type TransportError = ScriptedFailure;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		self.requests.lock().push((request.method().clone(), request.uri().to_string()));

		let step = self.next_step();

		Box::pin(async move {
			match step {
				Step::Fail => Err(ScriptedFailure),
				Step::Respond { status, body, retry_after } => {
					let mut response = HttpResponse::new(body.into_bytes());

					*response.status_mut() =
						StatusCode::from_u16(status).expect("Scripted status should be valid.");

					if let Some(value) = retry_after {
						response.headers_mut().insert(RETRY_AFTER, HeaderValue::from_static(value));
					}

					Ok(response)
				},
			}
		})
	}
}

pub fn scripted_client(
	steps: impl IntoIterator<Item = Step>,
) -> (GenerationClient<ScriptedHttpClient>, Arc<ScriptedHttpClient>) {
	let transport = ScriptedHttpClient::new(steps);
	let descriptor = ServiceDescriptor::from_base_url("https://video.test")
		.expect("Scripted descriptor should build.");

	(GenerationClient::with_http_client(descriptor, transport.clone()), transport)
}
