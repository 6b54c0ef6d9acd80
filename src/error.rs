//! Relay-level error types shared across signing, submission, polling, and the server.

// self
use crate::{_prelude::*, provider::ServiceDescriptorError, task::TaskHandle};

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem (signing, descriptors, request construction).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The generation service refused or garbled the job creation.
	#[error(transparent)]
	Submission(#[from] SubmissionError),
	/// Temporary upstream failure while checking a task; retried by the poll loop.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The caller did not supply both halves of the key pair.
	#[error("Missing API keys in headers.")]
	MissingCredentials,
	/// The task never produced a video URL within the poll budget.
	#[error("Task `{task_id}` did not produce a video after {attempts} status checks ({elapsed}).")]
	MaxWaitExceeded {
		/// Task that was being polled.
		task_id: TaskHandle,
		/// Number of status checks performed.
		attempts: u32,
		/// Time spent polling.
		elapsed: Duration,
	},
	/// Polling was aborted through its cancellation token.
	#[error("Polling task `{task_id}` was cancelled.")]
	Cancelled {
		/// Task that was being polled.
		task_id: TaskHandle,
	},
}
impl Error {
	/// Retry-After hint attached to a transient failure, if any.
	pub fn retry_after(&self) -> Option<Duration> {
		match self {
			Self::Transient(TransientError::StatusEndpoint { retry_after, .. }) => *retry_after,
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the relay.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Bearer token cannot be carried in an HTTP header.
	#[error("Signed token is not a valid header value.")]
	InvalidHeader(#[from] http::header::InvalidHeaderValue),
	/// Service descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] ServiceDescriptorError),
	/// The signing primitive rejected the credentials.
	#[error("Unable to sign the authentication token.")]
	Signing {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Generation request could not be serialized.
	#[error("Unable to encode the generation request.")]
	RequestEncode {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Job creation failures; never retried.
#[derive(Debug, ThisError)]
pub enum SubmissionError {
	/// The submission endpoint answered with a non-200 status.
	#[error("Submission endpoint returned HTTP {status}: {body}")]
	Rejected {
		/// HTTP status code.
		status: u16,
		/// Raw response body kept for diagnostics.
		body: String,
	},
	/// The submission endpoint answered 200 without `data.task_id`.
	#[error("Submission response is missing data.task_id: {body}")]
	MissingTaskId {
		/// Raw response body kept for diagnostics.
		body: String,
	},
}

/// Temporary failure variants (safe to retry).
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Status endpoint returned an unexpected but non-fatal response.
	#[error("Status endpoint returned an unexpected response: {message}")]
	StatusEndpoint {
		/// Response body or transport message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Status endpoint responded with JSON that could not be parsed.
	#[error("Status endpoint returned malformed JSON.")]
	StatusResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the generation service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
