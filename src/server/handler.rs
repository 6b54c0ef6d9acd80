//! Request handlers and the JSON error surface.

// crates.io
use axum::{
	Json,
	body::Bytes,
	extract::State,
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
};
// self
use crate::{
	_prelude::*,
	auth::Credentials,
	client,
	server::{ACCESS_KEY_HEADER, AppState, SECRET_KEY_HEADER},
	task::GenerationOptions,
};

/// Greeting returned by `GET /`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootResponse {
	/// Fixed greeting.
	pub message: String,
}

/// Body returned when a video is ready.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
	/// Fixed completion message.
	pub message: String,
	/// Download URL reported by the service.
	pub video_url: String,
}

/// Body returned for every failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Human-readable failure description.
	pub error: String,
}

/// Handler-level failure converted into a JSON response.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Relay failure.
	#[error(transparent)]
	Relay(#[from] Error),
	/// The request body is not valid generation options JSON.
	#[error("Invalid request body: {0}")]
	InvalidBody(#[source] serde_json::Error),
}
impl ApiError {
	/// HTTP status reported for this failure.
	pub fn status(&self) -> StatusCode {
		match self {
			Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
			Self::Relay(e) => match e {
				Error::Config(_) | Error::MissingCredentials => StatusCode::BAD_REQUEST,
				Error::Submission(_) => StatusCode::INTERNAL_SERVER_ERROR,
				Error::Transient(_) | Error::Transport(_) => StatusCode::BAD_GATEWAY,
				Error::MaxWaitExceeded { .. } => StatusCode::GATEWAY_TIMEOUT,
				Error::Cancelled { .. } => StatusCode::SERVICE_UNAVAILABLE,
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status();

		#[cfg(feature = "tracing")]
		{
			if status.is_server_error() {
				tracing::error!(%status, error = %self, "Generation request failed.");
			} else {
				tracing::warn!(%status, error = %self, "Generation request rejected.");
			}
		}

		(status, Json(ErrorBody { error: self.to_string() })).into_response()
	}
}

/// `GET /` (and `HEAD /`).
pub async fn root() -> Json<RootResponse> {
	Json(RootResponse { message: "Hello, World!".into() })
}

/// `POST /generate_video`.
///
/// Credentials are checked before the body is parsed so a keyless request never reaches the
/// service. An empty body means "all defaults".
pub async fn generate_video(
	State(state): State<AppState>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
	let credentials = Credentials::from_parts(
		header_str(&headers, ACCESS_KEY_HEADER),
		header_str(&headers, SECRET_KEY_HEADER),
	)?;
	let options = if body.iter().all(u8::is_ascii_whitespace) {
		GenerationOptions::default()
	} else {
		serde_json::from_slice::<GenerationOptions>(&body).map_err(ApiError::InvalidBody)?
	};
	let request = options.into_request();

	#[cfg(feature = "tracing")]
	tracing::info!(access_key = credentials.access_key(), "Video generation request received.");

	let cancel = state.shutdown.child_token();
	// Cancels the poll if the client disconnects and axum drops this future.
	let _guard = cancel.clone().drop_guard();
	let result =
		client::generate(state.generator.as_ref(), &credentials, &request, &state.policy, &cancel)
			.await?;

	Ok(Json(GenerateResponse { message: "Video generation complete".into(), video_url: result.url }))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers.get(name).and_then(|value| value.to_str().ok())
}
