//! Inbound HTTP surface: an axum router that relays generation requests.

pub mod config;
pub mod handler;
pub mod telemetry;

pub use config::*;
pub use handler::*;

// crates.io
use axum::{
	Router,
	routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
// self
use crate::{_prelude::*, client::{PollPolicy, VideoGenerator}};

/// Header carrying the caller's access key.
pub const ACCESS_KEY_HEADER: &str = "x-api-key-ak";
/// Header carrying the caller's secret key.
pub const SECRET_KEY_HEADER: &str = "x-api-key-sk";

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
	/// Backend that performs submission and polling.
	pub generator: Arc<dyn VideoGenerator>,
	/// Poll budget applied to every request.
	pub policy: PollPolicy,
	/// Root token; each request polls under a child of it.
	pub shutdown: CancellationToken,
}
impl AppState {
	/// Creates state with the default poll policy and a fresh shutdown token.
	pub fn new(generator: Arc<dyn VideoGenerator>) -> Self {
		Self { generator, policy: PollPolicy::default(), shutdown: CancellationToken::new() }
	}

	/// Overrides the poll policy.
	pub fn with_policy(mut self, policy: PollPolicy) -> Self {
		self.policy = policy;

		self
	}

	/// Uses `shutdown` as the root cancellation token.
	pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
		self.shutdown = shutdown;

		self
	}
}
impl Debug for AppState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppState")
			.field("policy", &self.policy)
			.field("shutdown", &self.shutdown.is_cancelled())
			.finish_non_exhaustive()
	}
}

/// Builds the relay router.
///
/// `GET /` also answers `HEAD /` with an empty body.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(handler::root))
		.route("/generate_video", post(handler::generate_video))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

/// Serves the relay on `listener` until the state's shutdown token is cancelled.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
	let shutdown = state.shutdown.clone();

	axum::serve(listener, router(state)).with_graceful_shutdown(shutdown.cancelled_owned()).await
}

/// Cancels `shutdown` on Ctrl+C or SIGTERM.
pub async fn shutdown_signal(shutdown: CancellationToken) {
	let ctrl_c = async {
		if let Err(_e) = signal::ctrl_c().await {
			#[cfg(feature = "tracing")]
			tracing::error!(error = %_e, "Failed to install the Ctrl+C handler.");

			std::future::pending::<()>().await;
		}
	};
	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			},
			Err(_e) => {
				#[cfg(feature = "tracing")]
				tracing::error!(error = %_e, "Failed to install the SIGTERM handler.");

				std::future::pending::<()>().await;
			},
		}
	};
	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		() = ctrl_c => {
			#[cfg(feature = "tracing")]
			tracing::info!("Received Ctrl+C.");
		},
		() = terminate => {
			#[cfg(feature = "tracing")]
			tracing::info!("Received SIGTERM.");
		},
	}

	shutdown.cancel();
}
