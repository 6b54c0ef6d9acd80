//! `video-relay` binary: HTTP front-end for text-to-video generation.

// std
use std::sync::Arc;
// crates.io
use clap::Parser;
use tokio::net::TcpListener;
// self
use video_relay::{
	CancellationToken,
	client::ReqwestGenerationClient,
	server::{self, AppState, CliArgs, ServerConfig, telemetry},
	transport::ReqwestHttpClient,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let _ = dotenvy::dotenv();
	let config = ServerConfig::try_from(CliArgs::parse())?;

	telemetry::init_tracing();

	let http_client = ReqwestHttpClient::with_timeout(config.request_timeout)?;
	let client = ReqwestGenerationClient::with_http_client(config.descriptor.clone(), http_client);
	let shutdown = CancellationToken::new();
	let state = AppState::new(Arc::new(client))
		.with_policy(config.policy)
		.with_shutdown(shutdown.clone());
	let listener = TcpListener::bind(config.listen_addr).await?;

	tracing::info!(
		addr = %config.listen_addr,
		submit = %config.descriptor.endpoints.submit,
		interval = %config.policy.interval,
		max_wait = %config.policy.max_wait,
		"Video relay is listening."
	);

	tokio::spawn(server::shutdown_signal(shutdown));
	server::serve(listener, state).await?;

	tracing::info!("Video relay shut down.");

	Ok(())
}
