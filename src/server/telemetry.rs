//! Log output for the relay binary.

// crates.io
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// Filtering follows `RUST_LOG` and falls back to `info`. Calling this twice is a no-op.
pub fn init_tracing() {
	let _ = tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
		.with(fmt::layer().with_target(false))
		.try_init();
}
