//! Runtime configuration for the `video-relay` binary.

// std
use std::net::SocketAddr;
// crates.io
use clap::Parser;
// self
use crate::{
	_prelude::*,
	auth::TOKEN_TTL,
	client::PollPolicy,
	provider::{ServiceDescriptor, ServiceDescriptorError},
};

/// Command-line arguments, each with an environment-variable fallback.
///
/// A `.env` file in the working directory is loaded before parsing.
#[derive(Clone, Debug, Parser)]
#[command(name = "video-relay", version, about = "Relays text-to-video generation requests")]
pub struct CliArgs {
	/// Socket address the HTTP server binds to.
	///
	/// Environment variable: `LISTEN_ADDR`
	#[arg(long, env = "LISTEN_ADDR", default_value_t = String::from("0.0.0.0:3000"))]
	pub listen_addr: String,

	/// Origin of the generation service; the text-to-video path is appended.
	///
	/// Environment variable: `VIDEO_API_BASE_URL`
	#[arg(long, env = "VIDEO_API_BASE_URL", default_value_t = String::from(ServiceDescriptor::DEFAULT_BASE_URL))]
	pub base_url: String,

	/// Seconds between status checks.
	///
	/// Environment variable: `POLL_INTERVAL_SECS`
	#[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = 5)]
	pub poll_interval_secs: u64,

	/// Growth factor applied to the interval after each check; `1.0` keeps it fixed.
	///
	/// Environment variable: `POLL_BACKOFF`
	#[arg(long, env = "POLL_BACKOFF", default_value_t = 1.0)]
	pub poll_backoff: f64,

	/// Upper bound for a single wait between checks, in seconds.
	///
	/// Environment variable: `POLL_MAX_INTERVAL_SECS`
	#[arg(long, env = "POLL_MAX_INTERVAL_SECS", default_value_t = 60)]
	pub poll_max_interval_secs: u64,

	/// Total polling budget per request, in seconds.
	///
	/// Environment variable: `POLL_MAX_WAIT_SECS`
	#[arg(long, env = "POLL_MAX_WAIT_SECS", default_value_t = 600)]
	pub poll_max_wait_secs: u64,

	/// Optional cap on status checks per request.
	///
	/// Environment variable: `POLL_MAX_ATTEMPTS`
	#[arg(long, env = "POLL_MAX_ATTEMPTS")]
	pub poll_max_attempts: Option<u32>,

	/// Timeout for each outbound HTTP call, in seconds.
	///
	/// Environment variable: `REQUEST_TIMEOUT_SECS`
	#[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
	pub request_timeout_secs: u64,
}

/// Validated server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
	/// Bind address.
	pub listen_addr: SocketAddr,
	/// Service endpoints.
	pub descriptor: ServiceDescriptor,
	/// Poll budget applied to every request.
	pub policy: PollPolicy,
	/// Per-call HTTP timeout.
	pub request_timeout: Duration,
}
impl TryFrom<CliArgs> for ServerConfig {
	type Error = ServerConfigError;

	fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
		let listen_addr = args
			.listen_addr
			.parse::<SocketAddr>()
			.map_err(|source| ServerConfigError::ListenAddr { value: args.listen_addr, source })?;
		let descriptor = ServiceDescriptor::from_base_url(&args.base_url)?;

		if args.poll_interval_secs == 0 {
			return Err(ServerConfigError::ZeroPollInterval);
		}
		if args.request_timeout_secs == 0 {
			return Err(ServerConfigError::ZeroRequestTimeout);
		}

		let max_wait = seconds(args.poll_max_wait_secs);

		// Every status check reuses one bearer; past `exp` the service answers 401.
		if max_wait > TOKEN_TTL {
			return Err(ServerConfigError::MaxWaitBeyondTokenLifetime { max_wait, ttl: TOKEN_TTL });
		}

		let mut policy = PollPolicy::fixed(seconds(args.poll_interval_secs))
			.with_backoff(args.poll_backoff)
			.with_max_interval(seconds(args.poll_max_interval_secs))
			.with_max_wait(max_wait);

		if let Some(max_attempts) = args.poll_max_attempts {
			policy = policy.with_max_attempts(max_attempts);
		}

		Ok(Self {
			listen_addr,
			descriptor,
			policy,
			request_timeout: seconds(args.request_timeout_secs),
		})
	}
}

/// Reasons a [`CliArgs`] set cannot become a [`ServerConfig`].
#[derive(Debug, ThisError)]
pub enum ServerConfigError {
	/// `LISTEN_ADDR` is not a socket address.
	#[error("LISTEN_ADDR `{value}` is not a valid socket address.")]
	ListenAddr {
		/// Rejected value.
		value: String,
		/// Parse failure.
		#[source]
		source: std::net::AddrParseError,
	},
	/// `VIDEO_API_BASE_URL` does not yield valid endpoints.
	#[error(transparent)]
	Descriptor(#[from] ServiceDescriptorError),
	/// `POLL_INTERVAL_SECS` is zero.
	#[error("POLL_INTERVAL_SECS must be greater than 0.")]
	ZeroPollInterval,
	/// `REQUEST_TIMEOUT_SECS` is zero.
	#[error("REQUEST_TIMEOUT_SECS must be greater than 0.")]
	ZeroRequestTimeout,
	/// `POLL_MAX_WAIT_SECS` outlives the signed token.
	#[error("POLL_MAX_WAIT_SECS ({max_wait}) must not exceed the token lifetime ({ttl}).")]
	MaxWaitBeyondTokenLifetime {
		/// Requested budget.
		max_wait: Duration,
		/// Lifetime of the bearer used for every status check.
		ttl: Duration,
	},
}

fn seconds(secs: u64) -> Duration {
	Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
}
