//! Generation client: submit a job, then poll it until a video URL is attached.

pub mod generator;
pub mod policy;

mod poll;
mod submit;
mod wire;

pub use generator::*;
pub use policy::*;

// crates.io
use http::{
	Method,
	header::{ACCEPT, CONTENT_TYPE, HeaderValue},
};
// self
use crate::{
	_prelude::*,
	auth::SignedToken,
	error::ConfigError,
	ext::{BearerSigner, RequestSignerExt},
	provider::ServiceDescriptor,
	transport::{GenerationHttpClient, HttpRequest},
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestHttpClient;

/// Signer trait object used by [`GenerationClient`].
pub type DynRequestSigner = dyn RequestSignerExt<HttpRequest, ConfigError>;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestGenerationClient = GenerationClient<ReqwestHttpClient>;

/// Talks to one text-to-video service.
///
/// The client owns the HTTP transport, the service descriptor, and the request signer so the
/// submit and poll operations only deal with protocol logic. It holds no per-task state:
/// every call carries its own bearer token and task handle, so one client can serve any
/// number of concurrent requests.
#[derive(Clone)]
pub struct GenerationClient<C>
where
	C: ?Sized + GenerationHttpClient,
{
	/// HTTP client wrapper used for every outbound service request.
	pub http_client: Arc<C>,
	/// Service descriptor that defines the endpoints.
	pub descriptor: ServiceDescriptor,
	/// Signer that attaches the bearer token to each request.
	pub signer: Arc<DynRequestSigner>,
}
impl<C> GenerationClient<C>
where
	C: ?Sized + GenerationHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(descriptor: ServiceDescriptor, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), descriptor, signer: Arc::new(BearerSigner) }
	}

	/// Replaces the default bearer signer.
	pub fn with_signer(mut self, signer: Arc<DynRequestSigner>) -> Self {
		self.signer = signer;

		self
	}

	fn build_request(
		&self,
		method: Method,
		url: &Url,
		token: &SignedToken,
		body: Vec<u8>,
	) -> Result<HttpRequest> {
		let json = HeaderValue::from_static("application/json");
		let request = http::Request::builder()
			.method(method)
			.uri(url.as_str())
			.header(CONTENT_TYPE, json.clone())
			.header(ACCEPT, json)
			.body(body)
			.map_err(ConfigError::from)?;

		Ok(self.signer.attach_token(request, token)?)
	}
}
#[cfg(feature = "reqwest")]
impl GenerationClient<ReqwestHttpClient> {
	/// Creates a new client for the provided descriptor.
	///
	/// The client provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly.
	pub fn new(descriptor: ServiceDescriptor) -> Self {
		Self::with_http_client(descriptor, ReqwestHttpClient::default())
	}
}
impl<C> Debug for GenerationClient<C>
where
	C: ?Sized + GenerationHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GenerationClient").field("descriptor", &self.descriptor).finish()
	}
}
