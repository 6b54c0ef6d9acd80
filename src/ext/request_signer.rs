//! Request signing contracts that attach relay-issued tokens to outbound requests.

// crates.io
use http::header::{AUTHORIZATION, HeaderValue};
// self
use crate::{auth::SignedToken, error::ConfigError, transport::HttpRequest};

/// Describes how to attach a [`SignedToken`] to an outbound request without constraining the
/// HTTP client type.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and injects authorization state derived from the
	/// [`SignedToken`].
	fn attach_token(&self, request: Request, token: &SignedToken) -> Result<Request, Error>;
}

/// Default signer: `Authorization: Bearer <token>`, flagged as sensitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct BearerSigner;
impl RequestSignerExt<HttpRequest, ConfigError> for BearerSigner {
	fn attach_token(
		&self,
		mut request: HttpRequest,
		token: &SignedToken,
	) -> Result<HttpRequest, ConfigError> {
		let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))?;

		value.set_sensitive(true);
		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(request)
	}
}
