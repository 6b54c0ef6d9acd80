//! Per-request key pair used to sign bearer tokens.

// self
use crate::{_prelude::*, auth::SecretString};

/// Access key (token issuer) and secret key (HMAC key) supplied by the caller.
///
/// Both halves are opaque to the relay; the only requirement is that neither is empty.
/// Credentials live for a single request and are never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	access_key: String,
	secret_key: SecretString,
}
impl Credentials {
	/// Builds credentials, rejecting empty halves as [`Error::MissingCredentials`].
	pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
		let access_key = access_key.into();
		let secret_key = SecretString::new(secret_key);

		if access_key.is_empty() || secret_key.is_empty() {
			return Err(Error::MissingCredentials);
		}

		Ok(Self { access_key, secret_key })
	}

	/// Builds credentials from optional parts, as read from request headers.
	pub fn from_parts(access_key: Option<&str>, secret_key: Option<&str>) -> Result<Self> {
		match (access_key, secret_key) {
			(Some(access_key), Some(secret_key)) => Self::new(access_key, secret_key),
			_ => Err(Error::MissingCredentials),
		}
	}

	/// Identifier placed in the token's `iss` claim.
	pub fn access_key(&self) -> &str {
		&self.access_key
	}

	/// Secret used as the HMAC key.
	pub fn secret_key(&self) -> &SecretString {
		&self.secret_key
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("access_key", &self.access_key)
			.field("secret_key", &self.secret_key)
			.finish()
	}
}
