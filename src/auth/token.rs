//! Signed bearer token presented to the generation service.

// self
use crate::{_prelude::*, auth::SecretString};

/// Claim set carried by a [`SignedToken`], in unix seconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
	/// Issuer: the caller's access key.
	pub iss: String,
	/// Expiry.
	pub exp: i64,
	/// Not-before.
	pub nbf: i64,
}

/// Compact JWT plus the claims and issue time it was minted with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedToken {
	value: SecretString,
	claims: TokenClaims,
	issued_at: OffsetDateTime,
}
impl SignedToken {
	pub(crate) fn new(value: String, claims: TokenClaims, issued_at: OffsetDateTime) -> Self {
		Self { value: SecretString::new(value), claims, issued_at }
	}

	/// Returns the compact token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		self.value.expose()
	}

	/// Claims embedded in the token.
	pub fn claims(&self) -> &TokenClaims {
		&self.claims
	}

	/// Instant the token was minted.
	pub fn issued_at(&self) -> OffsetDateTime {
		self.issued_at
	}

	/// Instant after which the service rejects the token.
	pub fn expires_at(&self) -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(self.claims.exp).unwrap_or(self.issued_at)
	}

	/// Whether `now` falls inside the `[nbf, exp)` window.
	pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
		let ts = now.unix_timestamp();

		ts >= self.claims.nbf && ts < self.claims.exp
	}
}
