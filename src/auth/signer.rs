//! HS256 token signing for the generation service.
//!
//! Tokens are pure functions of the key pair and the current time: `iss` carries the access
//! key, `nbf` backdates the token by [`NOT_BEFORE_SKEW`] to tolerate clock drift, and `exp`
//! lands [`TOKEN_TTL`] after issuance. The header is fixed to `alg=HS256, typ=JWT`.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, SignedToken, TokenClaims},
	error::ConfigError,
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
};

/// Validity window of a signed token.
pub const TOKEN_TTL: Duration = Duration::seconds(1800);
/// Clock-skew allowance subtracted from the issue time for `nbf`.
pub const NOT_BEFORE_SKEW: Duration = Duration::seconds(5);

/// Signs a token for `credentials` issued now.
pub fn sign(credentials: &Credentials) -> Result<SignedToken> {
	sign_at(credentials, OffsetDateTime::now_utc())
}

/// Signs a token for `credentials` issued at `issued_at`.
pub fn sign_at(credentials: &Credentials, issued_at: OffsetDateTime) -> Result<SignedToken> {
	const KIND: OperationKind = OperationKind::Sign;

	obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

	let result: Result<SignedToken> = OperationSpan::new(KIND, "sign").in_scope(|| {
		let claims = TokenClaims {
			iss: credentials.access_key().to_owned(),
			exp: (issued_at + TOKEN_TTL).unix_timestamp(),
			nbf: (issued_at - NOT_BEFORE_SKEW).unix_timestamp(),
		};
		let key = EncodingKey::from_secret(credentials.secret_key().expose().as_bytes());
		let value = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
			.map_err(|source| ConfigError::Signing { source })?;

		Ok(SignedToken::new(value, claims, issued_at))
	});

	match &result {
		Ok(_) => obs::record_operation_outcome(KIND, OperationOutcome::Success),
		Err(_) => obs::record_operation_outcome(KIND, OperationOutcome::Failure),
	}

	result
}
