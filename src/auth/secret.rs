//! Key material that must stay out of logs and error messages.

// self
use crate::_prelude::*;

/// Secret key or compact token; `Debug` never prints the contents.
///
/// The relay only ever needs the raw bytes to compute an HMAC or fill an `Authorization`
/// header, so there is no `Display` and no serde support.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);
impl SecretString {
	/// Takes ownership of `value`.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw value for signing or header construction. Never log it.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether nothing was supplied; an empty secret counts as missing.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl Debug for SecretString {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SecretString(<redacted>)")
	}
}
