//! Auth-domain credentials, redacted secrets, and signed bearer tokens.

pub mod credentials;
pub mod secret;
pub mod signer;
pub mod token;

pub use credentials::*;
pub use secret::*;
pub use signer::*;
pub use token::*;
