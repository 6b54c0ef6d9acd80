//! Public extension contracts (request signing).
//!
//! The client attaches credentials through [`RequestSignerExt`] so deployments fronted by a
//! gateway that expects a different authorization scheme can swap the signer without touching
//! the submit/poll logic.

pub mod request_signer;

pub use request_signer::*;
