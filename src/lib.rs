//! Text-to-video relay: sign short-lived bearer tokens, submit generation jobs, and poll them to a
//! result URL under a bounded, cancellable policy.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod ext;
pub mod obs;
pub mod provider;
#[cfg(feature = "server")] pub mod server;
pub mod task;
pub mod transport;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use tokio_util::sync::CancellationToken;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use tokio_util::sync::CancellationToken;
pub use url;
#[cfg(feature = "server")] use {color_eyre as _, dotenvy as _};
#[cfg(test)] use {httpmock as _, parking_lot as _, tower as _};
