//! Service descriptor data structures and helpers shared by submit and poll.

/// Builder API for assembling service descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, task::TaskHandle};

/// Endpoint set declared by a service descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceEndpoints {
	/// Endpoint accepting `POST` job submissions.
	pub submit: Url,
	/// Base URL; a task's status lives at `<status>/<task_id>`.
	pub status: Url,
}

/// Immutable service descriptor consumed by the generation client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDescriptor {
	/// Endpoint definitions exposed by the service.
	pub endpoints: ServiceEndpoints,
}
impl ServiceDescriptor {
	/// Production origin of the text-to-video service.
	pub const DEFAULT_BASE_URL: &'static str = "https://api.klingai.com";
	/// Path segments of the text-to-video resource, relative to the origin.
	pub const TEXT2VIDEO_SEGMENTS: [&'static str; 3] = ["v1", "videos", "text2video"];

	/// Creates a new builder.
	pub fn builder() -> ServiceDescriptorBuilder {
		ServiceDescriptorBuilder::default()
	}

	/// Derives both endpoints from an origin such as `https://api.klingai.com`.
	///
	/// Any path already present on `base` is kept and the text-to-video segments are appended.
	pub fn from_base_url(base: &str) -> Result<Self, ServiceDescriptorError> {
		let mut resource =
			Url::parse(base).map_err(|source| ServiceDescriptorError::InvalidUrl { source })?;

		resource
			.path_segments_mut()
			.map_err(|_| ServiceDescriptorError::CannotBeABase { url: base.to_owned() })?
			.pop_if_empty()
			.extend(Self::TEXT2VIDEO_SEGMENTS);

		Self::builder().submit_endpoint(resource.clone()).status_endpoint(resource).build()
	}

	/// Descriptor for the production service.
	pub fn production() -> Result<Self, ServiceDescriptorError> {
		Self::from_base_url(Self::DEFAULT_BASE_URL)
	}

	/// Status URL for a single task; the identifier is percent-encoded as one path segment.
	pub fn status_url(&self, task: &TaskHandle) -> Result<Url, ServiceDescriptorError> {
		let mut url = self.endpoints.status.clone();

		url.path_segments_mut()
			.map_err(|_| ServiceDescriptorError::CannotBeABase {
				url: self.endpoints.status.to_string(),
			})?
			.pop_if_empty()
			.push(task.as_str());

		Ok(url)
	}
}
