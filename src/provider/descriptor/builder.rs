// self
use crate::{
	_prelude::*,
	provider::{ServiceDescriptor, ServiceEndpoints},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ServiceDescriptorError {
	/// Submission endpoint is mandatory.
	#[error("Missing submit endpoint.")]
	MissingSubmitEndpoint,
	/// Status endpoint is mandatory.
	#[error("Missing status endpoint.")]
	MissingStatusEndpoint,
	/// A URL string could not be parsed.
	#[error("Service URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must speak HTTP or HTTPS.
	#[error("The {endpoint} endpoint must use HTTP or HTTPS: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoint cannot carry path segments (e.g. `mailto:`).
	#[error("The URL cannot be used as a base: {url}.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
}

/// Builder for [`ServiceDescriptor`] values.
#[derive(Debug, Default)]
pub struct ServiceDescriptorBuilder {
	/// Endpoint accepting job submissions.
	pub submit_endpoint: Option<Url>,
	/// Base URL for per-task status checks.
	pub status_endpoint: Option<Url>,
}
impl ServiceDescriptorBuilder {
	/// Sets the submission endpoint.
	pub fn submit_endpoint(mut self, url: Url) -> Self {
		self.submit_endpoint = Some(url);

		self
	}

	/// Sets the status base endpoint.
	pub fn status_endpoint(mut self, url: Url) -> Self {
		self.status_endpoint = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ServiceDescriptor, ServiceDescriptorError> {
		let submit = self.submit_endpoint.ok_or(ServiceDescriptorError::MissingSubmitEndpoint)?;
		let status = self.status_endpoint.ok_or(ServiceDescriptorError::MissingStatusEndpoint)?;
		let descriptor = ServiceDescriptor { endpoints: ServiceEndpoints { submit, status } };

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ServiceDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ServiceDescriptorError> {
		validate_endpoint("submit", &self.endpoints.submit)?;
		validate_endpoint("status", &self.endpoints.status)
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ServiceDescriptorError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(ServiceDescriptorError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}
