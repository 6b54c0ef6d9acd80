//! Generation request body and its caller-facing optional form.

// self
use crate::_prelude::*;

/// Fully populated generation request sent to the submission endpoint.
///
/// Values are forwarded as-is; ranges and enum membership are left for the service to judge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
	/// Text prompt describing the video.
	pub prompt: String,
	/// Clip length in seconds.
	pub duration: i64,
	/// Output resolution label, e.g. `720p`.
	pub resolution: String,
	/// Frames per second.
	pub frame_rate: i64,
	/// Visual style label.
	pub style: String,
}
impl GenerationRequest {
	/// Prompt used when the caller omits one.
	pub const DEFAULT_PROMPT: &'static str = "A sikh guy performing martial arts";
	/// Duration used when the caller omits one.
	pub const DEFAULT_DURATION: i64 = 5;
	/// Resolution used when the caller omits one.
	pub const DEFAULT_RESOLUTION: &'static str = "720p";
	/// Frame rate used when the caller omits one.
	pub const DEFAULT_FRAME_RATE: i64 = 24;
	/// Style used when the caller omits one.
	pub const DEFAULT_STYLE: &'static str = "cinematic";

	/// Creates a request for `prompt` with every other field defaulted.
	pub fn new(prompt: impl Into<String>) -> Self {
		Self { prompt: prompt.into(), ..Self::default() }
	}

	/// Overrides the duration.
	pub fn with_duration(mut self, duration: i64) -> Self {
		self.duration = duration;

		self
	}

	/// Overrides the resolution.
	pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
		self.resolution = resolution.into();

		self
	}

	/// Overrides the frame rate.
	pub fn with_frame_rate(mut self, frame_rate: i64) -> Self {
		self.frame_rate = frame_rate;

		self
	}

	/// Overrides the style.
	pub fn with_style(mut self, style: impl Into<String>) -> Self {
		self.style = style.into();

		self
	}
}
impl Default for GenerationRequest {
	fn default() -> Self {
		Self {
			prompt: Self::DEFAULT_PROMPT.into(),
			duration: Self::DEFAULT_DURATION,
			resolution: Self::DEFAULT_RESOLUTION.into(),
			frame_rate: Self::DEFAULT_FRAME_RATE,
			style: Self::DEFAULT_STYLE.into(),
		}
	}
}

/// Inbound form of [`GenerationRequest`]: every field optional, `null` treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
	/// Optional prompt.
	pub prompt: Option<String>,
	/// Optional duration in seconds.
	pub duration: Option<i64>,
	/// Optional resolution label.
	pub resolution: Option<String>,
	/// Optional frame rate.
	pub frame_rate: Option<i64>,
	/// Optional style label.
	pub style: Option<String>,
}
impl GenerationOptions {
	/// Substitutes defaults for every omitted field.
	pub fn into_request(self) -> GenerationRequest {
		let defaults = GenerationRequest::default();

		GenerationRequest {
			prompt: self.prompt.unwrap_or(defaults.prompt),
			duration: self.duration.unwrap_or(defaults.duration),
			resolution: self.resolution.unwrap_or(defaults.resolution),
			frame_rate: self.frame_rate.unwrap_or(defaults.frame_rate),
			style: self.style.unwrap_or(defaults.style),
		}
	}
}
impl From<GenerationOptions> for GenerationRequest {
	fn from(value: GenerationOptions) -> Self {
		value.into_request()
	}
}
