//! Task status vocabulary and poll observations.

// self
use crate::{_prelude::*, task::TaskHandle};

/// Status reported by the generation service for a task.
///
/// The original string is preserved for unknown values so logs show exactly what the service
/// said.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
	/// Accepted but not started.
	Submitted,
	/// Queued.
	Pending,
	/// Rendering.
	Processing,
	/// Finished successfully (primary vocabulary).
	Succeed,
	/// Finished successfully (alternate vocabulary).
	Completed,
	/// Any other value; treated as in-progress.
	Other(String),
}
impl TaskStatus {
	/// Parses the service's `task_status` string.
	pub fn parse(raw: &str) -> Self {
		match raw {
			"submitted" => Self::Submitted,
			"pending" => Self::Pending,
			"processing" => Self::Processing,
			"succeed" => Self::Succeed,
			"completed" => Self::Completed,
			other => Self::Other(other.to_owned()),
		}
	}

	/// Returns the wire string.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Submitted => "submitted",
			Self::Pending => "pending",
			Self::Processing => "processing",
			Self::Succeed => "succeed",
			Self::Completed => "completed",
			Self::Other(raw) => raw,
		}
	}

	/// Bounded label for metrics; unknown values collapse into `other`.
	pub fn label(&self) -> &'static str {
		match self {
			Self::Submitted => "submitted",
			Self::Pending => "pending",
			Self::Processing => "processing",
			Self::Succeed => "succeed",
			Self::Completed => "completed",
			Self::Other(_) => "other",
		}
	}

	/// Whether the service claims the task finished successfully.
	///
	/// A success status alone does not resolve a task: the video URL can lag behind it.
	pub fn is_terminal_success(&self) -> bool {
		matches!(self, Self::Succeed | Self::Completed)
	}
}
impl From<String> for TaskStatus {
	fn from(value: String) -> Self {
		Self::parse(&value)
	}
}
impl From<&str> for TaskStatus {
	fn from(value: &str) -> Self {
		Self::parse(value)
	}
}
impl From<TaskStatus> for String {
	fn from(value: TaskStatus) -> Self {
		match value {
			TaskStatus::Other(raw) => raw,
			known => known.as_str().to_owned(),
		}
	}
}
impl Display for TaskStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One status check: what the service reported and the first video URL, if attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskSnapshot {
	/// Reported status.
	pub status: TaskStatus,
	/// URL of the first generated video, when present and non-empty.
	pub video_url: Option<String>,
}
impl TaskSnapshot {
	/// Returns the URL only when the task is terminal-success and the URL is attached.
	pub fn resolved_url(&self) -> Option<&str> {
		if !self.status.is_terminal_success() {
			return None;
		}

		self.video_url.as_deref().filter(|url| !url.is_empty())
	}
}

/// Final outcome of a successful poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
	/// Task that produced the video.
	pub task_id: TaskHandle,
	/// Download URL of the generated video.
	pub url: String,
	/// Number of status checks it took.
	pub attempts: u32,
}
