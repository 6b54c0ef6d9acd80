//! Response envelopes of the generation service.

// self
use crate::{
	_prelude::*,
	error::TransientError,
	task::{TaskHandle, TaskSnapshot, TaskStatus},
};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
	data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct SubmitData {
	task_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusData {
	task_status: String,
	#[serde(default)]
	task_result: Option<TaskResult>,
}

#[derive(Debug, Default, Deserialize)]
struct TaskResult {
	#[serde(default)]
	videos: Vec<VideoArtifact>,
}

#[derive(Debug, Deserialize)]
struct VideoArtifact {
	#[serde(default)]
	url: Option<String>,
}

/// Extracts `data.task_id` from a submission response body.
pub(crate) fn decode_task_id(body: &[u8]) -> Option<TaskHandle> {
	let envelope = serde_json::from_slice::<Envelope<SubmitData>>(body).ok()?;

	TaskHandle::new(envelope.data?.task_id?).ok()
}

/// Decodes a status response body into a [`TaskSnapshot`].
pub(crate) fn decode_snapshot(body: &[u8], status: u16) -> Result<TaskSnapshot, TransientError> {
	let deserializer = &mut serde_json::Deserializer::from_slice(body);
	let envelope: Envelope<StatusData> = serde_path_to_error::deserialize(deserializer)
		.map_err(|source| TransientError::StatusResponseParse { source, status: Some(status) })?;
	let data = envelope.data.ok_or_else(|| TransientError::StatusEndpoint {
		message: "Status response is missing `data`.".into(),
		status: Some(status),
		retry_after: None,
	})?;
	let video_url = data
		.task_result
		.unwrap_or_default()
		.videos
		.into_iter()
		.next()
		.and_then(|video| video.url);

	Ok(TaskSnapshot { status: TaskStatus::parse(&data.task_status), video_url })
}
