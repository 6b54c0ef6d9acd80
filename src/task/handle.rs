//! Opaque task identifier issued by the generation service.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Error returned when a task identifier is unusable.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum TaskHandleError {
	/// The identifier was empty or whitespace.
	#[error("Task identifier cannot be empty.")]
	Empty,
	/// The identifier contained control characters.
	#[error("Task identifier contains control characters.")]
	ControlCharacter,
}

/// Identifier returned by a successful submission; lives until a terminal status is observed
/// or the caller gives up.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskHandle(String);
impl TaskHandle {
	/// Creates a new handle after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, TaskHandleError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Borrows the raw identifier.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for TaskHandle {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for TaskHandle {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for TaskHandle {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<TaskHandle> for String {
	fn from(value: TaskHandle) -> Self {
		value.0
	}
}
impl TryFrom<String> for TaskHandle {
	type Error = TaskHandleError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Debug for TaskHandle {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TaskHandle({})", self.0)
	}
}
impl Display for TaskHandle {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(view: &str) -> Result<(), TaskHandleError> {
	if view.trim().is_empty() {
		return Err(TaskHandleError::Empty);
	}
	if view.chars().any(char::is_control) {
		return Err(TaskHandleError::ControlCharacter);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn handle_rejects_blank_and_control_characters() {
		assert_eq!(TaskHandle::new("  "), Err(TaskHandleError::Empty));
		assert_eq!(TaskHandle::new("t\n1"), Err(TaskHandleError::ControlCharacter));
		assert_eq!(TaskHandle::new("t1").map(String::from), Ok("t1".to_owned()));
	}

	#[test]
	fn handle_serde_round_trips_through_string() {
		let handle: TaskHandle =
			serde_json::from_str("\"task-42\"").expect("Handle should deserialize.");

		assert_eq!(handle.as_str(), "task-42");
		assert!(serde_json::from_str::<TaskHandle>("\"\"").is_err());
	}
}
