//! Generation-task models: the request body, the task handle, and observed statuses.

pub mod handle;
pub mod request;
pub mod status;

pub use handle::*;
pub use request::*;
pub use status::*;
