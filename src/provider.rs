//! Service-facing descriptors.
//!
//! `descriptor` exposes validated metadata ([`ServiceDescriptor`]) covering the submission
//! endpoint and the status base URL that per-task status URLs hang off.

pub mod descriptor;

pub use descriptor::*;
