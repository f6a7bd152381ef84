//! Upload orchestration.
//!
//! For each artifact, strictly in order: read the build output, request a
//! presigned URL, `PUT` the bytes. The first failure ends the run; nothing
//! is retried or rolled back.

pub mod orchestrator;
pub mod run;

pub use orchestrator::{PublishEvent, PublishReport, Publisher, UploadedArtifact};
pub use run::run;
