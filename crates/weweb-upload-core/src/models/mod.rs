//! Data models for what gets published.
//!
//! - `PackageDescriptor`, `ObjectType`: the `name`/`type` pair read from
//!   the project's `package.json`
//! - `ArtifactSpec`: the ordered table of build outputs uploaded per run

pub mod artifact;
pub mod package;

pub use artifact::{ArtifactSpec, BUILD_ARTIFACTS};
pub use package::{ObjectType, PackageDescriptor, PACKAGE_FILE};
