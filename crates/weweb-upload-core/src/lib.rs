//! Core library for `weweb-upload`.
//!
//! Publishing runs in two phases:
//!
//! 1. `auth::SessionManager` turns the cached preference record into a token
//!    confirmed valid this run, logging in again when needed, and persists
//!    the record (best effort).
//! 2. `publish::Publisher` walks `models::BUILD_ARTIFACTS` in order, asking
//!    the control plane for a presigned URL and uploading each bundle. The
//!    first failure ends the run.
//!
//! All network access goes through the `api::ControlPlane` trait.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod publish;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, ApiError, ControlPlane};
pub use auth::{CredentialPrompt, Credentials, PreferenceStore, SessionManager, UserPreference};
pub use config::Config;
pub use error::PublishError;
pub use models::{ObjectType, PackageDescriptor, BUILD_ARTIFACTS};
pub use publish::{run, PublishEvent, PublishReport, Publisher};

