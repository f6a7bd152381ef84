//! HTTP client module for the WeWeb control plane and object storage.
//!
//! The control plane authenticates developers (`/auth/login`, `/me`) and
//! hands out presigned upload URLs per artifact. Presigned URLs are
//! capabilities: the binary `PUT` to object storage carries no auth header.
//!
//! Authenticated requests send the token in the `wwauthmanagertoken`
//! header, formatted as `auth <token>`.

pub mod client;
pub mod control_plane;
pub mod error;

pub use client::{upload_endpoint, ApiClient};
pub use control_plane::{ControlPlane, MeResponse, PresignedUpload};
pub use error::ApiError;
