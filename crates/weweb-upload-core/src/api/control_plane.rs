//! The `ControlPlane` trait and the response bodies it deals in.
//!
//! `ApiClient` is the production implementation. The session manager and
//! the publisher only see the trait, so both run against recording mocks in
//! tests.

use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::Credentials;

use super::ApiError;

/// Body of `GET /me`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub id: Option<Value>,
}

impl MeResponse {
    /// Whether the response names a user record.
    /// `null`, `""`, `0` and `false` do not count.
    pub fn has_identifier(&self) -> bool {
        match &self.id {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            Some(Value::Bool(b)) => *b,
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

/// A presigned object-storage URL, valid for exactly one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUpload {
    pub upload_url: String,
}

/// Operations the publishing flow needs from the remote side.
pub trait ControlPlane: Send + Sync {
    /// Ask the control plane who the token belongs to.
    fn fetch_me<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<MeResponse, ApiError>>;

    /// Exchange credentials for a fresh token.
    fn login<'a>(&'a self, credentials: &'a Credentials) -> BoxFuture<'a, Result<String, ApiError>>;

    /// Request a presigned upload URL for `filename` at `endpoint`.
    fn request_upload<'a>(
        &'a self,
        endpoint: &'a str,
        filename: &'a str,
        token: &'a str,
    ) -> BoxFuture<'a, Result<PresignedUpload, ApiError>>;

    /// `PUT` raw bytes to a presigned URL. No authorization header is sent.
    fn put_object<'a>(
        &'a self,
        upload_url: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), ApiError>>;
}
