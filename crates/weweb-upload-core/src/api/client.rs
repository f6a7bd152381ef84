//! API client for the WeWeb control plane and presigned object storage.
//!
//! `ApiClient` is the production `ControlPlane`: one shared
//! `reqwest::Client`, one base URL, no retries.

use std::time::Duration;

use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::Credentials;
use crate::models::ObjectType;

use super::{ApiError, ControlPlane, MeResponse, PresignedUpload};

// ============================================================================
// Constants
// ============================================================================

/// Header carrying the session token on control-plane requests
const AUTH_HEADER: &str = "wwauthmanagertoken";

/// Scheme prefix expected inside `AUTH_HEADER`
const AUTH_SCHEME: &str = "auth";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct RequestUploadBody<'a> {
    filename: &'a str,
}

#[derive(Debug, Deserialize)]
struct RequestUploadResponse {
    #[serde(rename = "uploadUrl", default)]
    upload_url: Option<String>,
}

/// Build the presign endpoint for a package.
pub fn upload_endpoint(base_url: &str, object_type: ObjectType, name: &str) -> String {
    format!(
        "{}/{}/{}/request_upload",
        base_url.trim_end_matches('/'),
        object_type.collection(),
        name
    )
}

/// API client for the control plane.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client. `timeout` of `None` keeps the transport default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_value(token: &str) -> String {
        format!("{} {}", AUTH_SCHEME, token)
    }

    fn auth_headers(token: &str) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            AUTH_HEADER,
            header::HeaderValue::from_str(&Self::auth_value(token))?,
        );
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get_me(&self, token: &str) -> Result<MeResponse, ApiError> {
        let url = format!("{}/me", self.base_url);
        debug!(url = %url, "Checking token");

        let response = self
            .client
            .get(&url)
            .headers(Self::auth_headers(token)?)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn post_login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(url = %url, "Sending login request");

        let response = self.client.post(&url).json(credentials).send().await?;
        let response = Self::check_response(response).await?;

        let login: LoginResponse = response.json().await?;
        login
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("login response has no token".to_string()))
    }

    async fn post_request_upload(
        &self,
        endpoint: &str,
        filename: &str,
        token: &str,
    ) -> Result<PresignedUpload, ApiError> {
        debug!(url = %endpoint, filename, "Requesting presigned upload");

        let response = self
            .client
            .post(endpoint)
            .headers(Self::auth_headers(token)?)
            .json(&RequestUploadBody { filename })
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body: RequestUploadResponse = response.json().await?;

        body.upload_url
            .filter(|u| !u.is_empty())
            .map(|upload_url| PresignedUpload { upload_url })
            .ok_or_else(|| {
                ApiError::InvalidResponse("request_upload response has no uploadUrl".to_string())
            })
    }

    async fn put_bytes(&self, upload_url: &str, body: Vec<u8>) -> Result<(), ApiError> {
        debug!(bytes = body.len(), "Uploading to presigned URL");

        let response = self
            .client
            .put(upload_url)
            .header(header::ACCEPT, "*/*")
            .body(body)
            .send()
            .await?;

        Self::check_response(response).await?;
        Ok(())
    }
}

impl ControlPlane for ApiClient {
    fn fetch_me<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<MeResponse, ApiError>> {
        self.get_me(token).boxed()
    }

    fn login<'a>(
        &'a self,
        credentials: &'a Credentials,
    ) -> BoxFuture<'a, Result<String, ApiError>> {
        self.post_login(credentials).boxed()
    }

    fn request_upload<'a>(
        &'a self,
        endpoint: &'a str,
        filename: &'a str,
        token: &'a str,
    ) -> BoxFuture<'a, Result<PresignedUpload, ApiError>> {
        self.post_request_upload(endpoint, filename, token).boxed()
    }

    fn put_object<'a>(
        &'a self,
        upload_url: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), ApiError>> {
        self.put_bytes(upload_url, body).boxed()
    }
}
