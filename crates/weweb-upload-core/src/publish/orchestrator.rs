use std::path::Path;

use tracing::{debug, info, warn};

use crate::api::{upload_endpoint, ControlPlane};
use crate::error::PublishError;
use crate::models::{ArtifactSpec, PackageDescriptor};

/// Progress notifications, emitted as each step completes.
///
/// `Started` and `LoggedIn` come from `run`; `Publisher` emits the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishEvent {
    Started { kind: String, name: String },
    LoggedIn,
    Uploaded { filename: &'static str, bytes: usize },
    Completed { artifacts: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedArtifact {
    pub filename: &'static str,
    pub bytes: usize,
}

/// Artifacts uploaded by a successful run, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub uploaded: Vec<UploadedArtifact>,
}

impl PublishReport {
    pub fn total_bytes(&self) -> usize {
        self.uploaded.iter().map(|a| a.bytes).sum()
    }
}

pub struct Publisher<'a> {
    api: &'a dyn ControlPlane,
    base_url: &'a str,
}

impl<'a> Publisher<'a> {
    pub fn new(api: &'a dyn ControlPlane, base_url: &'a str) -> Self {
        Self { api, base_url }
    }

    /// Publish `artifacts` for `descriptor` using a token already confirmed
    /// valid this run.
    pub async fn publish<F>(
        &self,
        descriptor: &PackageDescriptor,
        token: &str,
        project_dir: &Path,
        artifacts: &[ArtifactSpec],
        mut on_event: F,
    ) -> Result<PublishReport, PublishError>
    where
        F: FnMut(&PublishEvent),
    {
        let object_type = descriptor.object_type()?;
        let endpoint = upload_endpoint(self.base_url, object_type, &descriptor.name);
        info!(%object_type, name = %descriptor.name, "Publishing package");

        let mut report = PublishReport::default();

        for spec in artifacts {
            let uploaded = self.upload_one(&endpoint, token, project_dir, spec).await?;
            on_event(&PublishEvent::Uploaded {
                filename: uploaded.filename,
                bytes: uploaded.bytes,
            });
            report.uploaded.push(uploaded);
        }

        on_event(&PublishEvent::Completed {
            artifacts: report.uploaded.len(),
        });
        info!(
            artifacts = report.uploaded.len(),
            bytes = report.total_bytes(),
            "Upload complete"
        );
        Ok(report)
    }

    async fn upload_one(
        &self,
        endpoint: &str,
        token: &str,
        project_dir: &Path,
        spec: &ArtifactSpec,
    ) -> Result<UploadedArtifact, PublishError> {
        let path = spec.path_in(project_dir);
        let body = tokio::fs::read(&path).await.map_err(|e| {
            warn!(path = %path.display(), error = %e, "Artifact missing");
            PublishError::ArtifactNotFound {
                path: spec.display_path(),
            }
        })?;
        let bytes = body.len();
        debug!(filename = spec.filename, bytes, "Artifact read");

        let presigned = self
            .api
            .request_upload(endpoint, spec.filename, token)
            .await
            .map_err(|source| PublishError::UploadRequestFailed {
                filename: spec.filename.to_string(),
                source,
            })?;

        self.api
            .put_object(&presigned.upload_url, body)
            .await
            .map_err(|source| PublishError::ArtifactUploadFailed {
                filename: spec.filename.to_string(),
                source,
            })?;

        info!(filename = spec.filename, bytes, "Artifact uploaded");
        Ok(UploadedArtifact {
            filename: spec.filename,
            bytes,
        })
    }
}
