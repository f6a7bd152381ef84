use std::path::Path;

use tracing::info;

use crate::api::ControlPlane;
use crate::auth::{CredentialPrompt, PreferenceStore, SessionManager, TokenOrigin};
use crate::error::PublishError;
use crate::models::{ArtifactSpec, PackageDescriptor};

use super::{PublishEvent, PublishReport, Publisher};

/// One full publishing run: descriptor, session, uploads.
///
/// The descriptor is checked completely, object type included, before the
/// session touches the network.
pub async fn run<F>(
    api: &dyn ControlPlane,
    prompt: &dyn CredentialPrompt,
    store: &PreferenceStore,
    base_url: &str,
    project_dir: &Path,
    artifacts: &[ArtifactSpec],
    mut on_event: F,
) -> Result<PublishReport, PublishError>
where
    F: FnMut(&PublishEvent),
{
    let descriptor = PackageDescriptor::load(project_dir)?;
    on_event(&PublishEvent::Started {
        kind: descriptor.kind.clone(),
        name: descriptor.name.clone(),
    });
    descriptor.object_type()?;

    let session = SessionManager::new(api, prompt).open(store).await?;
    if session.origin == TokenOrigin::Login {
        on_event(&PublishEvent::LoggedIn);
    }
    info!(origin = ?session.origin, "Session ready");

    Publisher::new(api, base_url)
        .publish(&descriptor, &session.token, project_dir, artifacts, on_event)
        .await
}
