use tracing::{info, warn};

use crate::api::ControlPlane;
use crate::error::PublishError;

use super::CredentialPrompt;

/// Prompt for credentials and trade them for a fresh token.
///
/// The cause of a failed login is logged but not surfaced: the caller only
/// learns `AuthenticationFailed`.
pub async fn authenticate(
    api: &dyn ControlPlane,
    prompt: &dyn CredentialPrompt,
) -> Result<String, PublishError> {
    let credentials = prompt.prompt_credentials()?;
    if !credentials.is_complete() {
        return Err(PublishError::AuthenticationFailed);
    }

    match api.login(&credentials).await {
        Ok(token) if !token.is_empty() => {
            info!(email = %credentials.email, "Login succeeded");
            Ok(token)
        }
        Ok(_) => {
            warn!("Login returned an empty token");
            Err(PublishError::AuthenticationFailed)
        }
        Err(e) => {
            warn!(error = %e, "Login failed");
            Err(PublishError::AuthenticationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, MockControlPlane, MockPrompt};

    #[tokio::test]
    async fn test_login_success() {
        let api = MockControlPlane::new().with_login_token("FRESH");
        let prompt = MockPrompt::answering("dev@example.com", "pw");

        let token = authenticate(&api, &prompt).await.unwrap();
        assert_eq!(token, "FRESH");
        assert_eq!(prompt.times_asked(), 1);
        assert_eq!(api.calls(), vec![Call::Login("dev@example.com".to_string())]);
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let api = MockControlPlane::new();
        let prompt = MockPrompt::answering("dev@example.com", "wrong");

        let err = authenticate(&api, &prompt).await.unwrap_err();
        assert!(matches!(err, PublishError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_prompt_failure_skips_login() {
        let api = MockControlPlane::new().with_login_token("FRESH");
        let prompt = MockPrompt::closed();

        let err = authenticate(&api, &prompt).await.unwrap_err();
        assert!(matches!(err, PublishError::Prompt(_)));
        assert!(api.calls().is_empty());
    }
}
