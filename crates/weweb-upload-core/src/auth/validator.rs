use tracing::debug;

use crate::api::ControlPlane;

/// Ask the control plane whether `token` still identifies a user.
///
/// Never errors: rejected, unreachable and malformed all come back `false`,
/// which sends the caller to log in again.
pub async fn is_token_valid(api: &dyn ControlPlane, token: &str) -> bool {
    match api.fetch_me(token).await {
        Ok(me) if me.has_identifier() => true,
        Ok(_) => {
            debug!("Token check returned no user id");
            false
        }
        Err(e) => {
            debug!(error = %e, "Token check failed");
            false
        }
    }
}
