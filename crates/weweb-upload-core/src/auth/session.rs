use tracing::{debug, info};

use crate::api::ControlPlane;
use crate::error::PublishError;

use super::{authenticate, is_token_valid, CredentialPrompt, PreferenceStore, UserPreference};

/// Where the session stands on its way to a usable token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing cached
    NoToken,
    /// Cached token not yet checked this run
    Unvalidated,
    /// Token confirmed this run
    Valid,
    /// Cached token rejected; cleared in memory
    Invalid,
}

impl SessionState {
    pub fn initial(preference: &UserPreference) -> Self {
        if preference.token().is_some() {
            SessionState::Unvalidated
        } else {
            SessionState::NoToken
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    Cached,
    Login,
}

/// A token confirmed valid during this run, with the record to persist.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub preference: UserPreference,
    pub origin: TokenOrigin,
}

/// Turns a cached preference into a guaranteed-valid token.
pub struct SessionManager<'a> {
    api: &'a dyn ControlPlane,
    prompt: &'a dyn CredentialPrompt,
}

impl<'a> SessionManager<'a> {
    pub fn new(api: &'a dyn ControlPlane, prompt: &'a dyn CredentialPrompt) -> Self {
        Self { api, prompt }
    }

    /// Validate the cached token, logging in again when there is none or it
    /// was rejected. Takes the loaded record and hands back the updated one;
    /// nothing is written to disk here.
    pub async fn establish(&self, mut preference: UserPreference) -> Result<Session, PublishError> {
        let mut state = SessionState::initial(&preference);
        let mut origin = TokenOrigin::Cached;

        while state != SessionState::Valid {
            debug!(?state, "Session step");
            state = match state {
                SessionState::Unvalidated => {
                    let valid = match preference.token() {
                        Some(token) => is_token_valid(self.api, token).await,
                        None => false,
                    };
                    if valid {
                        info!("Cached token accepted");
                        SessionState::Valid
                    } else {
                        info!("Cached token rejected");
                        preference.clear_token();
                        SessionState::Invalid
                    }
                }
                SessionState::NoToken | SessionState::Invalid => {
                    let token = authenticate(self.api, self.prompt).await?;
                    preference.set_token(token);
                    origin = TokenOrigin::Login;
                    SessionState::Valid
                }
                SessionState::Valid => SessionState::Valid,
            };
        }

        let token = preference
            .token()
            .map(str::to_owned)
            .ok_or(PublishError::AuthenticationFailed)?;

        Ok(Session {
            token,
            preference,
            origin,
        })
    }

    /// Load, establish, then persist the record before returning.
    ///
    /// The write is best-effort: a failed save is logged and the run goes on.
    pub async fn open(&self, store: &PreferenceStore) -> Result<Session, PublishError> {
        let session = self.establish(store.load()).await?;
        if !store.save(&session.preference) {
            debug!("Continuing without a cached token");
        }
        Ok(session)
    }
}
