use std::fmt;
use std::io;

use serde::Serialize;

/// Email and password for one login exchange. Never persisted.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Interactive source of credentials.
///
/// Implementations re-ask until both fields are non-empty; the terminal
/// front end lives in the CLI crate.
pub trait CredentialPrompt: Send + Sync {
    fn prompt_credentials(&self) -> io::Result<Credentials>;
}
