//! Authentication module for the publishing session.
//!
//! This module provides:
//! - `PreferenceStore`: the on-disk `{token?}` record, best-effort writes
//! - `is_token_valid`: `GET /me` collapsed to a boolean
//! - `authenticate`: prompt for credentials and log in
//! - `SessionManager`: combines the three into one confirmed token
//!
//! A cached token is re-checked on every run; there is no local expiry.

pub mod authenticator;
pub mod credentials;
pub mod preference;
pub mod session;
pub mod validator;

pub use authenticator::authenticate;
pub use credentials::{CredentialPrompt, Credentials};
pub use preference::{PreferenceStore, UserPreference};
pub use session::{Session, SessionManager, SessionState, TokenOrigin};
pub use validator::is_token_valid;
