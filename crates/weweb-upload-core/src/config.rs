//! Runtime configuration.
//!
//! Resolved once at startup from the environment (the CLI loads `.env`
//! first). The preference file defaults to
//! `<preferences dir>/weweb_upload/user_pref.json`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Directory name used under the per-user preferences directory
const APP_DIR: &str = "weweb_upload";

/// Preference file name
const PREF_FILE: &str = "user_pref.json";

/// Control plane used when `WEWEB_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

pub const ENV_API_URL: &str = "WEWEB_API_URL";
pub const ENV_PREF_PATH: &str = "WEWEB_UPLOAD_PREF_PATH";
pub const ENV_PROJECT_DIR: &str = "WEWEB_PROJECT_DIR";
pub const ENV_REQUEST_TIMEOUT: &str = "WEWEB_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub preference_path: PathBuf,
    pub project_dir: PathBuf,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get(ENV_API_URL)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let preference_path = get(ENV_PREF_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_preference_path);

        let project_dir = get(ENV_PROJECT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let request_timeout = match get(ENV_REQUEST_TIMEOUT) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!("{} must be a whole number of seconds", ENV_REQUEST_TIMEOUT)
                })?;
                if secs == 0 {
                    anyhow::bail!("{} must be greater than zero", ENV_REQUEST_TIMEOUT);
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_url,
            preference_path,
            project_dir,
            request_timeout,
        })
    }

    fn default_preference_path() -> PathBuf {
        dirs::preference_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(PREF_FILE)
    }
}
