use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Cached user state, persisted between runs.
///
/// Keys other than `token` are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl UserPreference {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            other: Map::new(),
        }
    }

    /// The cached token, ignoring an empty string
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }
}

/// JSON blob store for `UserPreference`. Never fails outward.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record. Missing or corrupt files give an empty record.
    pub fn load(&self) -> UserPreference {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No preference file");
                return UserPreference::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(pref) => pref,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt preference file");
                UserPreference::default()
            }
        }
    }

    /// Best-effort save. Returns `false` if the record could not be written.
    pub fn save(&self, pref: &UserPreference) -> bool {
        match self.write(pref) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Preference file saved");
                true
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to save preference file");
                false
            }
        }
    }

    fn write(&self, pref: &UserPreference) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create preference directory")?;
            }
        }

        let contents = serde_json::to_string(pref)?;

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.tmp_path();
        std::fs::write(&tmp, contents).context("Failed to write preference file")?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e).context("Failed to replace preference file");
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
