use std::path::{Path, PathBuf};

/// One build output and where the build leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Name sent to the control plane when requesting the upload
    pub filename: &'static str,
    /// Location relative to the project directory
    pub relative_path: &'static str,
}

/// Artifacts published on every run, in upload order.
pub const BUILD_ARTIFACTS: &[ArtifactSpec] = &[
    ArtifactSpec {
        filename: "front.js",
        relative_path: "dist/front.js",
    },
    ArtifactSpec {
        filename: "manager.js",
        relative_path: "dist/manager.js",
    },
];

impl ArtifactSpec {
    pub fn path_in(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(self.relative_path)
    }

    /// Path as shown to the operator, e.g. `./dist/front.js`
    pub fn display_path(&self) -> String {
        format!("./{}", self.relative_path)
    }
}
