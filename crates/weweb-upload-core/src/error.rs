//! Terminal failures of a publishing run.

use thiserror::Error;

use crate::api::ApiError;

/// Every way a run can stop. Token validation failures never show up here:
/// they are recovered by logging in again.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("{0}")]
    ConfigInvalid(String),

    #[error("Wrong email / password")]
    AuthenticationFailed,

    #[error("could not read credentials: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("unknown object type \"{0}\".")]
    UnknownObjectType(String),

    #[error("{path} not found. Please make sure you ran 'yarn build' before")]
    ArtifactNotFound { path: String },

    #[error("upload request for {filename} failed: {source}")]
    UploadRequestFailed {
        filename: String,
        #[source]
        source: ApiError,
    },

    #[error("upload of {filename} failed: {source}")]
    ArtifactUploadFailed {
        filename: String,
        #[source]
        source: ApiError,
    },
}
