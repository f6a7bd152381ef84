use thiserror::Error;

/// Failures talking to the control plane or object storage.
///
/// Callers only ever turn these into a `PublishError` or a `false`, so
/// statuses other than 401 are kept as data instead of variants.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token may be expired")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Longest response body kept in an error message
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Cut `body` to `MAX_ERROR_BODY_LENGTH` bytes on a char boundary
fn clip_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes)", &body[..end], body.len())
}

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }
        ApiError::Status {
            status: status.as_u16(),
            body: clip_body(body),
        }
    }
}
