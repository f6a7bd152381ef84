//! Recording test doubles for `ControlPlane` and `CredentialPrompt`.

use std::collections::HashSet;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use crate::api::{ApiError, ControlPlane, MeResponse, PresignedUpload};
use crate::auth::{CredentialPrompt, Credentials};

/// One request seen by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Me(String),
    Login(String),
    RequestUpload {
        endpoint: String,
        filename: String,
        token: String,
    },
    Put {
        url: String,
        body: Vec<u8>,
    },
}

/// Control plane with scripted answers.
///
/// By default every token is rejected, every login fails and every
/// upload step succeeds.
#[derive(Default)]
pub struct MockControlPlane {
    valid_tokens: HashSet<String>,
    anonymous_me: bool,
    unreachable_me: bool,
    login_token: Option<String>,
    failing_requests: HashSet<String>,
    failing_puts: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl MockControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_valid_token(mut self, token: &str) -> Self {
        self.valid_tokens.insert(token.to_string());
        self
    }

    /// `/me` answers 200 without an id
    pub fn with_anonymous_me(mut self) -> Self {
        self.anonymous_me = true;
        self
    }

    /// `/me` fails at the transport level
    pub fn with_unreachable_me(mut self) -> Self {
        self.unreachable_me = true;
        self
    }

    pub fn with_login_token(mut self, token: &str) -> Self {
        self.login_token = Some(token.to_string());
        self
    }

    pub fn failing_request_for(mut self, filename: &str) -> Self {
        self.failing_requests.insert(filename.to_string());
        self
    }

    pub fn failing_put_for(mut self, filename: &str) -> Self {
        self.failing_puts.insert(filename.to_string());
        self
    }

    pub fn upload_url_for(filename: &str) -> String {
        format!("https://storage.test/{}?signature=abc", filename)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn me_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Me(_)))
            .count()
    }

    pub fn login_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Login(_)))
            .count()
    }

    pub fn request_calls(&self) -> Vec<(String, String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::RequestUpload {
                    endpoint,
                    filename,
                    token,
                } => Some((endpoint, filename, token)),
                _ => None,
            })
            .collect()
    }

    pub fn put_calls(&self) -> Vec<(String, Vec<u8>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Put { url, body } => Some((url, body)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ControlPlane for MockControlPlane {
    fn fetch_me<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<MeResponse, ApiError>> {
        self.record(Call::Me(token.to_string()));
        async move {
            if self.unreachable_me {
                return Err(ApiError::Status {
                    status: 503,
                    body: "connection refused".to_string(),
                });
            }
            if !self.valid_tokens.contains(token) {
                return Err(ApiError::Unauthorized);
            }
            let id = if self.anonymous_me {
                None
            } else {
                Some(Value::from("user-1"))
            };
            Ok(MeResponse { id })
        }
        .boxed()
    }

    fn login<'a>(
        &'a self,
        credentials: &'a Credentials,
    ) -> BoxFuture<'a, Result<String, ApiError>> {
        self.record(Call::Login(credentials.email.clone()));
        async move { self.login_token.clone().ok_or(ApiError::Unauthorized) }.boxed()
    }

    fn request_upload<'a>(
        &'a self,
        endpoint: &'a str,
        filename: &'a str,
        token: &'a str,
    ) -> BoxFuture<'a, Result<PresignedUpload, ApiError>> {
        self.record(Call::RequestUpload {
            endpoint: endpoint.to_string(),
            filename: filename.to_string(),
            token: token.to_string(),
        });
        async move {
            if self.failing_requests.contains(filename) {
                return Err(ApiError::Status {
                    status: 500,
                    body: "presign failed".to_string(),
                });
            }
            Ok(PresignedUpload {
                upload_url: Self::upload_url_for(filename),
            })
        }
        .boxed()
    }

    fn put_object<'a>(
        &'a self,
        upload_url: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), ApiError>> {
        self.record(Call::Put {
            url: upload_url.to_string(),
            body,
        });
        async move {
            let failing = self
                .failing_puts
                .iter()
                .any(|f| upload_url == Self::upload_url_for(f));
            if failing {
                return Err(ApiError::Status {
                    status: 403,
                    body: "signature expired".to_string(),
                });
            }
            Ok(())
        }
        .boxed()
    }
}

/// Prompt that hands back fixed credentials, or fails like a closed stdin.
pub struct MockPrompt {
    answer: Option<Credentials>,
    asked: AtomicUsize,
}

impl MockPrompt {
    pub fn answering(email: &str, password: &str) -> Self {
        Self {
            answer: Some(Credentials::new(email, password)),
            asked: AtomicUsize::new(0),
        }
    }

    pub fn closed() -> Self {
        Self {
            answer: None,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl CredentialPrompt for MockPrompt {
    fn prompt_credentials(&self) -> io::Result<Credentials> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
    }
}
