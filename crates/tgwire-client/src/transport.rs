//! The transport contract.
//!
//! The client never talks HTTP itself. Every call is handed to a
//! [`Transport`] as an [`ApiRequest`]: the HTTP verb, the target URL, the
//! prepared JSON payload and an optional file upload. The transport returns
//! the decoded response body, which the client then unwraps as an
//! [`Envelope`](crate::Envelope).
//!
//! A JSON body is expected for requests without an attachment. Requests with
//! one are sent as `multipart/form-data`, each payload entry becoming a form
//! field (non-string values JSON-encoded) next to the file part.
//!
//! Pooling, retries and backoff are the transport's business.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientResult;

/// HTTP verb of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An in-memory file upload.
#[derive(Clone, PartialEq, Eq)]
pub struct InputFile {
    /// File name reported to the service.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A file upload bound to its form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Form field carrying the file (`document`, `certificate`, ...).
    pub field: &'static str,
    pub file: InputFile,
}

/// A single remote call, ready to be sent.
#[derive(Clone)]
pub struct ApiRequest {
    /// Method name, e.g. `sendMessage`.
    pub method: &'static str,
    pub http_method: HttpMethod,
    /// Full URL, including the access token.
    pub url: String,
    /// Prepared payload; always a JSON mapping.
    pub payload: Value,
    pub attachment: Option<Attachment>,
    /// How long the transport may wait for the response.
    pub timeout: Duration,
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The URL carries the access token.
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("http_method", &self.http_method)
            .field("payload", &self.payload)
            .field("attachment", &self.attachment)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Delivers requests to the remote service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request and returns the decoded response body.
    ///
    /// Non-2xx responses carrying a JSON body must still return that body;
    /// the client reads the failure from the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`](crate::ClientError::Transport) if
    /// the request could not be delivered or the body is not JSON.
    async fn call(&self, request: ApiRequest) -> ClientResult<Value>;

    /// Fetches raw bytes, used for file downloads.
    async fn download(&self, url: &str, timeout: Duration) -> ClientResult<Vec<u8>>;
}
