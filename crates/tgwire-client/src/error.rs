//! Error types for the client.

use serde::Deserialize;
use thiserror::Error;

use tgwire_core::{Entity, FieldSet, MappingError, MappingResult, Param, Rename};

use crate::config::ConfigError;

// =============================================================================
// Remote Errors
// =============================================================================

/// Extra information attached to some failed calls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ResponseParameters {
    /// The group was migrated to a supergroup with this identifier.
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait before repeating the request.
    pub retry_after: Option<i64>,
}

/// A failed call as reported by the remote service (`ok: false`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API error ({error_code}): {description}")]
pub struct RemoteError {
    /// Human readable description.
    pub description: String,
    /// Error code; mirrors the HTTP status.
    pub error_code: i64,
    pub parameters: Option<ResponseParameters>,
}

impl RemoteError {
    /// Seconds the service asked us to back off, if any.
    pub fn retry_after(&self) -> Option<i64> {
        self.parameters.as_ref().and_then(|p| p.retry_after)
    }
}

impl Entity for RemoteError {
    const NAME: &'static str = "Error";
    const RENAMES: &'static [(&'static str, Rename)] = &[("ok", Rename::Drop)];

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            description: fields.required("description")?,
            error_code: fields.required("error_code")?,
            parameters: fields.optional("parameters")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        let parameters = self.parameters.as_ref().map(|p| {
            Param::from_iter([
                ("migrate_to_chat_id", Param::from(p.migrate_to_chat_id)),
                ("retry_after", Param::from(p.retry_after)),
            ])
        });
        vec![
            ("description", self.description.clone().into()),
            ("error_code", self.error_code.into()),
            ("parameters", parameters.into()),
        ]
    }
}

// =============================================================================
// Client Errors
// =============================================================================

/// Errors returned by [`BotClient`](crate::BotClient) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote service rejected the call.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A payload did not match the entity model.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The transport failed to deliver the request.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response body could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A method uploading a file was turned into a webhook response.
    #[error("{method} uploads a file and cannot be sent as a webhook response")]
    AttachmentInWebhookResponse {
        /// The method name.
        method: &'static str,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Creates a transport error.
    pub fn transport(message: impl ToString) -> Self {
        Self::Transport(message.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

