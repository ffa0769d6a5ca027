//! Answering an incoming webhook request with a method call.
//!
//! The service lets a webhook handler reply to an update by returning a
//! method call as the HTTP response body, saving a round trip. The body is
//! the prepared payload plus a `method` field. File uploads cannot travel
//! this way.

use serde_json::Value;
use tracing::debug;

use tgwire_core::error::shape_of;
use tgwire_core::{MappingError, PrepareOptions, prepare};

use crate::error::{ClientError, ClientResult};
use crate::method::Method;

/// Builds the webhook response body for `method`.
///
/// # Errors
///
/// Returns [`ClientError::AttachmentInWebhookResponse`] if the method uploads
/// a file, or a mapping error if its parameters cannot be prepared.
pub fn webhook_reply<M: Method>(method: &M, options: &PrepareOptions) -> ClientResult<Value> {
    if method.attachment().is_some() {
        return Err(ClientError::AttachmentInWebhookResponse { method: M::NAME });
    }

    let mut body = match prepare(&method.params(), options)? {
        Value::Object(body) => body,
        other => {
            return Err(MappingError::Expected {
                expected: "mapping",
                found: shape_of(&other),
            }
            .into());
        }
    };
    body.insert("method".to_string(), Value::from(M::NAME));

    debug!(method = M::NAME, "Prepared webhook response");
    Ok(Value::Object(body))
}
