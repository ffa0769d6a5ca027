//! The response envelope every remote call is wrapped in.
//!
//! ```text
//! {"ok": true,  "result": ...}
//! {"ok": false, "description": "...", "error_code": 400, "parameters": {...}}
//! ```

use serde_json::{Map, Value};
use tracing::warn;

use tgwire_core::error::shape_of;
use tgwire_core::{MappingError, convert};

use crate::error::{ClientResult, RemoteError};

/// A decoded response body.
#[derive(Debug, Clone)]
pub struct Envelope {
    ok: bool,
    body: Map<String, Value>,
}

impl Envelope {
    /// Wraps a decoded response body.
    ///
    /// # Errors
    ///
    /// Fails if the body is not a mapping or carries no boolean `ok`.
    pub fn from_value(body: Value) -> ClientResult<Self> {
        let body = match body {
            Value::Object(body) => body,
            other => {
                return Err(MappingError::Expected {
                    expected: "mapping",
                    found: shape_of(&other),
                }
                .into());
            }
        };
        let ok = body
            .get("ok")
            .and_then(Value::as_bool)
            .ok_or_else(|| MappingError::missing("Envelope", "ok"))?;
        Ok(Self { ok, body })
    }

    /// Checks if the call succeeded.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns the call's result, or the remote failure as an error.
    pub fn into_result(mut self) -> ClientResult<Value> {
        if self.ok {
            return Ok(self.body.remove("result").unwrap_or(Value::Null));
        }
        let error: RemoteError = convert(Value::Object(self.body))?;
        warn!(
            error_code = error.error_code,
            description = %error.description,
            "Remote call failed"
        );
        Err(error.into())
    }
}
