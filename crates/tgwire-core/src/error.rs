//! Error types for the mapping engine.
//!
//! Every failure raised while converting between wire payloads and typed
//! entities is a [`MappingError`]. These indicate a schema mismatch rather
//! than a transient condition, so callers should never retry them.

use thiserror::Error;

// =============================================================================
// Mapping Errors
// =============================================================================

/// Local contract violations raised by the inbound and outbound mappers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    /// A required field was absent (or null) in an inbound payload.
    #[error("{entity}: missing required field `{field}`")]
    MissingField {
        /// The entity being constructed.
        entity: &'static str,
        /// The local field name.
        field: String,
    },

    /// A field was present but could not be converted to its declared type.
    #[error("{entity}: invalid field `{field}`: {reason}")]
    InvalidField {
        /// The entity being constructed.
        entity: &'static str,
        /// The local field name.
        field: String,
        /// Reason for failure.
        reason: String,
    },

    /// The payload had the wrong shape (e.g. a sequence where a mapping was expected).
    #[error("expected {expected}, found {found}")]
    Expected {
        /// The expected shape.
        expected: &'static str,
        /// The shape actually received.
        found: &'static str,
    },

    /// Outbound preparation hit the configured recursion ceiling.
    #[error("maximum preparation depth {depth} exceeded")]
    DepthExceeded {
        /// The depth at which preparation stopped.
        depth: usize,
    },

    /// No markup variant accepts the payload's key set.
    #[error("unknown markup shape with keys {keys:?}")]
    UnknownMarkup {
        /// Sorted keys of the offending payload.
        keys: Vec<String>,
    },

    /// An update carried none of the known payload fields.
    #[error("update {id} carries no known payload")]
    UnknownUpdateKind {
        /// The update identifier.
        id: i64,
    },

    /// A keyboard row was built from no buttons.
    #[error("keyboard row must contain at least one button")]
    EmptyRow,

    /// A keyboard grid was requested with zero buttons per row.
    #[error("keyboard rows must hold at least one button each")]
    ZeroRowWidth,
}

impl MappingError {
    /// Creates a missing field error.
    pub fn missing(entity: &'static str, field: impl Into<String>) -> Self {
        Self::MissingField {
            entity,
            field: field.into(),
        }
    }

    /// Creates an invalid field error.
    pub fn invalid(entity: &'static str, field: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidField {
            entity,
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

/// Returns the shape name of a JSON value for error reporting.
pub fn shape_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;
