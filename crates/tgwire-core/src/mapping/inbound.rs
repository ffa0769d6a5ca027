//! Inbound mapping: decoded response payloads → typed entities.
//!
//! A single generic routine, [`convert_with`], drives every entity:
//!
//! 1. Already-typed input is returned unchanged.
//! 2. Each wire key is renamed through the entity's [`Entity::RENAMES`]
//!    table; keys mapped to [`Rename::Drop`](crate::Rename::Drop) are discarded.
//! 3. `extra` entries are merged in, overriding same-named keys.
//! 4. [`Entity::build`] pulls the renamed fields out of a [`FieldSet`],
//!    recursing into nested entities through the same routine.
//!
//! Self-referential fields (a message replying to a message) need nothing
//! special: the nested conversion is resolved lazily when the field is read.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::trace;

use crate::entity::Entity;
use crate::error::{MappingError, MappingResult, shape_of};

/// Input to the inbound mapper: either a raw payload or an already-typed entity.
#[derive(Debug, Clone)]
pub enum Raw<T> {
    /// An entity that needs no conversion.
    Typed(T),
    /// A decoded payload.
    Value(Value),
}

impl<T> From<Value> for Raw<T> {
    fn from(value: Value) -> Self {
        Raw::Value(value)
    }
}

/// Converts a single payload into `T`.
pub fn convert<T: Entity, R: Into<Raw<T>>>(raw: R) -> MappingResult<T> {
    convert_with(raw, Map::new())
}

/// Converts a single payload into `T`, merging `extra` over the renamed fields.
pub fn convert_with<T: Entity, R: Into<Raw<T>>>(
    raw: R,
    extra: Map<String, Value>,
) -> MappingResult<T> {
    let object = match raw.into() {
        Raw::Typed(entity) => return Ok(entity),
        Raw::Value(Value::Object(object)) => object,
        Raw::Value(other) => {
            return Err(MappingError::Expected {
                expected: "mapping",
                found: shape_of(&other),
            });
        }
    };

    let mut renamed = Map::with_capacity(object.len() + extra.len());
    for (key, value) in object {
        if let Some(local) = T::local_name(&key) {
            renamed.insert(local.to_string(), value);
        }
    }
    renamed.extend(extra);

    let mut fields = FieldSet::new(T::NAME, renamed);
    let entity = T::build(&mut fields)?;

    if !fields.is_empty() {
        trace!(entity = T::NAME, ignored = ?fields.keys(), "Ignoring unrecognised fields");
    }

    Ok(entity)
}

/// Converts an ordered sequence of payloads, preserving order.
pub fn convert_many<T: Entity>(raw: Value) -> MappingResult<Vec<T>> {
    match raw {
        Value::Array(items) => items.into_iter().map(convert).collect(),
        other => Err(MappingError::Expected {
            expected: "sequence",
            found: shape_of(&other),
        }),
    }
}

// ============================================================================
// FieldSet
// ============================================================================

/// Renamed fields of a payload awaiting construction of an entity.
///
/// Each accessor removes the field it reads. A null value is treated exactly
/// like an absent one.
#[derive(Debug)]
pub struct FieldSet {
    entity: &'static str,
    fields: Map<String, Value>,
}

impl FieldSet {
    pub(crate) fn new(entity: &'static str, fields: Map<String, Value>) -> Self {
        Self { entity, fields }
    }

    /// Returns `true` if every field has been consumed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the keys that have not been consumed yet.
    pub fn keys(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Takes every remaining field.
    pub fn take_all(&mut self) -> Map<String, Value> {
        std::mem::take(&mut self.fields)
    }

    /// Takes a raw field value.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name).filter(|v| !v.is_null())
    }

    /// Reads a required scalar field.
    pub fn required<T: DeserializeOwned>(&mut self, name: &str) -> MappingResult<T> {
        let value = self.take_required(name)?;
        self.decode(name, value)
    }

    /// Reads an optional scalar field.
    pub fn optional<T: DeserializeOwned>(&mut self, name: &str) -> MappingResult<Option<T>> {
        self.take(name).map(|v| self.decode(name, v)).transpose()
    }

    /// Reads a required nested entity.
    pub fn entity<E: Entity>(&mut self, name: &str) -> MappingResult<E> {
        convert(self.take_required(name)?)
    }

    /// Reads an optional nested entity.
    pub fn optional_entity<E: Entity>(&mut self, name: &str) -> MappingResult<Option<E>> {
        self.take(name).map(convert).transpose()
    }

    /// Reads an ordered sequence of nested entities; absent means empty.
    pub fn entities<E: Entity>(&mut self, name: &str) -> MappingResult<Vec<E>> {
        self.take(name).map_or_else(|| Ok(Vec::new()), convert_many)
    }

    /// Reads a required epoch-seconds field as a calendar timestamp.
    pub fn timestamp(&mut self, name: &str) -> MappingResult<DateTime<Utc>> {
        let secs = self.required::<i64>(name)?;
        self.to_datetime(name, secs)
    }

    /// Reads an optional epoch-seconds field as a calendar timestamp.
    pub fn optional_timestamp(&mut self, name: &str) -> MappingResult<Option<DateTime<Utc>>> {
        self.optional::<i64>(name)?
            .map(|secs| self.to_datetime(name, secs))
            .transpose()
    }

    fn take_required(&mut self, name: &str) -> MappingResult<Value> {
        self.take(name)
            .ok_or_else(|| MappingError::missing(self.entity, name))
    }

    fn decode<T: DeserializeOwned>(&self, name: &str, value: Value) -> MappingResult<T> {
        serde_json::from_value(value).map_err(|e| MappingError::invalid(self.entity, name, e))
    }

    fn to_datetime(&self, name: &str, secs: i64) -> MappingResult<DateTime<Utc>> {
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| MappingError::invalid(self.entity, name, "timestamp out of range"))
    }
}

// ============================================================================
// Tests
// ============================================================================
