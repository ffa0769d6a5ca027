//! The outbound value tree.
//!
//! [`Param`] is what callers hand to the outbound mapper: a loosely shaped
//! tree mixing scalars, wire enumerations, typed entities and nested
//! containers. [`prepare`](crate::mapping::prepare) reduces it to a plain
//! [`serde_json::Value`].
//!
//! # Example
//!
//! ```rust,ignore
//! use tgwire_core::{ChatAction, Param};
//!
//! let params: Param = [
//!     ("chat_id", Param::from(chat)),
//!     ("action", ChatAction::Typing.into()),
//! ]
//! .into_iter()
//! .collect();
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::entity::EntityValue;

// ============================================================================
// Wire enumerations
// ============================================================================

/// A closed enumeration with a fixed string representation on the wire.
pub trait WireEnum: Copy + 'static {
    /// The enumeration's type name.
    const TYPE_NAME: &'static str;
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// The value sent to (and received from) the remote service.
    fn wire_value(self) -> &'static str;

    /// The local variant name.
    fn variant_name(self) -> &'static str;

    /// Looks up the variant carrying the given wire value.
    fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.wire_value() == value)
    }
}

/// A type-erased wire enumeration leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// Name of the enumeration type.
    pub type_name: &'static str,
    /// Local variant name.
    pub variant: &'static str,
    /// Wire value.
    pub wire: &'static str,
}

impl EnumValue {
    /// Erases a concrete enumeration value.
    pub fn of<E: WireEnum>(value: E) -> Self {
        Self {
            type_name: E::TYPE_NAME,
            variant: value.variant_name(),
            wire: value.wire_value(),
        }
    }
}

// ============================================================================
// Param
// ============================================================================

/// A typed value awaiting outbound preparation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Param {
    /// Absent value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
    /// Wire enumeration.
    Enum(EnumValue),
    /// Typed entity.
    Entity(EntityValue),
    /// Ordered sequence.
    Seq(Vec<Param>),
    /// Mapping keyed by field name.
    Map(BTreeMap<String, Param>),
}

impl Param {
    /// Returns `true` for [`Param::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Param::Null)
    }

    /// Returns the entries if this is a mapping.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Param>> {
        match self {
            Param::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Converts the value to JSON without any outbound transformation.
    ///
    /// Entities become their full wire object, enumerations their local
    /// variant name and nulls are retained everywhere. This is the untouched
    /// form of the value: the depth guard returns it when it stops early, and
    /// outbound preparation with `unwrap_enums` disabled falls back to it for
    /// enumeration leaves. Use [`prepare`](crate::mapping::prepare) for
    /// anything sent to the remote service.
    pub fn to_plain_json(&self) -> Value {
        match self {
            Param::Null => Value::Null,
            Param::Bool(b) => Value::Bool(*b),
            Param::Int(i) => Value::Number((*i).into()),
            Param::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Param::Str(s) => Value::String(s.clone()),
            Param::Enum(e) => Value::String(e.variant.to_string()),
            Param::Entity(entity) => Value::Object(
                entity
                    .wire_fields()
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_plain_json()))
                    .collect(),
            ),
            Param::Seq(items) => Value::Array(items.iter().map(Param::to_plain_json).collect()),
            Param::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_plain_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

// ============================================================================
// From implementations
// ============================================================================

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int(i64::from(value))
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Int(i64::from(value))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Str(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Str(value)
    }
}

impl From<EntityValue> for Param {
    fn from(value: EntityValue) -> Self {
        Param::Entity(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Into::into)
    }
}

impl<T: Into<Param>> From<Vec<T>> for Param {
    fn from(items: Vec<T>) -> Self {
        Param::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Param::Null,
            Value::Bool(b) => Param::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Param::Int(i),
                None => n.as_f64().map_or(Param::Null, Param::Float),
            },
            Value::String(s) => Param::Str(s),
            Value::Array(items) => Param::Seq(items.into_iter().map(Param::from).collect()),
            Value::Object(map) => map.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for Param {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Param::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::ChatAction;

    #[test]
    fn test_option_none_becomes_null() {
        let value: Param = Option::<String>::None.into();
        assert!(value.is_null());
    }

    #[test]
    fn test_from_json_value() {
        let value = Param::from(json!({"a": [1, 2.5, null], "b": "x"}));
        let map = value.as_map().unwrap();
        assert_eq!(
            map["a"],
            Param::Seq(vec![Param::Int(1), Param::Float(2.5), Param::Null])
        );
        assert_eq!(map["b"], Param::Str("x".into()));
    }

    #[test]
    fn test_plain_json_keeps_nulls_and_variant_names() {
        let value: Param = [
            ("action", Param::from(ChatAction::Typing)),
            ("none", Param::Null),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            value.to_plain_json(),
            json!({"action": "Typing", "none": null})
        );
    }

    #[test]
    fn test_wire_enum_lookup() {
        assert_eq!(ChatAction::from_wire("typing"), Some(ChatAction::Typing));
        assert_eq!(ChatAction::from_wire("dancing"), None);
    }
}
