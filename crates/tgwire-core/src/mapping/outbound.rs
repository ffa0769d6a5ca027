//! Outbound mapping: typed values → wire-safe JSON.
//!
//! Every outgoing request payload passes through [`prepare`]. Per value the
//! following rules apply, first match wins:
//!
//! 1. An [`Update`](crate::model::Update) becomes `id + 1` (long-poll offset
//!    pointing strictly after it) when `update_offset_by_one` is set.
//! 2. An enumeration becomes its wire value when `unwrap_enums` is set.
//! 3. An entity whose kind is in the flatten set is expanded inline into its
//!    full wire field mapping.
//! 4. An entity whose kind has an identity field is replaced by that field.
//! 5. A sequence drops its null elements (always) and prepares the rest.
//! 6. A mapping prepares its values, dropping null entries only when
//!    `remove_none` is set.
//! 7. Anything else is emitted unchanged. An entity with neither treatment
//!    is emitted as its wire field mapping, prepared under the same options.
//!
//! Sequences and mappings deliberately handle nulls differently; keep it
//! that way, outgoing payloads of existing callers depend on it.
//!
//! The input tree is never mutated.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};
use tracing::debug;

use crate::entity::{EntityKind, EntityValue};
use crate::error::{MappingError, MappingResult};
use crate::value::Param;

/// What to do when preparation reaches [`PrepareOptions::max_depth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthPolicy {
    /// Emit the remaining subtree without transformation.
    #[default]
    ReturnAsIs,
    /// Fail with [`MappingError::DepthExceeded`].
    Raise,
}

/// Options steering [`prepare`].
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Drop mapping entries whose value is null.
    pub remove_none: bool,
    /// Entity kind → field substituted for the entity.
    pub identity_fields: BTreeMap<EntityKind, &'static str>,
    /// Entity kinds expanded inline instead of being substituted.
    pub flatten: BTreeSet<EntityKind>,
    /// Replace enumerations with their wire value.
    pub unwrap_enums: bool,
    /// Replace an update with `id + 1`.
    pub update_offset_by_one: bool,
    /// Recursion ceiling; `None` is unbounded.
    pub max_depth: Option<usize>,
    /// Behaviour at the recursion ceiling.
    pub on_depth_exceeded: DepthPolicy,
}

const ALL_KINDS: [EntityKind; 19] = [
    EntityKind::Update,
    EntityKind::Message,
    EntityKind::MessageEntity,
    EntityKind::Chat,
    EntityKind::User,
    EntityKind::Bot,
    EntityKind::Document,
    EntityKind::Audio,
    EntityKind::PhotoSize,
    EntityKind::File,
    EntityKind::Location,
    EntityKind::CallbackQuery,
    EntityKind::WebhookInfo,
    EntityKind::ReplyKeyboard,
    EntityKind::InlineKeyboard,
    EntityKind::ReplyKeyboardRemove,
    EntityKind::ForceReply,
    EntityKind::KeyboardButton,
    EntityKind::InlineKeyboardButton,
];

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            remove_none: true,
            identity_fields: ALL_KINDS
                .iter()
                .filter_map(|kind| Some((*kind, kind.default_identity_field()?)))
                .collect(),
            flatten: ALL_KINDS
                .iter()
                .copied()
                .filter(|kind| kind.flattens_inline())
                .collect(),
            unwrap_enums: true,
            update_offset_by_one: true,
            max_depth: None,
            on_depth_exceeded: DepthPolicy::ReturnAsIs,
        }
    }
}

impl PrepareOptions {
    /// Sets whether null mapping entries are dropped.
    pub fn remove_none(mut self, remove_none: bool) -> Self {
        self.remove_none = remove_none;
        self
    }

    /// Substitutes entities of `kind` with the named field.
    pub fn identity(mut self, kind: EntityKind, field: &'static str) -> Self {
        self.identity_fields.insert(kind, field);
        self
    }

    /// Stops substituting entities of `kind`.
    pub fn without_identity(mut self, kind: EntityKind) -> Self {
        self.identity_fields.remove(&kind);
        self
    }

    /// Expands entities of `kind` inline.
    pub fn flatten(mut self, kind: EntityKind) -> Self {
        self.flatten.insert(kind);
        self
    }

    /// Sets whether enumerations are unwrapped.
    pub fn unwrap_enums(mut self, unwrap: bool) -> Self {
        self.unwrap_enums = unwrap;
        self
    }

    /// Sets whether updates become `id + 1`.
    pub fn update_offset_by_one(mut self, enabled: bool) -> Self {
        self.update_offset_by_one = enabled;
        self
    }

    /// Bounds recursion depth.
    pub fn max_depth(mut self, depth: usize, policy: DepthPolicy) -> Self {
        self.max_depth = Some(depth);
        self.on_depth_exceeded = policy;
        self
    }
}

/// Prepares a value for the wire using default options.
pub fn prepare_default(value: &Param) -> MappingResult<Value> {
    prepare(value, &PrepareOptions::default())
}

/// Recursively reduces a typed value to wire-safe JSON.
pub fn prepare(value: &Param, options: &PrepareOptions) -> MappingResult<Value> {
    Preparer { options }.prepare(value, 0)
}

struct Preparer<'a> {
    options: &'a PrepareOptions,
}

impl Preparer<'_> {
    fn prepare(&self, value: &Param, depth: usize) -> MappingResult<Value> {
        if let Some(max) = self.options.max_depth
            && depth >= max
        {
            debug!(depth, policy = ?self.options.on_depth_exceeded, "Preparation depth limit reached");
            return match self.options.on_depth_exceeded {
                DepthPolicy::ReturnAsIs => Ok(value.to_plain_json()),
                DepthPolicy::Raise => Err(MappingError::DepthExceeded { depth }),
            };
        }

        match value {
            Param::Entity(EntityValue::Update(update)) if self.options.update_offset_by_one => {
                update
                    .id
                    .checked_add(1)
                    .map(Value::from)
                    .ok_or_else(|| MappingError::invalid("Update", "id", "offset overflows i64"))
            }
            Param::Enum(e) if self.options.unwrap_enums => Ok(Value::String(e.wire.to_string())),
            Param::Entity(entity) => self.prepare_entity(entity, depth),
            Param::Seq(items) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| self.prepare(item, depth + 1))
                .collect::<MappingResult<Vec<_>>>()
                .map(Value::Array),
            Param::Map(map) => self.prepare_entries(
                map.iter().map(|(k, v)| (k.as_str(), v)),
                depth,
            ),
            other => Ok(other.to_plain_json()),
        }
    }

    fn prepare_entity(&self, entity: &EntityValue, depth: usize) -> MappingResult<Value> {
        let kind = entity.kind();

        if self.options.flatten.contains(&kind) {
            let fields = entity.wire_fields();
            return self.prepare_entries(fields.iter().map(|(k, v)| (*k, v)), depth);
        }

        if let Some(field) = self.options.identity_fields.get(&kind) {
            let identity = entity
                .field(field)
                .ok_or_else(|| MappingError::missing(entity.name(), *field))?;
            return self.prepare(&identity, depth + 1);
        }

        let fields = entity.wire_fields();
        self.prepare_entries(fields.iter().map(|(k, v)| (*k, v)), depth)
    }

    fn prepare_entries<'v>(
        &self,
        entries: impl Iterator<Item = (&'v str, &'v Param)>,
        depth: usize,
    ) -> MappingResult<Value> {
        let mut out = Map::new();
        for (key, value) in entries {
            if self.options.remove_none && value.is_null() {
                continue;
            }
            out.insert(key.to_string(), self.prepare(value, depth + 1)?);
        }
        Ok(Value::Object(out))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use serde_json::json;

    use super::*;
    use crate::model::{
        Chat, ChatAction, Document, InlineKeyboardButton, InlineKeyboardMarkup, Message,
        ParseMode, Update, UpdateKind, UpdateType, User, WebhookInfo,
    };

    fn chat() -> Chat {
        Chat::new(1, "private")
    }

    fn message(id: i64) -> Message {
        Message::new(id, DateTime::from_timestamp(0, 0).unwrap(), chat())
    }

    fn map(entries: Vec<(&str, Param)>) -> Param {
        entries.into_iter().collect()
    }

    #[test]
    fn test_update_offset_by_one() {
        let update = Update::new(41, UpdateKind::Message(message(1)));
        assert_eq!(prepare_default(&update.into()).unwrap(), json!(42));
    }

    #[test]
    fn test_update_without_offset_uses_identity() {
        let update = Update::new(41, UpdateKind::Message(message(1)));
        let options = PrepareOptions::default().update_offset_by_one(false);
        assert_eq!(prepare(&update.into(), &options).unwrap(), json!(41));
    }

    #[test]
    fn test_identity_reduction() {
        assert_eq!(prepare_default(&message(9).into()).unwrap(), json!(9));
        let document = Document::new("BQAD-file");
        assert_eq!(prepare_default(&document.into()).unwrap(), json!("BQAD-file"));
        let user = User::new(3, false, "Ann");
        assert_eq!(prepare_default(&user.into()).unwrap(), json!(3));
    }

    #[test]
    fn test_enum_unwrap() {
        assert_eq!(
            prepare_default(&ParseMode::Markdown.into()).unwrap(),
            json!("Markdown")
        );
        let options = PrepareOptions::default().unwrap_enums(false);
        assert_eq!(
            prepare(&ChatAction::Typing.into(), &options).unwrap(),
            json!("Typing")
        );
    }

    #[test]
    fn test_remove_none_drops_null_entries() {
        let value = map(vec![("a", 1.into()), ("b", Param::Null)]);
        assert_eq!(prepare_default(&value).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_keep_none_retains_null_entries() {
        let value = map(vec![("a", 1.into()), ("b", Param::Null)]);
        let options = PrepareOptions::default().remove_none(false);
        assert_eq!(
            prepare(&value, &options).unwrap(),
            json!({"a": 1, "b": null})
        );
    }

    #[test]
    fn test_sequence_nulls_always_dropped() {
        let value = Param::Seq(vec![1.into(), Param::Null, 2.into()]);
        let options = PrepareOptions::default().remove_none(false);
        assert_eq!(prepare(&value, &options).unwrap(), json!([1, 2]));
        assert_eq!(prepare_default(&value).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_markup_flattens_inline() {
        let markup = InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::callback("Yes", "y").into(),
            "No".into(),
        ]]);
        let value = map(vec![("reply_markup", markup.into())]);
        assert_eq!(
            prepare_default(&value).unwrap(),
            json!({
                "reply_markup": {
                    "inline_keyboard": [[
                        {"text": "Yes", "callback_data": "y"},
                        {"text": "No"},
                    ]]
                }
            })
        );
    }

    #[test]
    fn test_flatten_emits_wire_names() {
        let options = PrepareOptions::default().flatten(EntityKind::Chat);
        assert_eq!(
            prepare(&chat().into(), &options).unwrap(),
            json!({"id": 1, "type": "private"})
        );
    }

    #[test]
    fn test_kind_without_identity_is_emitted_whole() {
        let options = PrepareOptions::default().without_identity(EntityKind::User);
        let value = prepare(&User::new(3, true, "Bot").into(), &options).unwrap();
        assert_eq!(value["first_name"], json!("Bot"));
        assert!(value.get("last_name").is_none());

        let options = options.remove_none(false);
        let value = prepare(&User::new(3, true, "Bot").into(), &options).unwrap();
        assert_eq!(value["last_name"], Value::Null);
    }

    #[test]
    fn test_whole_entity_fields_are_prepared() {
        let info = WebhookInfo {
            url: String::new(),
            has_custom_certificate: false,
            pending_update_count: 0,
            last_error_date: None,
            last_error_message: None,
            max_connections: None,
            allowed_updates: Some(vec![UpdateType::Message]),
        };
        let value = map(vec![("info", info.into())]);
        assert_eq!(
            prepare_default(&value).unwrap(),
            json!({
                "info": {
                    "url": "",
                    "has_custom_certificate": false,
                    "pending_update_count": 0,
                    "allowed_updates": ["message"],
                }
            })
        );
    }

    #[test]
    fn test_update_offset_overflow() {
        let update = Update::new(i64::MAX, UpdateKind::Message(message(1)));
        let err = prepare_default(&update.into()).unwrap_err();
        assert!(matches!(err, MappingError::InvalidField { entity: "Update", .. }));
    }

    #[test]
    fn test_depth_limit_returns_as_is() {
        let value = map(vec![("outer", map(vec![("inner", ParseMode::Html.into())]))]);
        let options = PrepareOptions::default().max_depth(1, DepthPolicy::ReturnAsIs);
        assert_eq!(
            prepare(&value, &options).unwrap(),
            json!({"outer": {"inner": "Html"}})
        );
    }

    #[test]
    fn test_depth_limit_raises() {
        let value = Param::Seq(vec![Param::Seq(vec![1.into()])]);
        let options = PrepareOptions::default().max_depth(1, DepthPolicy::Raise);
        assert_eq!(
            prepare(&value, &options).unwrap_err(),
            MappingError::DepthExceeded { depth: 1 }
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let value = map(vec![
            ("kek", vec![Param::from(1), Param::Null].into()),
            ("some", Param::Null),
        ]);
        let before = value.clone();
        prepare_default(&value).unwrap();
        assert_eq!(value, before);
    }

    #[test]
    fn test_allowed_updates_sequence() {
        let value: Param = vec![UpdateType::Message, UpdateType::CallbackQuery].into();
        assert_eq!(
            prepare_default(&value).unwrap(),
            json!(["message", "callback_query"])
        );
    }
}
