//! Incoming updates.
//!
//! On the wire an update is an envelope with one of several optional
//! payload fields populated. Locally it is a tagged union: the payload
//! kind is decided once, at conversion time, by scanning the fields in
//! [`UpdateType`] declaration order and taking the first non-null one.

use serde_json::Value;

use super::{CallbackQuery, Message};
use crate::entity::{Entity, Rename};
use crate::error::{MappingError, MappingResult};
use crate::mapping::{FieldSet, convert};
use crate::value::{Param, WireEnum};

wire_enum! {
    /// Update payload kinds, in the order they are probed.
    pub enum UpdateType {
        Message => "message",
        EditedMessage => "edited_message",
        ChannelPost => "channel_post",
        EditedChannelPost => "edited_channel_post",
        InlineQuery => "inline_query",
        ChosenInlineResult => "chosen_inline_result",
        CallbackQuery => "callback_query",
        ShippingQuery => "shipping_query",
        PreCheckoutQuery => "pre_checkout_query",
    }
}

/// The payload carried by an [`Update`].
///
/// Kinds without a typed model keep their decoded payload as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    Message(Message),
    EditedMessage(Message),
    ChannelPost(Message),
    EditedChannelPost(Message),
    InlineQuery(Value),
    ChosenInlineResult(Value),
    CallbackQuery(CallbackQuery),
    ShippingQuery(Value),
    PreCheckoutQuery(Value),
}

impl UpdateKind {
    /// Returns the kind's discriminant.
    pub fn update_type(&self) -> UpdateType {
        match self {
            Self::Message(_) => UpdateType::Message,
            Self::EditedMessage(_) => UpdateType::EditedMessage,
            Self::ChannelPost(_) => UpdateType::ChannelPost,
            Self::EditedChannelPost(_) => UpdateType::EditedChannelPost,
            Self::InlineQuery(_) => UpdateType::InlineQuery,
            Self::ChosenInlineResult(_) => UpdateType::ChosenInlineResult,
            Self::CallbackQuery(_) => UpdateType::CallbackQuery,
            Self::ShippingQuery(_) => UpdateType::ShippingQuery,
            Self::PreCheckoutQuery(_) => UpdateType::PreCheckoutQuery,
        }
    }

    fn from_payload(update_type: UpdateType, payload: Value) -> MappingResult<Self> {
        Ok(match update_type {
            UpdateType::Message => Self::Message(convert(payload)?),
            UpdateType::EditedMessage => Self::EditedMessage(convert(payload)?),
            UpdateType::ChannelPost => Self::ChannelPost(convert(payload)?),
            UpdateType::EditedChannelPost => Self::EditedChannelPost(convert(payload)?),
            UpdateType::InlineQuery => Self::InlineQuery(payload),
            UpdateType::ChosenInlineResult => Self::ChosenInlineResult(payload),
            UpdateType::CallbackQuery => Self::CallbackQuery(convert(payload)?),
            UpdateType::ShippingQuery => Self::ShippingQuery(payload),
            UpdateType::PreCheckoutQuery => Self::PreCheckoutQuery(payload),
        })
    }

    fn payload(&self) -> Param {
        match self {
            Self::Message(m)
            | Self::EditedMessage(m)
            | Self::ChannelPost(m)
            | Self::EditedChannelPost(m) => m.clone().into(),
            Self::CallbackQuery(q) => q.clone().into(),
            Self::InlineQuery(v)
            | Self::ChosenInlineResult(v)
            | Self::ShippingQuery(v)
            | Self::PreCheckoutQuery(v) => v.clone().into(),
        }
    }
}

/// An incoming update.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Sequential identifier; used to acknowledge updates when long polling.
    pub id: i64,
    pub kind: UpdateKind,
}

impl Update {
    pub fn new(id: i64, kind: UpdateKind) -> Self {
        Self { id, kind }
    }

    /// Returns the payload kind.
    pub fn update_type(&self) -> UpdateType {
        self.kind.update_type()
    }

    /// Returns the carried message, new or edited, from a chat or a channel.
    pub fn message(&self) -> Option<&Message> {
        match &self.kind {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => Some(m),
            UpdateKind::CallbackQuery(q) => q.message.as_ref(),
            _ => None,
        }
    }
}

impl Entity for Update {
    const NAME: &'static str = "Update";
    const RENAMES: &'static [(&'static str, Rename)] = &[("update_id", Rename::To("id"))];

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        let id = fields.required("id")?;
        for update_type in UpdateType::ALL {
            if let Some(payload) = fields.take(update_type.wire_value()) {
                let kind = UpdateKind::from_payload(*update_type, payload)?;
                return Ok(Self { id, kind });
            }
        }
        Err(MappingError::UnknownUpdateKind { id })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("id", self.id.into()),
            (self.update_type().wire_value(), self.kind.payload()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_first_populated_kind_wins() {
        let update: Update = convert(json!({
            "update_id": 5,
            "message": null,
            "callback_query": {
                "id": "cb1",
                "from": {"id": 2, "is_bot": false, "first_name": "Ann"},
                "chat_instance": "ci",
                "data": "yes",
            },
        }))
        .unwrap();
        assert_eq!(update.update_type(), UpdateType::CallbackQuery);
        assert!(matches!(update.kind, UpdateKind::CallbackQuery(ref q) if q.data.as_deref() == Some("yes")));
    }

    #[test]
    fn test_edited_message() {
        let update: Update = convert(json!({
            "update_id": 6,
            "edited_message": {"message_id": 3, "date": 10, "chat": {"id": 1, "type": "private"}},
        }))
        .unwrap();
        assert_eq!(update.update_type(), UpdateType::EditedMessage);
        assert_eq!(update.message().map(|m| m.id), Some(3));
    }

    #[test]
    fn test_untyped_kind_keeps_payload() {
        let update: Update = convert(json!({
            "update_id": 7,
            "inline_query": {"id": "q", "query": "cats"},
        }))
        .unwrap();
        assert_eq!(update.kind, UpdateKind::InlineQuery(json!({"id": "q", "query": "cats"})));
    }

    #[test]
    fn test_no_known_kind_is_an_error() {
        let err = convert::<Update, _>(json!({"update_id": 8, "poll": {}})).unwrap_err();
        assert_eq!(err, MappingError::UnknownUpdateKind { id: 8 });
    }

    #[test]
    fn test_update_type_wire_values() {
        assert_eq!(UpdateType::EditedMessage.wire_value(), "edited_message");
        assert_eq!(UpdateType::ALL.len(), 9);
    }
}
