//! Callback queries from inline keyboard buttons.

use super::{Message, User};
use crate::entity::Entity;
use crate::error::MappingResult;
use crate::mapping::FieldSet;
use crate::value::Param;

/// A press on an inline keyboard button carrying callback data.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackQuery {
    /// Unique identifier.
    pub id: String,
    /// Who pressed the button.
    pub from: User,
    /// The message the button was attached to, if it is not too old.
    pub message: Option<Message>,
    /// Identifier of the inline message the button was attached to.
    pub inline_message_id: Option<String>,
    /// Global identifier of the chat the message was sent to.
    pub chat_instance: String,
    /// Opaque payload associated with the button.
    pub data: Option<String>,
    pub game_short_name: Option<String>,
}

impl Entity for CallbackQuery {
    const NAME: &'static str = "CallbackQuery";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            id: fields.required("id")?,
            from: fields.entity("from")?,
            message: fields.optional_entity("message")?,
            inline_message_id: fields.optional("inline_message_id")?,
            chat_instance: fields.required("chat_instance")?,
            data: fields.optional("data")?,
            game_short_name: fields.optional("game_short_name")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("id", self.id.clone().into()),
            ("from", self.from.clone().into()),
            ("message", self.message.clone().into()),
            ("inline_message_id", self.inline_message_id.clone().into()),
            ("chat_instance", self.chat_instance.clone().into()),
            ("data", self.data.clone().into()),
            ("game_short_name", self.game_short_name.clone().into()),
        ]
    }
}
