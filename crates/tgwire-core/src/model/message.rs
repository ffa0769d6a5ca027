//! Messages and their text spans.

use chrono::{DateTime, Utc};

use super::{Audio, Chat, Document, Markup, User};
use crate::entity::{Entity, Rename};
use crate::error::MappingResult;
use crate::mapping::FieldSet;
use crate::value::Param;

/// A message.
///
/// `reply_to_message` is itself a message: the nested payload goes through
/// the same inbound conversion when the outer message is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Unique identifier inside the chat.
    pub id: i64,
    /// When the message was sent.
    pub date: DateTime<Utc>,
    /// The conversation the message belongs to.
    pub chat: Chat,
    /// Sender; empty for messages sent to channels.
    pub from: Option<User>,
    pub text: Option<String>,
    /// When the message was last edited.
    pub edit_date: Option<DateTime<Utc>>,
    /// Special spans in `text` (commands, mentions, URLs, ...).
    pub entities: Vec<MessageEntity>,
    pub caption: Option<String>,
    /// Special spans in `caption`.
    pub caption_entities: Vec<MessageEntity>,
    pub document: Option<Document>,
    pub location: Option<Location>,
    pub audio: Option<Audio>,
    /// The message this one replies to.
    pub reply_to_message: Option<Box<Message>>,
    /// Interactive markup attached to the message.
    pub reply_markup: Option<Markup>,
}

impl Message {
    /// Creates a message with only the required fields set.
    pub fn new(id: i64, date: DateTime<Utc>, chat: Chat) -> Self {
        Self {
            id,
            date,
            chat,
            from: None,
            text: None,
            edit_date: None,
            entities: Vec::new(),
            caption: None,
            caption_entities: Vec::new(),
            document: None,
            location: None,
            audio: None,
            reply_to_message: None,
            reply_markup: None,
        }
    }

    /// Sets the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Returns the bot command the message starts with, if any.
    pub fn bot_command(&self) -> Option<String> {
        self.entities
            .iter()
            .find(|e| e.offset == 0 && e.kind == "bot_command")
            .and_then(|e| e.text_of(self))
    }
}

impl Entity for Message {
    const NAME: &'static str = "Message";
    const RENAMES: &'static [(&'static str, Rename)] = &[("message_id", Rename::To("id"))];

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            id: fields.required("id")?,
            date: fields.timestamp("date")?,
            chat: fields.entity("chat")?,
            from: fields.optional_entity("from")?,
            text: fields.optional("text")?,
            edit_date: fields.optional_timestamp("edit_date")?,
            entities: fields.entities("entities")?,
            caption: fields.optional("caption")?,
            caption_entities: fields.entities("caption_entities")?,
            document: fields.optional_entity("document")?,
            location: fields.optional_entity("location")?,
            audio: fields.optional_entity("audio")?,
            reply_to_message: fields.optional_entity("reply_to_message")?.map(Box::new),
            reply_markup: fields.optional_entity("reply_markup")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("id", self.id.into()),
            ("date", self.date.timestamp().into()),
            ("chat", self.chat.clone().into()),
            ("from", self.from.clone().into()),
            ("text", self.text.clone().into()),
            ("edit_date", self.edit_date.map(|d| d.timestamp()).into()),
            ("entities", self.entities.clone().into()),
            ("caption", self.caption.clone().into()),
            ("caption_entities", self.caption_entities.clone().into()),
            ("document", self.document.clone().into()),
            ("location", self.location.into()),
            ("audio", self.audio.clone().into()),
            (
                "reply_to_message",
                self.reply_to_message.as_deref().cloned().into(),
            ),
            ("reply_markup", self.reply_markup.clone().into()),
        ]
    }
}

/// A special span in a message's text, such as a hashtag or bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntity {
    /// Span type (`mention`, `bot_command`, `url`, ...).
    pub kind: String,
    /// Offset in UTF-16 code units.
    pub offset: i64,
    /// Length in UTF-16 code units.
    pub length: i64,
    /// Target for `text_link` spans.
    pub url: Option<String>,
    /// Mentioned user for `text_mention` spans.
    pub user: Option<User>,
}

impl MessageEntity {
    /// Extracts the span from `text`.
    ///
    /// Returns `None` if the span does not fit inside the text.
    pub fn text_in(&self, text: &str) -> Option<String> {
        let start = usize::try_from(self.offset).ok()?;
        let end = start.checked_add(usize::try_from(self.length).ok()?)?;
        let units: Vec<u16> = text.encode_utf16().collect();
        units.get(start..end).map(String::from_utf16_lossy)
    }

    /// Extracts the span from the owning message's text.
    pub fn text_of(&self, message: &Message) -> Option<String> {
        message.text.as_deref().and_then(|text| self.text_in(text))
    }
}

impl Entity for MessageEntity {
    const NAME: &'static str = "MessageEntity";
    const RENAMES: &'static [(&'static str, Rename)] = &[("type", Rename::To("kind"))];

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            kind: fields.required("kind")?,
            offset: fields.required("offset")?,
            length: fields.required("length")?,
            url: fields.optional("url")?,
            user: fields.optional_entity("user")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("kind", self.kind.clone().into()),
            ("offset", self.offset.into()),
            ("length", self.length.into()),
            ("url", self.url.clone().into()),
            ("user", self.user.clone().into()),
        ]
    }
}

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Entity for Location {
    const NAME: &'static str = "Location";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            latitude: fields.required("latitude")?,
            longitude: fields.required("longitude")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("latitude", self.latitude.into()),
            ("longitude", self.longitude.into()),
        ]
    }
}

wire_enum! {
    /// How the remote service should parse entities in a message's text.
    pub enum ParseMode {
        Markdown => "Markdown",
        Html => "HTML",
    }
}
