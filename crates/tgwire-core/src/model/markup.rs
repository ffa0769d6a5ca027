//! Reply markup: custom keyboards, inline keyboards, keyboard removal and
//! forced replies.
//!
//! On the wire the four variants carry no tag; they are told apart by their
//! key sets (see [`resolve`](crate::mapping::resolve)). Locally they form the
//! closed [`Markup`] enum.
//!
//! Keyboard rows accept bare text labels and fully specified buttons
//! interchangeably. Labels are promoted to minimal buttons when the keyboard
//! is constructed, so a built keyboard only ever holds concrete buttons.
//!
//! # Example
//!
//! ```rust,ignore
//! use tgwire_core::{InlineKeyboardButton, InlineKeyboardMarkup, keyboard};
//!
//! let markup = InlineKeyboardMarkup::new(keyboard::construct([keyboard::row([
//!     InlineKeyboardButton::callback("Yes", "y").into(),
//!     "No".into(),
//! ])?]));
//! ```

use serde_json::Value;

use crate::entity::{Entity, EntityKind};
use crate::error::{MappingError, MappingResult, shape_of};
use crate::mapping::{FieldSet, convert, resolve};
use crate::value::Param;

// ============================================================================
// Markup Enum
// ============================================================================

/// Interactive markup attached to a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    /// Custom keyboard replacing the user's keyboard.
    ReplyKeyboard(ReplyKeyboardMarkup),
    /// Buttons attached to the message itself.
    InlineKeyboard(InlineKeyboardMarkup),
    /// Request to hide a custom keyboard.
    ReplyKeyboardRemove(ReplyKeyboardRemove),
    /// Request to show the reply interface.
    ForceReply(ForceReply),
}

impl Markup {
    /// Returns the variant's entity kind.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::ReplyKeyboard(_) => EntityKind::ReplyKeyboard,
            Self::InlineKeyboard(_) => EntityKind::InlineKeyboard,
            Self::ReplyKeyboardRemove(_) => EntityKind::ReplyKeyboardRemove,
            Self::ForceReply(_) => EntityKind::ForceReply,
        }
    }
}

impl Entity for Markup {
    const NAME: &'static str = "Markup";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        resolve(fields.take_all())
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        match self {
            Self::ReplyKeyboard(m) => m.fields(),
            Self::InlineKeyboard(m) => m.fields(),
            Self::ReplyKeyboardRemove(m) => m.fields(),
            Self::ForceReply(m) => m.fields(),
        }
    }
}

macro_rules! markup_variant {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Markup {
                fn from(markup: $ty) -> Self {
                    Markup::$variant(markup)
                }
            }

            impl From<$ty> for Param {
                fn from(markup: $ty) -> Self {
                    Markup::from(markup).into()
                }
            }
        )+
    };
}

markup_variant! {
    ReplyKeyboard(ReplyKeyboardMarkup),
    InlineKeyboard(InlineKeyboardMarkup),
    ReplyKeyboardRemove(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

// ============================================================================
// Buttons
// ============================================================================

/// A keyboard button that can be created from a bare text label.
pub trait Button: Entity {
    /// Creates the minimal button showing `text`.
    fn from_label(text: String) -> Self;
}

/// Either a bare text label or a fully specified button.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonLike<B> {
    Label(String),
    Button(B),
}

impl<B: Button> ButtonLike<B> {
    /// Turns the value into a concrete button.
    pub fn promote(self) -> B {
        match self {
            Self::Label(text) => B::from_label(text),
            Self::Button(button) => button,
        }
    }

    fn from_wire(value: Value) -> MappingResult<Self> {
        match value {
            Value::String(text) => Ok(Self::Label(text)),
            object @ Value::Object(_) => convert(object).map(Self::Button),
            other => Err(MappingError::Expected {
                expected: "button",
                found: shape_of(&other),
            }),
        }
    }
}

impl<B> From<&str> for ButtonLike<B> {
    fn from(text: &str) -> Self {
        Self::Label(text.to_string())
    }
}

impl<B> From<String> for ButtonLike<B> {
    fn from(text: String) -> Self {
        Self::Label(text)
    }
}

impl From<KeyboardButton> for ButtonLike<KeyboardButton> {
    fn from(button: KeyboardButton) -> Self {
        Self::Button(button)
    }
}

impl From<InlineKeyboardButton> for ButtonLike<InlineKeyboardButton> {
    fn from(button: InlineKeyboardButton) -> Self {
        Self::Button(button)
    }
}

fn promote_rows<B: Button>(rows: Vec<Vec<ButtonLike<B>>>) -> Vec<Vec<B>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(ButtonLike::promote).collect())
        .collect()
}

fn button_rows<B: Button>(fields: &mut FieldSet, name: &str) -> MappingResult<Vec<Vec<B>>> {
    let rows: Vec<Vec<Value>> = fields.required(name)?;
    let rows = rows
        .into_iter()
        .map(|row| row.into_iter().map(ButtonLike::from_wire).collect())
        .collect::<MappingResult<Vec<Vec<ButtonLike<B>>>>>()?;
    Ok(promote_rows(rows))
}

/// A button of a custom reply keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    /// Label; sent as a message when pressed.
    pub text: String,
    /// Send the user's phone number when pressed.
    pub request_contact: Option<bool>,
    /// Send the user's location when pressed.
    pub request_location: Option<bool>,
}

impl Button for KeyboardButton {
    fn from_label(text: String) -> Self {
        Self {
            text,
            request_contact: None,
            request_location: None,
        }
    }
}

impl Entity for KeyboardButton {
    const NAME: &'static str = "KeyboardButton";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            text: fields.required("text")?,
            request_contact: fields.optional("request_contact")?,
            request_location: fields.optional("request_location")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("text", self.text.clone().into()),
            ("request_contact", self.request_contact.into()),
            ("request_location", self.request_location.into()),
        ]
    }
}

/// A button attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineKeyboardButton {
    pub text: String,
    /// URL opened when pressed.
    pub url: Option<String>,
    /// Payload delivered in a callback query when pressed.
    pub callback_data: Option<String>,
    pub switch_inline_query: Option<String>,
    pub switch_inline_query_current_chat: Option<String>,
}

impl InlineKeyboardButton {
    /// Creates a button producing a callback query with `data`.
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            callback_data: Some(data.into()),
            ..Self::from_label(text.into())
        }
    }

    /// Creates a button opening `url`.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::from_label(text.into())
        }
    }
}

impl Button for InlineKeyboardButton {
    fn from_label(text: String) -> Self {
        Self {
            text,
            url: None,
            callback_data: None,
            switch_inline_query: None,
            switch_inline_query_current_chat: None,
        }
    }
}

impl Entity for InlineKeyboardButton {
    const NAME: &'static str = "InlineKeyboardButton";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            text: fields.required("text")?,
            url: fields.optional("url")?,
            callback_data: fields.optional("callback_data")?,
            switch_inline_query: fields.optional("switch_inline_query")?,
            switch_inline_query_current_chat: fields
                .optional("switch_inline_query_current_chat")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("text", self.text.clone().into()),
            ("url", self.url.clone().into()),
            ("callback_data", self.callback_data.clone().into()),
            ("switch_inline_query", self.switch_inline_query.clone().into()),
            (
                "switch_inline_query_current_chat",
                self.switch_inline_query_current_chat.clone().into(),
            ),
        ]
    }
}

// ============================================================================
// Markup Variants
// ============================================================================

/// A custom keyboard replacing the user's regular keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    /// Shrink the keyboard to fit its buttons.
    pub resize_keyboard: Option<bool>,
    /// Hide the keyboard after one use.
    pub one_time_keyboard: Option<bool>,
    /// Show only to mentioned users and the replied-to sender.
    pub selective: Option<bool>,
}

impl ReplyKeyboardMarkup {
    /// Wire keys this variant accepts.
    pub const FIELDS: &'static [&'static str] =
        &["keyboard", "resize_keyboard", "one_time_keyboard", "selective"];

    /// Creates a keyboard, promoting labels to buttons.
    pub fn new(rows: Vec<Vec<ButtonLike<KeyboardButton>>>) -> Self {
        Self {
            keyboard: promote_rows(rows),
            resize_keyboard: None,
            one_time_keyboard: None,
            selective: None,
        }
    }

    pub fn resize(mut self) -> Self {
        self.resize_keyboard = Some(true);
        self
    }

    pub fn one_time(mut self) -> Self {
        self.one_time_keyboard = Some(true);
        self
    }

    pub fn selective(mut self) -> Self {
        self.selective = Some(true);
        self
    }
}

impl Entity for ReplyKeyboardMarkup {
    const NAME: &'static str = "ReplyKeyboardMarkup";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            keyboard: button_rows(fields, "keyboard")?,
            resize_keyboard: fields.optional("resize_keyboard")?,
            one_time_keyboard: fields.optional("one_time_keyboard")?,
            selective: fields.optional("selective")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("keyboard", self.keyboard.clone().into()),
            ("resize_keyboard", self.resize_keyboard.into()),
            ("one_time_keyboard", self.one_time_keyboard.into()),
            ("selective", self.selective.into()),
        ]
    }
}

/// Buttons shown right below a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// Wire keys this variant accepts.
    pub const FIELDS: &'static [&'static str] = &["inline_keyboard"];

    /// Creates an inline keyboard, promoting labels to buttons.
    pub fn new(rows: Vec<Vec<ButtonLike<InlineKeyboardButton>>>) -> Self {
        Self {
            inline_keyboard: promote_rows(rows),
        }
    }
}

impl Entity for InlineKeyboardMarkup {
    const NAME: &'static str = "InlineKeyboardMarkup";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            inline_keyboard: button_rows(fields, "inline_keyboard")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![("inline_keyboard", self.inline_keyboard.clone().into())]
    }
}

/// Asks clients to remove the custom keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplyKeyboardRemove {
    pub selective: Option<bool>,
}

impl ReplyKeyboardRemove {
    /// Wire keys this variant accepts.
    pub const FIELDS: &'static [&'static str] = &["remove_keyboard", "selective"];

    pub fn new() -> Self {
        Self::default()
    }
}

impl Entity for ReplyKeyboardRemove {
    const NAME: &'static str = "ReplyKeyboardRemove";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        // Always `true` on the wire.
        fields.required::<bool>("remove_keyboard")?;
        Ok(Self {
            selective: fields.optional("selective")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("remove_keyboard", true.into()),
            ("selective", self.selective.into()),
        ]
    }
}

/// Asks clients to display a reply interface, as if the user selected
/// the bot's message and tapped "Reply".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForceReply {
    pub selective: Option<bool>,
    /// Placeholder shown in the input field.
    pub input_field_placeholder: Option<String>,
}

impl ForceReply {
    /// Wire keys this variant accepts.
    pub const FIELDS: &'static [&'static str] =
        &["force_reply", "selective", "input_field_placeholder"];

    pub fn new() -> Self {
        Self::default()
    }
}

impl Entity for ForceReply {
    const NAME: &'static str = "ForceReply";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        fields.required::<bool>("force_reply")?;
        Ok(Self {
            selective: fields.optional("selective")?,
            input_field_placeholder: fields.optional("input_field_placeholder")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("force_reply", true.into()),
            ("selective", self.selective.into()),
            (
                "input_field_placeholder",
                self.input_field_placeholder.clone().into(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::mapping::prepare_default;

    #[test]
    fn test_labels_promoted_on_construction() {
        let markup = ReplyKeyboardMarkup::new(vec![vec![
            "Yes".into(),
            KeyboardButton {
                request_contact: Some(true),
                ..KeyboardButton::from_label("Share".into())
            }
            .into(),
        ]]);
        assert_eq!(markup.keyboard[0][0], KeyboardButton::from_label("Yes".into()));
        assert_eq!(markup.keyboard[0][1].request_contact, Some(true));
    }

    #[test]
    fn test_wire_rows_mix_labels_and_buttons() {
        let markup: ReplyKeyboardMarkup = convert(json!({
            "keyboard": [["a", {"text": "b", "request_location": true}]],
            "resize_keyboard": true,
        }))
        .unwrap();
        assert_eq!(markup.keyboard[0][0].text, "a");
        assert_eq!(markup.keyboard[0][1].request_location, Some(true));
        assert_eq!(markup.resize_keyboard, Some(true));
    }

    #[test]
    fn test_invalid_button_shape() {
        let err = convert::<InlineKeyboardMarkup, _>(json!({"inline_keyboard": [[1]]})).unwrap_err();
        assert_eq!(
            err,
            MappingError::Expected {
                expected: "button",
                found: "number"
            }
        );
    }

    #[test]
    fn test_remove_keyboard_prepares_marker() {
        let value = prepare_default(&ReplyKeyboardRemove::new().into()).unwrap();
        assert_eq!(value, json!({"remove_keyboard": true}));
    }

    #[test]
    fn test_force_reply_prepares_marker() {
        let markup = ForceReply {
            selective: Some(true),
            ..ForceReply::new()
        };
        let value = prepare_default(&markup.into()).unwrap();
        assert_eq!(value, json!({"force_reply": true, "selective": true}));
    }

    #[test]
    fn test_markup_kind() {
        let markup = Markup::from(InlineKeyboardMarkup::new(vec![vec!["x".into()]]));
        assert_eq!(markup.kind(), EntityKind::InlineKeyboard);
    }
}
