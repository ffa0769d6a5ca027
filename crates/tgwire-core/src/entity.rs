//! Entity descriptors and the closed set of entity values.
//!
//! Every typed record implements [`Entity`]: a static rename table consulted
//! by the generic inbound builder, a `build` routine reading renamed fields
//! out of a [`FieldSet`], and a `fields` accessor used by the outbound mapper.
//!
//! Outbound dispatch goes through [`EntityKind`], a closed enumeration of
//! every entity type with its default identity field and inline-flattening
//! capability. There is no open, runtime-keyed type table.

use crate::error::MappingResult;
use crate::mapping::FieldSet;
use crate::model::{
    Audio, Bot, CallbackQuery, Chat, Document, File, InlineKeyboardButton, KeyboardButton,
    Location, Markup, Message, MessageEntity, PhotoSize, Update, User, WebhookInfo,
};
use crate::value::Param;

// ============================================================================
// Rename table
// ============================================================================

/// What happens to a wire key during inbound conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rename {
    /// The key is stored under a different local name.
    To(&'static str),
    /// The key is a marker, not payload, and is discarded.
    Drop,
}

/// Declarative description of a typed record mirroring a wire object.
pub trait Entity: Sized + Clone {
    /// Entity name used in error messages and logs.
    const NAME: &'static str;

    /// Wire name → local name table. Keys not listed keep their wire name.
    const RENAMES: &'static [(&'static str, Rename)] = &[];

    /// Constructs the entity from renamed fields.
    fn build(fields: &mut FieldSet) -> MappingResult<Self>;

    /// The entity's fields keyed by local name, in declaration order.
    fn fields(&self) -> Vec<(&'static str, Param)>;

    /// Maps a wire key to its local name, or `None` if it must be dropped.
    fn local_name(wire: &str) -> Option<&str> {
        match Self::RENAMES.iter().find(|(w, _)| *w == wire) {
            Some((_, Rename::Drop)) => None,
            Some((_, Rename::To(local))) => Some(local),
            None => Some(wire),
        }
    }

    /// Maps a local field name back to its wire key.
    fn wire_name(local: &'static str) -> &'static str {
        Self::RENAMES
            .iter()
            .find(|(_, r)| *r == Rename::To(local))
            .map_or(local, |(wire, _)| wire)
    }
}

// ============================================================================
// EntityKind
// ============================================================================

/// Closed enumeration of entity types, used as the outbound dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Update,
    Message,
    MessageEntity,
    Chat,
    User,
    Bot,
    Document,
    Audio,
    PhotoSize,
    File,
    Location,
    CallbackQuery,
    WebhookInfo,
    ReplyKeyboard,
    InlineKeyboard,
    ReplyKeyboardRemove,
    ForceReply,
    KeyboardButton,
    InlineKeyboardButton,
}

impl EntityKind {
    /// The field substituted for an entity of this kind when it is referenced
    /// from an outbound payload, if any.
    pub fn default_identity_field(self) -> Option<&'static str> {
        match self {
            Self::Update
            | Self::Message
            | Self::Chat
            | Self::User
            | Self::Bot
            | Self::CallbackQuery => Some("id"),
            Self::Document | Self::Audio | Self::File => Some("file_id"),
            _ => None,
        }
    }

    /// Whether entities of this kind are expanded inline by default.
    pub fn flattens_inline(self) -> bool {
        self.is_markup()
            || matches!(self, Self::KeyboardButton | Self::InlineKeyboardButton)
    }

    /// Whether this kind is one of the markup variants.
    pub fn is_markup(self) -> bool {
        matches!(
            self,
            Self::ReplyKeyboard | Self::InlineKeyboard | Self::ReplyKeyboardRemove | Self::ForceReply
        )
    }
}

// ============================================================================
// EntityValue
// ============================================================================

macro_rules! entity_values {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// A type-erased entity inside an outbound [`Param`] tree.
        #[derive(Debug, Clone, PartialEq)]
        pub enum EntityValue {
            $($variant(Box<$ty>),)+
        }

        impl EntityValue {
            /// Returns the entity's name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => <$ty as Entity>::NAME,)+
                }
            }

            /// Returns the fields keyed by local name.
            pub fn fields(&self) -> Vec<(&'static str, Param)> {
                match self {
                    $(Self::$variant(e) => e.fields(),)+
                }
            }

            /// Returns the fields keyed by wire name.
            pub fn wire_fields(&self) -> Vec<(&'static str, Param)> {
                match self {
                    $(Self::$variant(e) => e
                        .fields()
                        .into_iter()
                        .map(|(local, v)| (<$ty as Entity>::wire_name(local), v))
                        .collect(),)+
                }
            }
        }

        $(
            impl From<$ty> for EntityValue {
                fn from(entity: $ty) -> Self {
                    Self::$variant(Box::new(entity))
                }
            }

            impl From<$ty> for Param {
                fn from(entity: $ty) -> Self {
                    Param::Entity(entity.into())
                }
            }
        )+
    };
}

entity_values! {
    Update(Update),
    Message(Message),
    MessageEntity(MessageEntity),
    Chat(Chat),
    User(User),
    Bot(Bot),
    Document(Document),
    Audio(Audio),
    PhotoSize(PhotoSize),
    File(File),
    Location(Location),
    CallbackQuery(CallbackQuery),
    WebhookInfo(WebhookInfo),
    Markup(Markup),
    KeyboardButton(KeyboardButton),
    InlineKeyboardButton(InlineKeyboardButton),
}

impl EntityValue {
    /// Returns the entity's kind.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Update(_) => EntityKind::Update,
            Self::Message(_) => EntityKind::Message,
            Self::MessageEntity(_) => EntityKind::MessageEntity,
            Self::Chat(_) => EntityKind::Chat,
            Self::User(_) => EntityKind::User,
            Self::Bot(_) => EntityKind::Bot,
            Self::Document(_) => EntityKind::Document,
            Self::Audio(_) => EntityKind::Audio,
            Self::PhotoSize(_) => EntityKind::PhotoSize,
            Self::File(_) => EntityKind::File,
            Self::Location(_) => EntityKind::Location,
            Self::CallbackQuery(_) => EntityKind::CallbackQuery,
            Self::WebhookInfo(_) => EntityKind::WebhookInfo,
            Self::Markup(markup) => markup.kind(),
            Self::KeyboardButton(_) => EntityKind::KeyboardButton,
            Self::InlineKeyboardButton(_) => EntityKind::InlineKeyboardButton,
        }
    }

    /// Looks up a single field by local name.
    pub fn field(&self, name: &str) -> Option<Param> {
        self.fields()
            .into_iter()
            .find_map(|(local, value)| (local == name).then_some(value))
    }

    /// Returns the update's identifier if this is an update.
    pub fn as_update(&self) -> Option<&Update> {
        match self {
            Self::Update(update) => Some(update),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_identity_fields() {
        assert_eq!(EntityKind::Message.default_identity_field(), Some("id"));
        assert_eq!(EntityKind::Document.default_identity_field(), Some("file_id"));
        assert_eq!(EntityKind::Location.default_identity_field(), None);
        assert_eq!(EntityKind::ForceReply.default_identity_field(), None);
    }

    #[test]
    fn test_markup_kinds_flatten() {
        assert!(EntityKind::InlineKeyboard.flattens_inline());
        assert!(EntityKind::KeyboardButton.flattens_inline());
        assert!(!EntityKind::Chat.flattens_inline());
    }

    #[test]
    fn test_rename_lookup() {
        assert_eq!(Message::local_name("message_id"), Some("id"));
        assert_eq!(Message::local_name("text"), Some("text"));
        assert_eq!(Message::wire_name("id"), "message_id");
        assert_eq!(Chat::wire_name("kind"), "type");
    }
}
