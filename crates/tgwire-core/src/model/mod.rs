//! Typed entities mirroring the remote service's wire objects.

pub mod callback;
pub mod chat;
pub mod file;
pub mod markup;
pub mod message;
pub mod update;
pub mod user;
pub mod webhook;

pub use callback::CallbackQuery;
pub use chat::{Chat, ChatAction};
pub use file::{Audio, Document, File, PhotoSize};
pub use markup::{
    Button, ButtonLike, ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton,
    Markup, ReplyKeyboardMarkup, ReplyKeyboardRemove,
};
pub use message::{Location, Message, MessageEntity, ParseMode};
pub use update::{Update, UpdateKind, UpdateType};
pub use user::{Bot, User};
pub use webhook::WebhookInfo;
