//! # tgwire
//!
//! A typed Telegram Bot API client with a generic, bidirectional wire
//! mapping engine.
//!
//! ## Overview
//!
//! The remote service speaks loosely shaped JSON; applications want typed
//! entities. tgwire sits in between:
//!
//! ```text
//! ┌──────────┐  Method   ┌───────────┐  ApiRequest  ┌───────────┐
//! │  caller  │──────────▶│ BotClient │─────────────▶│ Transport │
//! │          │◀──────────│           │◀─────────────│  (yours)  │
//! └──────────┘  entities └───────────┘   Envelope   └───────────┘
//! ```
//!
//! - **core**: entity model, inbound/outbound mapping, markup resolution,
//!   keyboard grids
//! - **client**: method catalogue, envelope handling, webhook responses,
//!   configuration and logging setup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tgwire::prelude::*;
//!
//! let client = BotClient::by(token, Arc::new(my_transport)).await?;
//! let keyboard = InlineKeyboardMarkup::new(keyboard::from_rows_of(["a", "b", "c"], 2)?);
//! client
//!     .send_message(SendMessage::new(chat, "Pick one").reply_markup(keyboard))
//!     .await?;
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `json-log`: JSON log output

pub use tgwire_client as client;
pub use tgwire_core as core;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use tgwire::prelude::*;
/// ```
pub mod prelude {
    // Client - main entry point
    pub use tgwire_client::{BotClient, ClientConfig, ClientError, ClientResult, Transport};

    // Methods
    pub use tgwire_client::{
        DeleteWebhook, DocumentSource, GetFile, GetMe, GetUpdates, GetWebhookInfo, InputFile,
        Method, SendChatAction, SendDocument, SendMessage, SetWebhook, webhook_reply,
    };

    // Entities
    pub use tgwire_core::{
        Bot, CallbackQuery, Chat, ChatAction, Document, File, ForceReply, InlineKeyboardButton,
        InlineKeyboardMarkup, KeyboardButton, Markup, Message, MessageEntity, ParseMode,
        ReplyKeyboardMarkup, ReplyKeyboardRemove, Update, UpdateKind, UpdateType, User,
        WebhookInfo,
    };

    // Mapping engine
    pub use tgwire_core::{
        MappingError, Param, PrepareOptions, convert, convert_many, keyboard, prepare,
        prepare_default,
    };
}
