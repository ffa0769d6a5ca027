//! # tgwire core
//!
//! Typed entity model and bidirectional wire mapping for the Telegram Bot API.
//!
//! ## Overview
//!
//! The remote service speaks loosely shaped JSON. This crate turns it into
//! typed entities and back:
//!
//! - **Inbound**: [`convert`] builds an entity from a decoded payload,
//!   renaming wire keys and recursing into nested (even self-referential)
//!   entities. Already-typed input passes through untouched.
//! - **Outbound**: [`prepare`] reduces a [`Param`] tree to wire-safe JSON,
//!   substituting entities with their identity, unwrapping enumerations
//!   and expanding markup inline.
//! - **Markup**: [`resolve`] tells the four untagged markup variants apart
//!   by their key sets, and [`keyboard`] builds button grids.
//!
//! ```text
//! response JSON ──convert──▶ Message / Update / ... ──▶ caller
//! caller ──▶ Param tree ──prepare──▶ request JSON
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use tgwire_core::{convert, prepare_default, Message, Param, ParseMode};
//!
//! let message: Message = convert(payload)?;
//! let params: Param = [
//!     ("chat_id", Param::from(message.chat.clone())),
//!     ("reply_to_message_id", message.into()),
//!     ("parse_mode", ParseMode::Markdown.into()),
//! ]
//! .into_iter()
//! .collect();
//! let body = prepare_default(&params)?;
//! ```

#[macro_use]
mod macros;

pub mod entity;
pub mod error;
pub mod keyboard;
pub mod mapping;
pub mod model;
pub mod value;

pub use entity::{Entity, EntityKind, EntityValue, Rename};
pub use error::{MappingError, MappingResult};
pub use mapping::{
    DepthPolicy, FieldSet, PrepareOptions, Raw, convert, convert_many, convert_with, prepare,
    prepare_default, resolve,
};
pub use model::*;
pub use value::{EnumValue, Param, WireEnum};
