//! # tgwire client
//!
//! A Telegram Bot API client built on the `tgwire-core` mapping engine.
//!
//! ## Overview
//!
//! - [`BotClient`]: typed calls for an identified bot
//! - [`method`]: request structs implementing [`Method`]
//! - [`Transport`]: the contract an HTTP implementation fulfils
//! - [`webhook_reply`]: answering a webhook request with a method call
//! - [`config`] and [`logging`]: figment-based settings and a
//!   `tracing-subscriber` setup
//!
//! ## Request Flow
//!
//! ```text
//! Method ──prepare──▶ ApiRequest ──Transport──▶ Envelope ──convert──▶ Response
//!                                                  │
//!                                                  └─ ok: false ──▶ RemoteError
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod method;
pub mod transport;
pub mod webhook;

pub use api::{Api, DEFAULT_API_HOST};
pub use client::BotClient;
pub use config::{ClientConfig, ConfigError, ConfigLoader, ConfigResult};
pub use envelope::Envelope;
pub use error::{ClientError, ClientResult, RemoteError, ResponseParameters};
pub use method::{
    DeleteWebhook, DocumentSource, FromResult, GetFile, GetMe, GetUpdates, GetWebhookInfo,
    Method, SendChatAction, SendDocument, SendMessage, SetWebhook,
};
pub use transport::{ApiRequest, Attachment, HttpMethod, InputFile, Transport};
pub use webhook::webhook_reply;
