//! Typed API methods.
//!
//! Each remote method is a request struct implementing [`Method`]. Its
//! parameters are an outbound [`Param`] mapping, so entities, enumerations
//! and markup placed in them go through the same preparation as everything
//! else: a [`Chat`](tgwire_core::Chat) becomes its id, a [`Message`] its message id, an
//! [`Update`] the offset right after it.

use serde_json::Value;

use tgwire_core::{
    ChatAction, File, MappingResult, Markup, Message, Param, ParseMode, Update, UpdateType, User,
    WebhookInfo, convert, convert_many,
};

use crate::error::ClientResult;
use crate::transport::{Attachment, HttpMethod, InputFile};

/// Decodes a method's `result` field.
pub trait FromResult: Sized {
    fn from_result(result: Value) -> ClientResult<Self>;
}

impl FromResult for bool {
    fn from_result(result: Value) -> ClientResult<Self> {
        Ok(serde_json::from_value(result)?)
    }
}

impl FromResult for Vec<Update> {
    fn from_result(result: Value) -> ClientResult<Self> {
        Ok(convert_many(result)?)
    }
}

macro_rules! entity_results {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromResult for $ty {
                fn from_result(result: Value) -> ClientResult<Self> {
                    let entity: MappingResult<$ty> = convert(result);
                    Ok(entity?)
                }
            }
        )+
    };
}

entity_results!(User, Message, WebhookInfo, File);

/// A remote API method.
pub trait Method: Send + Sync {
    /// Method name as it appears in the URL.
    const NAME: &'static str;
    const HTTP_METHOD: HttpMethod = HttpMethod::Post;

    /// What the call returns.
    type Response: FromResult;

    /// Parameters as an outbound mapping; null entries are dropped on
    /// preparation.
    fn params(&self) -> Param;

    /// File uploaded with the call, if any.
    fn attachment(&self) -> Option<Attachment> {
        None
    }
}

fn params<const N: usize>(entries: [(&'static str, Param); N]) -> Param {
    entries.into_iter().collect()
}

// ============================================================================
// Account and updates
// ============================================================================

/// `getMe`: the bot's own account.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetMe;

impl Method for GetMe {
    const NAME: &'static str = "getMe";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;
    type Response = User;

    fn params(&self) -> Param {
        Param::Map(Default::default())
    }
}

/// `getUpdates`: long polling.
#[derive(Debug, Clone, Default)]
pub struct GetUpdates {
    /// Acknowledge everything up to and including this update.
    pub after: Option<Update>,
    /// Raw offset; takes precedence over `after`.
    pub offset: Option<i64>,
    pub limit: Option<u32>,
    /// Long polling timeout in seconds.
    pub timeout: Option<u32>,
    pub allowed_updates: Option<Vec<UpdateType>>,
}

impl GetUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(mut self, update: Update) -> Self {
        self.after = Some(update);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn timeout(mut self, secs: u32) -> Self {
        self.timeout = Some(secs);
        self
    }

    pub fn allowed_updates(mut self, kinds: Vec<UpdateType>) -> Self {
        self.allowed_updates = Some(kinds);
        self
    }
}

impl Method for GetUpdates {
    const NAME: &'static str = "getUpdates";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;
    type Response = Vec<Update>;

    fn params(&self) -> Param {
        let offset = match self.offset {
            Some(offset) => offset.into(),
            None => self.after.clone().into(),
        };
        params([
            ("offset", offset),
            ("limit", self.limit.into()),
            ("timeout", self.timeout.into()),
            ("allowed_updates", self.allowed_updates.clone().into()),
        ])
    }
}

// ============================================================================
// Webhooks
// ============================================================================

/// `getWebhookInfo`: current webhook status.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetWebhookInfo;

impl Method for GetWebhookInfo {
    const NAME: &'static str = "getWebhookInfo";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;
    type Response = WebhookInfo;

    fn params(&self) -> Param {
        Param::Map(Default::default())
    }
}

/// `setWebhook`: deliver updates to an HTTPS endpoint.
#[derive(Debug, Clone)]
pub struct SetWebhook {
    pub url: String,
    /// Self-signed public key certificate.
    pub certificate: Option<InputFile>,
    pub max_connections: Option<u32>,
    /// Update kinds to receive; `None` means all of them.
    pub allowed_updates: Option<Vec<UpdateType>>,
}

impl SetWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            certificate: None,
            max_connections: None,
            allowed_updates: None,
        }
    }

    pub fn certificate(mut self, certificate: InputFile) -> Self {
        self.certificate = Some(certificate);
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    pub fn allowed_updates(mut self, kinds: Vec<UpdateType>) -> Self {
        self.allowed_updates = Some(kinds);
        self
    }
}

impl Method for SetWebhook {
    const NAME: &'static str = "setWebhook";
    type Response = bool;

    fn params(&self) -> Param {
        // An empty list asks for every update kind.
        let allowed_updates = self.allowed_updates.clone().unwrap_or_default();
        params([
            ("url", self.url.clone().into()),
            ("max_connections", self.max_connections.into()),
            ("allowed_updates", allowed_updates.into()),
        ])
    }

    fn attachment(&self) -> Option<Attachment> {
        self.certificate.clone().map(|file| Attachment {
            field: "certificate",
            file,
        })
    }
}

/// `deleteWebhook`: switch back to long polling.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteWebhook;

impl Method for DeleteWebhook {
    const NAME: &'static str = "deleteWebhook";
    type Response = bool;

    fn params(&self) -> Param {
        Param::Map(Default::default())
    }
}

// ============================================================================
// Sending
// ============================================================================

/// `sendMessage`: send a text message.
///
/// `chat_id` and `reply_to_message_id` accept either a raw identifier or
/// the entity itself.
#[derive(Debug, Clone)]
pub struct SendMessage {
    pub chat_id: Param,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub disable_web_page_preview: Option<bool>,
    pub disable_notification: Option<bool>,
    pub reply_to_message_id: Param,
    pub reply_markup: Option<Markup>,
}

impl SendMessage {
    pub fn new(chat: impl Into<Param>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat.into(),
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: None,
            disable_notification: None,
            reply_to_message_id: Param::Null,
            reply_markup: None,
        }
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn disable_web_page_preview(mut self) -> Self {
        self.disable_web_page_preview = Some(true);
        self
    }

    pub fn disable_notification(mut self) -> Self {
        self.disable_notification = Some(true);
        self
    }

    pub fn reply_to(mut self, message: impl Into<Param>) -> Self {
        self.reply_to_message_id = message.into();
        self
    }

    pub fn reply_markup(mut self, markup: impl Into<Markup>) -> Self {
        self.reply_markup = Some(markup.into());
        self
    }
}

impl Method for SendMessage {
    const NAME: &'static str = "sendMessage";
    type Response = Message;

    fn params(&self) -> Param {
        params([
            ("chat_id", self.chat_id.clone()),
            ("text", self.text.clone().into()),
            ("parse_mode", self.parse_mode.into()),
            ("disable_web_page_preview", self.disable_web_page_preview.into()),
            ("disable_notification", self.disable_notification.into()),
            ("reply_to_message_id", self.reply_to_message_id.clone()),
            ("reply_markup", self.reply_markup.clone().into()),
        ])
    }
}

/// `sendChatAction`: show a status such as "typing..." in the chat.
#[derive(Debug, Clone)]
pub struct SendChatAction {
    pub chat_id: Param,
    pub action: ChatAction,
}

impl SendChatAction {
    pub fn new(chat: impl Into<Param>, action: ChatAction) -> Self {
        Self {
            chat_id: chat.into(),
            action,
        }
    }
}

impl Method for SendChatAction {
    const NAME: &'static str = "sendChatAction";
    type Response = bool;

    fn params(&self) -> Param {
        params([
            ("chat_id", self.chat_id.clone()),
            ("action", self.action.into()),
        ])
    }
}

/// The document sent by [`SendDocument`].
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// A file already stored by the service.
    FileId(String),
    /// A new upload.
    Upload(InputFile),
}

impl From<&str> for DocumentSource {
    fn from(file_id: &str) -> Self {
        Self::FileId(file_id.to_string())
    }
}

impl From<String> for DocumentSource {
    fn from(file_id: String) -> Self {
        Self::FileId(file_id)
    }
}

impl From<InputFile> for DocumentSource {
    fn from(file: InputFile) -> Self {
        Self::Upload(file)
    }
}

/// `sendDocument`: send a general file.
#[derive(Debug, Clone)]
pub struct SendDocument {
    pub chat_id: Param,
    pub document: DocumentSource,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    pub disable_notification: Option<bool>,
    pub reply_to_message_id: Param,
    pub reply_markup: Option<Markup>,
}

impl SendDocument {
    pub fn new(chat: impl Into<Param>, document: impl Into<DocumentSource>) -> Self {
        Self {
            chat_id: chat.into(),
            document: document.into(),
            caption: None,
            parse_mode: None,
            disable_notification: None,
            reply_to_message_id: Param::Null,
            reply_markup: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn disable_notification(mut self) -> Self {
        self.disable_notification = Some(true);
        self
    }

    pub fn reply_to(mut self, message: impl Into<Param>) -> Self {
        self.reply_to_message_id = message.into();
        self
    }

    pub fn reply_markup(mut self, markup: impl Into<Markup>) -> Self {
        self.reply_markup = Some(markup.into());
        self
    }
}

impl Method for SendDocument {
    const NAME: &'static str = "sendDocument";
    type Response = Message;

    fn params(&self) -> Param {
        let document = match &self.document {
            DocumentSource::FileId(file_id) => file_id.clone().into(),
            DocumentSource::Upload(_) => Param::Null,
        };
        params([
            ("chat_id", self.chat_id.clone()),
            ("document", document),
            ("caption", self.caption.clone().into()),
            ("parse_mode", self.parse_mode.into()),
            ("disable_notification", self.disable_notification.into()),
            ("reply_to_message_id", self.reply_to_message_id.clone()),
            ("reply_markup", self.reply_markup.clone().into()),
        ])
    }

    fn attachment(&self) -> Option<Attachment> {
        match &self.document {
            DocumentSource::Upload(file) => Some(Attachment {
                field: "document",
                file: file.clone(),
            }),
            DocumentSource::FileId(_) => None,
        }
    }
}

// ============================================================================
// Files
// ============================================================================

/// `getFile`: resolve a file id to a downloadable path.
#[derive(Debug, Clone)]
pub struct GetFile {
    pub file_id: String,
}

impl GetFile {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

impl Method for GetFile {
    const NAME: &'static str = "getFile";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;
    type Response = File;

    fn params(&self) -> Param {
        params([("file_id", self.file_id.clone().into())])
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use serde_json::json;

    use super::*;
    use tgwire_core::{Chat, InlineKeyboardMarkup, UpdateKind, prepare_default};

    fn message(id: i64) -> Message {
        let date = DateTime::from_timestamp(0, 0).unwrap();
        Message::new(id, date, Chat::new(-100, "group"))
    }

    #[test]
    fn test_updates_offset_precedes_after() {
        let update = Update::new(10, UpdateKind::Message(message(1)));
        let method = GetUpdates::new().after(update.clone()).offset(3);
        assert_eq!(prepare_default(&method.params()).unwrap(), json!({"offset": 3}));

        let method = GetUpdates::new().after(update).timeout(30);
        assert_eq!(
            prepare_default(&method.params()).unwrap(),
            json!({"offset": 11, "timeout": 30})
        );
    }

    #[test]
    fn test_updates_timeout_is_sent_in_full() {
        let method = GetUpdates::new().timeout(u32::MAX);
        assert_eq!(
            prepare_default(&method.params()).unwrap(),
            json!({"timeout": 4_294_967_295_u64})
        );
    }

    #[test]
    fn test_set_webhook_all_updates_is_empty_list() {
        let method = SetWebhook::new("https://example.org/hook");
        assert_eq!(
            prepare_default(&method.params()).unwrap(),
            json!({"url": "https://example.org/hook", "allowed_updates": []})
        );
        assert!(method.attachment().is_none());
    }

    #[test]
    fn test_set_webhook_certificate_is_attached() {
        let method = SetWebhook::new("https://example.org/hook")
            .certificate(InputFile::new("cert.pem", b"-----BEGIN".to_vec()));
        assert_eq!(method.attachment().map(|a| a.field), Some("certificate"));
    }

    #[test]
    fn test_send_message_reduces_entities() {
        let reply = message(5);
        let method = SendMessage::new(reply.chat.clone(), "hi")
            .parse_mode(ParseMode::Html)
            .reply_to(reply)
            .reply_markup(InlineKeyboardMarkup::new(vec![vec!["ok".into()]]));
        assert_eq!(
            prepare_default(&method.params()).unwrap(),
            json!({
                "chat_id": -100,
                "text": "hi",
                "parse_mode": "HTML",
                "reply_to_message_id": 5,
                "reply_markup": {"inline_keyboard": [[{"text": "ok"}]]},
            })
        );
    }

    #[test]
    fn test_send_document_by_file_id_or_upload() {
        let by_id = SendDocument::new(1, "BQAD-file");
        assert_eq!(
            prepare_default(&by_id.params()).unwrap(),
            json!({"chat_id": 1, "document": "BQAD-file"})
        );
        assert!(by_id.attachment().is_none());

        let upload = SendDocument::new(1, InputFile::new("a.txt", b"hello".to_vec())).caption("c");
        assert_eq!(
            prepare_default(&upload.params()).unwrap(),
            json!({"chat_id": 1, "caption": "c"})
        );
        assert_eq!(upload.attachment().map(|a| a.file.file_name), Some("a.txt".into()));
    }

    #[test]
    fn test_chat_action_wire_value() {
        let method = SendChatAction::new(7, ChatAction::Typing);
        assert_eq!(
            prepare_default(&method.params()).unwrap(),
            json!({"chat_id": 7, "action": "typing"})
        );
    }
}
