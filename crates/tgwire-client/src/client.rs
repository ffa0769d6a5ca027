//! The bot client.
//!
//! [`BotClient`] ties the pieces together: it prepares a [`Method`]'s
//! parameters with the outbound mapper, hands the request to the
//! [`Transport`], unwraps the [`Envelope`] and converts the result with the
//! inbound mapper.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tgwire_client::{BotClient, SendMessage};
//!
//! let client = BotClient::by(token, Arc::new(my_transport)).await?;
//! for update in client.updates(GetUpdates::new().timeout(30)).await? {
//!     if let Some(message) = update.message() {
//!         client.send_message(SendMessage::new(message.chat.clone(), "pong")).await?;
//!     }
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, info, trace};

use tgwire_core::{
    Bot, MappingError, Message, PrepareOptions, Update, WebhookInfo, convert_with, prepare,
};

use crate::api::Api;
use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::ClientResult;
use crate::method::{
    DeleteWebhook, FromResult, GetFile, GetMe, GetUpdates, GetWebhookInfo, Method, SendChatAction,
    SendDocument, SendMessage, SetWebhook,
};
use crate::transport::{ApiRequest, Transport};
use crate::webhook::webhook_reply;

// =============================================================================
// BotClient
// =============================================================================

/// A bot account bound to a transport.
pub struct BotClient {
    bot: Bot,
    transport: Arc<dyn Transport>,
    api: Api,
    prepare: PrepareOptions,
    /// Timeout for regular calls.
    timeout: Duration,
    /// Default long polling timeout, in seconds.
    long_poll_timeout: Option<u32>,
    /// Single-slot memo of the first successful `getWebhookInfo`.
    webhook_info: Mutex<Option<WebhookInfo>>,
}

impl BotClient {
    /// Identifies the bot behind `token` with `getMe`, using default settings.
    pub async fn by(token: impl Into<String>, transport: Arc<dyn Transport>) -> ClientResult<Self> {
        Self::with_config(token, transport, &ClientConfig::default()).await
    }

    /// Identifies the bot behind `token` with `getMe`.
    pub async fn with_config(
        token: impl Into<String>,
        transport: Arc<dyn Transport>,
        config: &ClientConfig,
    ) -> ClientResult<Self> {
        let token = token.into();
        let api = Api::new(&config.api_host);

        let request = ApiRequest {
            method: GetMe::NAME,
            http_method: GetMe::HTTP_METHOD,
            url: api.method_url(&token, GetMe::NAME),
            payload: Value::Object(Map::new()),
            attachment: None,
            timeout: config.timeout(),
        };
        let result = send(transport.as_ref(), request).await?;

        let mut extra = Map::new();
        extra.insert("api_token".to_string(), Value::String(token));
        let bot: Bot = convert_with(result, extra)?;

        info!(bot_id = bot.id, username = ?bot.username, "Bot identified");
        Ok(Self::from_parts(bot, transport, config))
    }

    /// Creates a client for an already identified bot, without any call.
    pub fn from_parts(bot: Bot, transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            bot,
            transport,
            api: Api::new(&config.api_host),
            prepare: config.prepare.to_options(),
            timeout: config.timeout(),
            long_poll_timeout: config.long_poll_timeout_secs,
            webhook_info: Mutex::new(None),
        }
    }

    /// The bot's account.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Options used to prepare outgoing payloads.
    pub fn prepare_options(&self) -> &PrepareOptions {
        &self.prepare
    }

    /// Calls an arbitrary method.
    pub async fn call<M: Method>(&self, method: &M) -> ClientResult<M::Response> {
        self.execute(method, self.timeout).await
    }

    async fn execute<M: Method>(&self, method: &M, timeout: Duration) -> ClientResult<M::Response> {
        let payload = prepare(&method.params(), &self.prepare)?;

        debug!(method = M::NAME, "Calling Bot API");
        trace!(method = M::NAME, payload = %payload, "API request");

        let request = ApiRequest {
            method: M::NAME,
            http_method: M::HTTP_METHOD,
            url: self.api.method_url(self.bot.api_token(), M::NAME),
            payload,
            attachment: method.attachment(),
            timeout,
        };
        let result = send(self.transport.as_ref(), request).await?;
        M::Response::from_result(result)
    }

    // -------------------------------------------------------------------------
    // Updates
    // -------------------------------------------------------------------------

    /// Long polls for updates.
    ///
    /// Without an explicit timeout, the configured long polling timeout is
    /// used. The transport may wait that much longer than for other calls.
    pub async fn updates(&self, mut request: GetUpdates) -> ClientResult<Vec<Update>> {
        if request.timeout.is_none() {
            request.timeout = self.long_poll_timeout;
        }
        let poll = u64::from(request.timeout.unwrap_or(0));
        let timeout = self.timeout + Duration::from_secs(poll);
        let updates = self.execute(&request, timeout).await?;
        debug!(count = updates.len(), "Received updates");
        Ok(updates)
    }

    // -------------------------------------------------------------------------
    // Webhooks
    // -------------------------------------------------------------------------

    /// Current webhook status.
    ///
    /// The first successful answer is kept for the lifetime of the client.
    /// Concurrent first callers may each fetch it once.
    pub async fn webhook_info(&self) -> ClientResult<WebhookInfo> {
        let cached = self.webhook_info.lock().clone();
        if let Some(info) = cached {
            return Ok(info);
        }
        let info = self.call(&GetWebhookInfo).await?;
        *self.webhook_info.lock() = Some(info.clone());
        Ok(info)
    }

    pub async fn set_webhook(&self, request: SetWebhook) -> ClientResult<bool> {
        self.call(&request).await
    }

    pub async fn delete_webhook(&self) -> ClientResult<bool> {
        self.call(&DeleteWebhook).await
    }

    /// Builds a webhook response body for `method`.
    pub fn webhook_reply<M: Method>(&self, method: &M) -> ClientResult<Value> {
        webhook_reply(method, &self.prepare)
    }

    // -------------------------------------------------------------------------
    // Sending
    // -------------------------------------------------------------------------

    pub async fn send_message(&self, request: SendMessage) -> ClientResult<Message> {
        self.call(&request).await
    }

    pub async fn send_chat_action(&self, request: SendChatAction) -> ClientResult<bool> {
        self.call(&request).await
    }

    pub async fn send_document(&self, request: SendDocument) -> ClientResult<Message> {
        self.call(&request).await
    }

    // -------------------------------------------------------------------------
    // Files
    // -------------------------------------------------------------------------

    /// Downloads a file's content by its id.
    pub async fn file(&self, file_id: impl Into<String>) -> ClientResult<Vec<u8>> {
        let file = self.call(&GetFile::new(file_id)).await?;
        let path = file
            .file_path
            .ok_or_else(|| MappingError::missing("File", "file_path"))?;
        let url = self.api.file_url(self.bot.api_token(), &path);
        debug!(file_id = %file.file_id, "Downloading file");
        self.transport.download(&url, self.timeout).await
    }
}

impl std::fmt::Debug for BotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotClient")
            .field("bot", &self.bot)
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

async fn send(transport: &dyn Transport, request: ApiRequest) -> ClientResult<Value> {
    let method = request.method;
    let body = transport.call(request).await?;
    trace!(method, response = %body, "API response");
    Envelope::from_value(body)?.into_result()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::ClientError;
    use crate::transport::{HttpMethod, InputFile};
    use tgwire_core::{ChatAction, UpdateKind};

    struct MockTransport {
        responses: Mutex<VecDeque<Value>>,
        requests: Mutex<Vec<ApiRequest>>,
        downloads: Mutex<Vec<String>>,
    }

    impl MockTransport {
        fn new(responses: Vec<Value>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
                downloads: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn call(&self, request: ApiRequest) -> ClientResult<Value> {
            self.requests.lock().push(request);
            self.responses
                .lock()
                .pop_front()
                .ok_or_else(|| ClientError::transport("no response queued"))
        }

        async fn download(&self, url: &str, _timeout: Duration) -> ClientResult<Vec<u8>> {
            self.downloads.lock().push(url.to_string());
            Ok(b"file content".to_vec())
        }
    }

    fn me() -> Value {
        json!({"ok": true, "result": {
            "id": 99, "is_bot": true, "first_name": "Helper", "username": "helper_bot"
        }})
    }

    fn sent_message() -> Value {
        json!({"ok": true, "result": {
            "message_id": 12, "date": 1_600_000_000,
            "chat": {"id": 5, "type": "private"}, "text": "pong"
        }})
    }

    #[tokio::test]
    async fn test_by_identifies_bot() {
        let transport = MockTransport::new(vec![me()]);
        let client = BotClient::by("123:abc", transport.clone()).await.unwrap();

        assert_eq!(client.bot().id, 99);
        assert_eq!(client.bot().api_token(), "123:abc");
        assert_eq!(client.bot().username.as_deref(), Some("helper_bot"));

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://api.telegram.org/bot123:abc/getMe");
        assert_eq!(requests[0].http_method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_send_message() {
        let transport = MockTransport::new(vec![me(), sent_message()]);
        let client = BotClient::by("123:abc", transport.clone()).await.unwrap();

        let message = client
            .send_message(SendMessage::new(5, "pong"))
            .await
            .unwrap();
        assert_eq!(message.id, 12);
        assert_eq!(message.text.as_deref(), Some("pong"));

        let request = &transport.requests()[1];
        assert_eq!(request.method, "sendMessage");
        assert_eq!(request.payload, json!({"chat_id": 5, "text": "pong"}));
        assert!(request.attachment.is_none());
    }

    #[tokio::test]
    async fn test_remote_error() {
        let transport = MockTransport::new(vec![
            me(),
            json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}),
        ]);
        let client = BotClient::by("123:abc", transport).await.unwrap();

        let err = client
            .send_chat_action(SendChatAction::new(404, ChatAction::Typing))
            .await
            .unwrap_err();
        let ClientError::Remote(remote) = err else {
            panic!("expected a remote error, got {err:?}");
        };
        assert_eq!(remote.error_code, 400);
        assert_eq!(remote.description, "Bad Request: chat not found");
    }

    #[tokio::test]
    async fn test_webhook_info_is_memoized() {
        let transport = MockTransport::new(vec![
            me(),
            json!({"ok": true, "result": {
                "url": "https://example.org/hook",
                "has_custom_certificate": false,
                "pending_update_count": 0,
            }}),
        ]);
        let client = BotClient::by("123:abc", transport.clone()).await.unwrap();

        assert!(client.webhook_info().await.unwrap().is_set_up());
        assert!(client.webhook_info().await.unwrap().is_set_up());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_updates_use_long_poll_default() {
        let transport = MockTransport::new(vec![json!({"ok": true, "result": [
            {"update_id": 8, "message": {
                "message_id": 1, "date": 0, "chat": {"id": 5, "type": "private"}
            }},
        ]})]);
        let config = ClientConfig {
            long_poll_timeout_secs: Some(25),
            ..ClientConfig::default()
        };
        let bot = Bot::new(tgwire_core::User::new(99, true, "Helper"), "123:abc");
        let client = BotClient::from_parts(bot, transport.clone(), &config);

        let previous = Update::new(
            7,
            UpdateKind::InlineQuery(json!({"id": "q", "query": ""})),
        );
        let updates = client
            .updates(GetUpdates::new().after(previous))
            .await
            .unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, 8);

        let request = &transport.requests()[0];
        assert_eq!(request.payload, json!({"offset": 8, "timeout": 25}));
        assert_eq!(request.timeout, Duration::from_secs(55));
    }

    #[tokio::test]
    async fn test_file_download() {
        let transport = MockTransport::new(vec![
            me(),
            json!({"ok": true, "result": {"file_id": "F1", "file_path": "documents/a.txt"}}),
        ]);
        let client = BotClient::by("123:abc", transport.clone()).await.unwrap();

        let content = client.file("F1").await.unwrap();
        assert_eq!(content, b"file content");
        assert_eq!(
            transport.downloads.lock().clone(),
            vec!["https://api.telegram.org/file/bot123:abc/documents/a.txt".to_string()]
        );
    }

    #[tokio::test]
    async fn test_document_upload_is_attached() {
        let transport = MockTransport::new(vec![me(), sent_message()]);
        let client = BotClient::by("123:abc", transport.clone()).await.unwrap();

        client
            .send_document(SendDocument::new(5, InputFile::new("a.txt", b"hi".to_vec())))
            .await
            .unwrap();

        let request = &transport.requests()[1];
        assert_eq!(request.payload, json!({"chat_id": 5}));
        assert_eq!(
            request.attachment.as_ref().map(|a| a.field),
            Some("document")
        );
    }
}
