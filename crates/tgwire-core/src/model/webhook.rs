//! Webhook status.

use chrono::{DateTime, Utc};

use super::UpdateType;
use crate::entity::Entity;
use crate::error::MappingResult;
use crate::mapping::FieldSet;
use crate::value::Param;

/// Current webhook status as reported by `getWebhookInfo`.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookInfo {
    /// Webhook URL; empty if no webhook is set up.
    pub url: String,
    pub has_custom_certificate: bool,
    /// Updates awaiting delivery.
    pub pending_update_count: i64,
    pub last_error_date: Option<DateTime<Utc>>,
    pub last_error_message: Option<String>,
    pub max_connections: Option<i64>,
    pub allowed_updates: Option<Vec<UpdateType>>,
}

impl WebhookInfo {
    /// Whether a webhook is currently configured.
    pub fn is_set_up(&self) -> bool {
        !self.url.is_empty()
    }
}

impl Entity for WebhookInfo {
    const NAME: &'static str = "WebhookInfo";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            url: fields.required("url")?,
            has_custom_certificate: fields.required("has_custom_certificate")?,
            pending_update_count: fields.required("pending_update_count")?,
            last_error_date: fields.optional_timestamp("last_error_date")?,
            last_error_message: fields.optional("last_error_message")?,
            max_connections: fields.optional("max_connections")?,
            allowed_updates: fields.optional("allowed_updates")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("url", self.url.clone().into()),
            ("has_custom_certificate", self.has_custom_certificate.into()),
            ("pending_update_count", self.pending_update_count.into()),
            (
                "last_error_date",
                self.last_error_date.map(|d| d.timestamp()).into(),
            ),
            ("last_error_message", self.last_error_message.clone().into()),
            ("max_connections", self.max_connections.into()),
            ("allowed_updates", self.allowed_updates.clone().into()),
        ]
    }
}
