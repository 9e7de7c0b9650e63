//! Mailer trait and delivery types

use async_trait::async_trait;
use base64::Engine;
use reviewsentry_core::Result;

/// A file attached to an outbound notification.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Base64-encoded file content
    pub content: String,

    /// Attachment filename
    pub filename: String,

    /// MIME type, e.g. `text/csv`
    pub mime_type: String,
}

impl Attachment {
    /// Build an attachment from raw bytes, base64-encoding the content.
    pub fn from_bytes(bytes: &[u8], filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            content: base64::engine::general_purpose::STANDARD.encode(bytes),
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Receipt for an accepted delivery.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    /// HTTP status code the delivery service answered with
    pub status_code: u16,
}

/// Outbound notification dispatcher.
///
/// Delivery is at-least-once: the implementation retries transient failures
/// and a retried send may duplicate an already-delivered message.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a plain-text notification.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<DeliveryReceipt>;

    /// Deliver a notification carrying a file attachment.
    async fn send_with_attachment(
        &self,
        to: &str,
        subject: &str,
        attachment: &Attachment,
    ) -> Result<DeliveryReceipt>;
}
